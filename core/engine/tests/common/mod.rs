//! FILENAME: core/engine/tests/common/mod.rs
//! Fixtures for linkage integration tests.

#![allow(dead_code)]

use engine::{CellValue, ColumnSchema, Table};

/// Header used by every fixture table (default English layout).
pub const COLUMNS: [&str; 7] = [
    "NO",
    "project_id",
    "sub_task_id",
    "prev_project_ids",
    "fiscal_year",
    "title",
    "total_funding",
];

/// One input record.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: CellValue,
    pub sub_task: CellValue,
    pub prev: CellValue,
    pub year: i64,
    pub title: String,
    pub total: f64,
}

impl Record {
    pub fn new(id: &str, sub_task: Option<&str>, prev: Option<&str>, year: i64) -> Self {
        Record {
            id: id.into(),
            sub_task: sub_task.into(),
            prev: prev.into(),
            year,
            title: format!("{} {}", id, year),
            total: 0.0,
        }
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = total;
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }
}

/// Builds a table in the default layout, numbering rows in the `NO` column.
pub fn table_of(records: &[Record]) -> Table {
    let mut table = Table::new(COLUMNS);
    for (i, record) in records.iter().enumerate() {
        table.push_row(vec![
            CellValue::Number((i + 1) as f64),
            record.id.clone(),
            record.sub_task.clone(),
            record.prev.clone(),
            CellValue::Number(record.year as f64),
            record.title.clone().into(),
            CellValue::Number(record.total),
        ]);
    }
    table
}

pub fn schema() -> ColumnSchema {
    ColumnSchema::default()
}

/// Group id of the row holding `id` in a detailed view table.
pub fn group_of(table: &Table, id: &str) -> u32 {
    let id_col = table.column_index("project_id").unwrap();
    let row = table
        .rows
        .iter()
        .position(|row| row[id_col].as_key().as_deref() == Some(id))
        .unwrap_or_else(|| panic!("no row for {}", id));
    table.rows[row][0].as_number().unwrap() as u32
}
