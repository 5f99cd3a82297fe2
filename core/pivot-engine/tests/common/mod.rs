//! FILENAME: core/pivot-engine/tests/common/mod.rs
//! Raw-record fixtures for summary integration tests.

#![allow(dead_code)]

use engine::{CellValue, ColumnSchema, Table};

/// One raw project-year record in the default English layout.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: String,
    pub sub_task: Option<String>,
    pub prev: Option<String>,
    pub year: i64,
    pub title: String,
    pub government: Option<f64>,
    pub private: Option<f64>,
    pub total: Option<f64>,
    pub indirect: f64,
}

impl Row {
    pub fn new(id: &str, sub_task: &str, year: i64) -> Self {
        Row {
            id: id.to_string(),
            sub_task: Some(sub_task.to_string()),
            prev: None,
            year,
            title: format!("{} title", id),
            government: None,
            private: None,
            total: None,
            indirect: 7.0,
        }
    }

    pub fn prev(mut self, prev: &str) -> Self {
        self.prev = Some(prev.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn budget(mut self, government: f64, private: f64) -> Self {
        self.government = Some(government);
        self.private = Some(private);
        self.total = Some(government + private);
        self
    }

    pub fn total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }
}

pub const COLUMNS: [&str; 10] = [
    "NO",
    "project_id",
    "sub_task_id",
    "prev_project_ids",
    "fiscal_year",
    "title",
    "government_funding",
    "private_funding_subtotal",
    "total_funding",
    "indirect",
];

pub fn table_of(rows: &[Row]) -> Table {
    let mut table = Table::new(COLUMNS);
    for (i, row) in rows.iter().enumerate() {
        table.push_row(vec![
            CellValue::Number((i + 1) as f64),
            row.id.as_str().into(),
            row.sub_task.clone().into(),
            row.prev.clone().into(),
            row.year.into(),
            row.title.as_str().into(),
            row.government.into(),
            row.private.into(),
            row.total.into(),
            row.indirect.into(),
        ]);
    }
    table
}

pub fn schema() -> ColumnSchema {
    ColumnSchema::default()
}

/// Cell of the summary row for `group`, by column name.
pub fn summary_cell<'a>(table: &'a Table, group: u32, column: &str) -> &'a CellValue {
    let col = table
        .column_index(column)
        .unwrap_or_else(|| panic!("no column {}", column));
    let row = table
        .rows
        .iter()
        .position(|r| r[0] == CellValue::Number(group as f64))
        .unwrap_or_else(|| panic!("no summary row for group {}", group));
    table.cell(row, col)
}
