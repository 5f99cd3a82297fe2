//! FILENAME: core/engine/src/table.rs
//! PURPOSE: In-memory table handed between the readers, the linkage engine
//! and the summary reshaper.
//! CONTEXT: Unlike a sheet grid, exports are dense and header-addressed, so
//! the table is stored row-major with every row padded to the column count.

use crate::cell::CellValue;
use crate::error::{EngineError, EngineResult};

/// A header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in display order.
    pub columns: Vec<String>,

    /// Data rows. Each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, padding with `Empty` or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.push(row);
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column the caller cannot do without.
    pub fn require_column(&self, name: &str, role: &'static str) -> EngineResult<usize> {
        self.column_index(name)
            .ok_or_else(|| EngineError::missing_column(name, role))
    }

    /// Retrieves a cell. Out-of-range coordinates read as `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Iterates over one column top to bottom.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[col])
    }

    /// Removes a column by name. Returns false when it was not present.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.columns.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    /// Inserts a new first column.
    /// `values` must yield one value per existing row.
    pub fn insert_front_column(&mut self, name: &str, values: impl IntoIterator<Item = CellValue>) {
        self.columns.insert(0, name.to_string());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(0, values.next().unwrap_or(CellValue::Empty));
        }
    }

    /// Builds a new table from the given row indices, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}
