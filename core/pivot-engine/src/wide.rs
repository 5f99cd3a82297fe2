//! FILENAME: core/pivot-engine/src/wide.rs
//! Wide Table Builder - long (group, year) rows into field-by-year columns.
//!
//! Values are collected into a map keyed by (group, field, year). Columns are
//! materialised deterministically: designated field order first, then
//! ascending year. Only years that actually occur in the collected rows get
//! columns, and a missing cell stays empty rather than becoming zero.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use engine::CellValue;

/// A materialised pivot row. Three fields over five years fit inline.
pub type WideRow = SmallVec<[CellValue; 15]>;

/// One output column of the wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideColumn {
    /// Position in the builder's field list.
    pub field: usize,
    pub year: i32,
    /// `"<field> <year>"`.
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct WideTableBuilder {
    fields: Vec<String>,
    values: FxHashMap<(u32, usize, i32), f64>,
    years: BTreeSet<i32>,
}

impl WideTableBuilder {
    pub fn new(fields: Vec<String>) -> Self {
        WideTableBuilder {
            fields,
            values: FxHashMap::default(),
            years: BTreeSet::new(),
        }
    }

    /// Adds a value for (group, field, year). Values landing in the same cell
    /// are summed; `None` only marks the year as present.
    pub fn add(&mut self, group: u32, field: usize, year: i32, value: Option<f64>) {
        self.years.insert(year);
        if let Some(value) = value {
            *self.values.entry((group, field, year)).or_insert(0.0) += value;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty() || self.fields.is_empty()
    }

    /// Output columns in field order, then year order.
    pub fn columns(&self) -> Vec<WideColumn> {
        self.fields
            .iter()
            .enumerate()
            .flat_map(|(field, name)| {
                self.years.iter().map(move |&year| WideColumn {
                    field,
                    year,
                    name: format!("{} {}", name, year),
                })
            })
            .collect()
    }

    pub fn value(&self, group: u32, field: usize, year: i32) -> Option<f64> {
        self.values.get(&(group, field, year)).copied()
    }

    /// The pivot cells of one group, aligned with `columns`.
    pub fn row(&self, group: u32, columns: &[WideColumn]) -> WideRow {
        columns
            .iter()
            .map(|col| match self.value(group, col.field, col.year) {
                Some(v) => CellValue::Number(v),
                None => CellValue::Empty,
            })
            .collect()
    }
}
