//! FILENAME: core/pivot-engine/src/engine.rs
//! Summary Engine - grouped records into one row per project group.
//!
//! This module takes a grouped table (the detailed view) and a
//! SummaryDefinition and produces the summary table.
//!
//! Algorithm:
//! 1. Find the latest fiscal year over the WHOLE table and derive the
//!    trailing window from it (the window is global, never per group)
//! 2. Order rows by (group, year) so "last" means the latest year
//! 3. Per group: last non-empty value of each static field, max year,
//!    sum of the total budget over all years
//! 4. Feed rows inside the window into the wide table builder
//! 5. Emit one row per group: group id, static fields, extras, pivot cells

use std::collections::BTreeMap;

use log::debug;

use engine::{
    build_groups, CellValue, ColumnSchema, EngineError, EngineResult, LinkageReport, Table,
};

use crate::definition::{SummaryDefinition, SummaryLayout, TrailingWindow};
use crate::wide::WideTableBuilder;

// ============================================================================
// OUTPUT
// ============================================================================

/// The summary table plus the parameters it was computed with.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub table: Table,
    /// Latest fiscal year in the whole dataset.
    pub latest_year: Option<i32>,
    /// Years covered by the pivot columns.
    pub window: Option<TrailingWindow>,
    /// Linkage counts when the summary was built from raw records.
    pub report: Option<LinkageReport>,
}

// ============================================================================
// GROUP ACCUMULATOR
// ============================================================================

/// Running aggregates for one group.
#[derive(Debug, Clone)]
struct GroupAccumulator {
    /// Last non-empty value per static field.
    last_values: Vec<CellValue>,
    latest_year: Option<i32>,
    total: f64,
}

impl GroupAccumulator {
    fn new(static_count: usize) -> Self {
        GroupAccumulator {
            last_values: vec![CellValue::Empty; static_count],
            latest_year: None,
            total: 0.0,
        }
    }
}

// ============================================================================
// SUMMARY CALCULATOR
// ============================================================================

/// Reads and validates the group id of every row.
fn read_group_ids(table: &Table, group_col: usize) -> EngineResult<Vec<u32>> {
    table
        .column_values(group_col)
        .enumerate()
        .map(|(row, value)| match value.as_number() {
            Some(n) if n.fract() == 0.0 && n >= 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
            _ => Err(EngineError::InvalidGroupId {
                row,
                value: value.display_value(),
            }),
        })
        .collect()
}

struct SummaryCalculator<'a> {
    definition: &'a SummaryDefinition,
    table: &'a Table,
    layout: SummaryLayout,
    group_ids: Vec<u32>,
    years: Vec<Option<i32>>,
}

impl<'a> SummaryCalculator<'a> {
    fn new(definition: &'a SummaryDefinition, table: &'a Table) -> EngineResult<Self> {
        let layout = definition.resolve(table)?;
        let group_ids = read_group_ids(table, layout.group_col)?;
        let years = table
            .column_values(layout.year_col)
            .map(CellValue::as_year)
            .collect();

        Ok(SummaryCalculator {
            definition,
            table,
            layout,
            group_ids,
            years,
        })
    }

    /// Row indices ordered by (group, year), missing years last.
    fn row_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.table.len()).collect();
        order.sort_by_key(|&row| {
            let year = self.years[row];
            (self.group_ids[row], year.is_none(), year)
        });
        order
    }

    fn calculate(&self) -> SummaryView {
        let latest_year = self.years.iter().flatten().copied().max();
        let window =
            latest_year.map(|y| TrailingWindow::ending_at(y, self.definition.window_years));
        debug!(
            "summary: {} rows, latest year {:?}, window {:?}",
            self.table.len(),
            latest_year,
            window
        );

        let pivot_names: Vec<String> = self
            .layout
            .pivot_fields
            .iter()
            .map(|&idx| self.table.columns[idx].clone())
            .collect();
        let mut wide = WideTableBuilder::new(pivot_names);
        let mut groups: BTreeMap<u32, GroupAccumulator> = BTreeMap::new();

        for row in self.row_order() {
            let group = self.group_ids[row];
            let year = self.years[row];
            let cells = &self.table.rows[row];

            let acc = groups
                .entry(group)
                .or_insert_with(|| GroupAccumulator::new(self.layout.static_fields.len()));

            for (slot, &col) in self.layout.static_fields.iter().enumerate() {
                if !cells[col].is_empty() {
                    acc.last_values[slot] = cells[col].clone();
                }
            }
            acc.latest_year = acc.latest_year.max(year);
            if let Some(amount) = cells[self.layout.total_col].as_number() {
                acc.total += amount;
            }

            if let (Some(window), Some(year)) = (window, year) {
                if window.contains(year) {
                    for (field, &col) in self.layout.pivot_fields.iter().enumerate() {
                        wide.add(group, field, year, cells[col].as_number());
                    }
                }
            }
        }

        let pivot_columns = if wide.is_empty() { Vec::new() } else { wide.columns() };

        let mut columns = vec![self.definition.group_id_column.clone()];
        columns.extend(
            self.layout
                .static_fields
                .iter()
                .map(|&idx| self.table.columns[idx].clone()),
        );
        columns.push(self.definition.latest_year_column.clone());
        columns.push(self.definition.total_column.clone());
        columns.extend(pivot_columns.iter().map(|c| c.name.clone()));

        let mut table = Table::new(columns);
        for (group, acc) in groups {
            let mut row = Vec::with_capacity(table.columns.len());
            row.push(CellValue::Number(group as f64));
            row.extend(acc.last_values);
            row.push(acc.latest_year.map_or(CellValue::Empty, |y| CellValue::Number(y as f64)));
            row.push(CellValue::Number(acc.total));
            row.extend(wide.row(group, &pivot_columns));
            table.push_row(row);
        }
        debug!(
            "summary: {} groups, {} pivot columns",
            table.len(),
            pivot_columns.len()
        );

        SummaryView {
            table,
            latest_year,
            window,
            report: None,
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Summarises a table that already carries a group-id column.
pub fn summarize_grouped(
    grouped: &Table,
    definition: &SummaryDefinition,
) -> EngineResult<SummaryView> {
    Ok(SummaryCalculator::new(definition, grouped)?.calculate())
}

/// Builds the summary view straight from raw records: deduplicates and
/// groups them first, then summarises the grouped rows.
pub fn build_summary(table: &Table, schema: &ColumnSchema) -> EngineResult<SummaryView> {
    let detailed = build_groups(table, schema)?;
    let mut view = summarize_grouped(&detailed.table, &SummaryDefinition::from(schema))?;
    view.report = Some(detailed.report);
    Ok(view)
}
