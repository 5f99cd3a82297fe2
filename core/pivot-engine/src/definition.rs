//! FILENAME: core/pivot-engine/src/definition.rs
//! Summary Definition - what the summary view IS.
//!
//! This module contains the types that DESCRIBE a summary:
//! - which columns are pivoted by year, dropped, or carried as static values
//! - the trailing window of fiscal years covered by the pivot
//!
//! `SummaryDefinition::resolve` binds a definition to the header of a
//! concrete grouped table and produces a `SummaryLayout` of column indices.

use serde::{Deserialize, Serialize};
use engine::{ColumnSchema, EngineResult, Table};

/// Index into the source table columns (0-based).
pub type FieldIndex = usize;

// ============================================================================
// TRAILING WINDOW
// ============================================================================

/// Inclusive range of fiscal years covered by the pivot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailingWindow {
    pub first_year: i32,
    pub last_year: i32,
}

impl TrailingWindow {
    /// The `len` years ending at `last_year`. A zero length is treated as one year.
    /// Lengths reaching past `i32::MIN` are clamped, so `first_year <= last_year`.
    pub fn ending_at(last_year: i32, len: u32) -> Self {
        let span = i32::try_from(len.max(1) - 1).unwrap_or(i32::MAX);
        TrailingWindow {
            first_year: last_year.saturating_sub(span),
            last_year,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.first_year && year <= self.last_year
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.first_year..=self.last_year
    }
}

// ============================================================================
// DEFINITION
// ============================================================================

/// Column roles and options for one summary calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDefinition {
    /// Group-id column produced by the linkage step.
    pub group_id_column: String,
    pub fiscal_year: String,
    /// Summed over all years into `total_column`.
    pub total_budget: String,
    /// Budget fields spread into `"<field> <year>"` columns.
    pub pivot_fields: Vec<String>,
    /// Budget fields left out of the summary entirely.
    pub excluded_fields: Vec<String>,
    pub latest_year_column: String,
    pub total_column: String,
    pub window_years: u32,
}

impl From<&ColumnSchema> for SummaryDefinition {
    fn from(schema: &ColumnSchema) -> Self {
        SummaryDefinition {
            group_id_column: schema.group_id_column.clone(),
            fiscal_year: schema.fiscal_year.clone(),
            total_budget: schema.total_budget.clone(),
            pivot_fields: schema.pivot_fields.clone(),
            excluded_fields: schema.excluded_fields.clone(),
            latest_year_column: schema.latest_year_column.clone(),
            total_column: schema.total_column.clone(),
            window_years: schema.window_years,
        }
    }
}

impl Default for SummaryDefinition {
    fn default() -> Self {
        SummaryDefinition::from(&ColumnSchema::default())
    }
}

/// What a source column contributes to the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    GroupId,
    FiscalYear,
    /// Position in the definition's pivot field list.
    Pivot(usize),
    Excluded,
    Static,
}

impl SummaryDefinition {
    /// Classifies a column by name.
    pub fn role_of(&self, column: &str) -> FieldRole {
        if column == self.group_id_column {
            FieldRole::GroupId
        } else if column == self.fiscal_year {
            FieldRole::FiscalYear
        } else if let Some(pos) = self.pivot_fields.iter().position(|f| f == column) {
            FieldRole::Pivot(pos)
        } else if self.excluded_fields.iter().any(|f| f == column) {
            FieldRole::Excluded
        } else {
            FieldRole::Static
        }
    }

    /// Binds the definition to a table header.
    pub fn resolve(&self, table: &Table) -> EngineResult<SummaryLayout> {
        let group_col = table.require_column(&self.group_id_column, "group id")?;
        let year_col = table.require_column(&self.fiscal_year, "fiscal year")?;
        let total_col = table.require_column(&self.total_budget, "total budget")?;

        let mut static_fields = Vec::new();
        let mut pivot_fields: Vec<(usize, FieldIndex)> = Vec::new();
        for (idx, name) in table.columns.iter().enumerate() {
            match self.role_of(name) {
                FieldRole::Static => static_fields.push(idx),
                FieldRole::Pivot(pos) => pivot_fields.push((pos, idx)),
                FieldRole::GroupId | FieldRole::FiscalYear | FieldRole::Excluded => {}
            }
        }
        // Designated order, not sheet order; absent pivot fields are skipped
        pivot_fields.sort_by_key(|(pos, _)| *pos);

        Ok(SummaryLayout {
            group_col,
            year_col,
            total_col,
            static_fields,
            pivot_fields: pivot_fields.into_iter().map(|(_, idx)| idx).collect(),
        })
    }
}

/// Column indices of a definition bound to one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLayout {
    pub group_col: FieldIndex,
    pub year_col: FieldIndex,
    pub total_col: FieldIndex,
    /// Columns represented by their last value, in sheet order.
    pub static_fields: Vec<FieldIndex>,
    /// Pivoted columns present in the table, in designated order.
    pub pivot_fields: Vec<FieldIndex>,
}
