//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the project lineage engine.
//! CONTEXT: Re-exports the table model, the column schema and the linkage
//! (detailed view) operation for use by the other crates.

pub mod cell;
pub mod disjoint_set;
pub mod error;
pub mod linkage;
pub mod schema;
pub mod table;

// Re-export commonly used types at the crate root
pub use cell::{CellError, CellValue};
pub use disjoint_set::DisjointSet;
pub use error::{EngineError, EngineResult};
pub use linkage::{
    assign_groups, build_groups, deduplicate, deduplicate_table, DetailedView, GroupAssignment,
    LinkageReport,
};
pub use schema::{ColumnSchema, DEFAULT_WINDOW_YEARS, GROUP_ID_COLUMN};
pub use table::Table;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_the_two_row_lineage() {
        let mut table = Table::new([
            "project_id",
            "sub_task_id",
            "prev_project_ids",
            "fiscal_year",
            "total_funding",
        ]);
        table.push_row(vec![
            "P1".into(),
            "S1".into(),
            CellValue::Empty,
            2020i64.into(),
            100.0.into(),
        ]);
        table.push_row(vec![
            "P2".into(),
            "S2".into(),
            "P1".into(),
            2021i64.into(),
            200.0.into(),
        ]);

        let view = build_groups(&table, &ColumnSchema::default()).unwrap();
        assert_eq!(view.group_ids, vec![0, 0]);
        assert_eq!(view.table.columns[0], GROUP_ID_COLUMN);
        assert_eq!(view.report.group_count, 1);
    }

    #[test]
    fn it_reports_missing_columns() {
        let table = Table::new(["project_id", "fiscal_year"]);
        let err = build_groups(&table, &ColumnSchema::default()).unwrap_err();
        assert!(matches!(err, EngineError::Schema { ref column, .. } if column == "sub_task_id"));
    }
}
