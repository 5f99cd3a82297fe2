//! FILENAME: core/persistence/src/lib.rs
//! Persistence Module
//!
//! Reads project exports from XLSX into a `Table` and writes the detailed
//! and summary views back out as XLSX or JSON. Tables pass through
//! unchanged; all processing lives in `engine` and `pivot-engine`.

mod error;
mod json_writer;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use json_writer::{save_json, table_to_json, JsonRecords};
pub use xlsx_reader::{load_table, load_table_from_bytes};
pub use xlsx_writer::{save_table, save_tables, tables_to_xlsx_bytes};

/// Sheet name used for the detailed view.
pub const DETAILED_SHEET_NAME: &str = "detailed_view";

/// Sheet name used for the summary view.
pub const SUMMARY_SHEET_NAME: &str = "summary_view";
