//! FILENAME: core/pivot-engine/src/lib.rs
//! Summary subsystem for project lineage exports.
//!
//! This crate reshapes the grouped records produced by `engine` into one row
//! per project group. It depends on `engine` for the table model, the column
//! schema and the linkage step.
//!
//! Layers:
//! - `definition`: Column roles and the trailing year window (what the summary IS)
//! - `wide`: Wide-table builder for the year-pivoted budget columns
//! - `engine`: Aggregation and assembly (HOW we calculate)

pub mod definition;
pub mod engine;
pub mod wide;

pub use definition::*;
pub use crate::engine::{build_summary, summarize_grouped, SummaryView};
pub use wide::{WideColumn, WideRow, WideTableBuilder};
