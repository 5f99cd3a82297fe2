//! FILENAME: core/engine/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A column the operation needs is not present in the input table.
    #[error("Schema error: required {role} column '{column}' is missing")]
    Schema { column: String, role: &'static str },

    #[error("Invalid group id at row {row}: {value}")]
    InvalidGroupId { row: usize, value: String },
}

impl EngineError {
    pub fn missing_column(column: &str, role: &'static str) -> Self {
        EngineError::Schema {
            column: column.to_string(),
            role,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
