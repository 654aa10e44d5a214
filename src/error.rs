//! Error taxonomy for the survey analysis
//!
//! Fatal input problems (missing files, bad columns) abort the run. Chart
//! failures and degenerate contingency tables are step-local: the pipeline
//! records them and keeps going.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    /// A required input file is absent or unreadable.
    #[error("Input file not found: {path:?}")]
    MissingInput { path: PathBuf },

    /// An expected column is absent or has the wrong type.
    #[error("Schema error in {table}: column '{column}' {reason}")]
    Schema {
        table: String,
        column: String,
        reason: String,
    },

    /// A category requested for the contingency table is not in the pivot.
    #[error("Category '{category}' not found in pivot. Available: {available:?}")]
    UnknownCategory {
        category: String,
        available: Vec<String>,
    },

    /// The 2x2 table has a zero row or column total.
    #[error("Contingency table {rows:?} has a zero marginal total; expected frequencies undefined")]
    DegenerateTable { rows: [String; 2] },

    /// A chart could not be rendered or written.
    #[error("Failed to write chart {path:?}: {message}")]
    ImageWrite { path: PathBuf, message: String },

    /// The optional configuration file is unreadable or invalid.
    #[error("Invalid configuration in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl AnalysisError {
    pub fn schema(table: &str, column: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Schema {
            table: table.to_string(),
            column: column.to_string(),
            reason: reason.into(),
        }
    }
}
