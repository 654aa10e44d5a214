//! Column projection helpers with schema validation
//!
//! Input tables are checked up front so a missing column surfaces as a
//! `Schema` error naming the table, not as a polars error deep in a query.

use crate::error::AnalysisError;
use anyhow::{Context, Result};
use polars::prelude::*;

/// Project `df` onto `columns`, failing with a schema error if any is absent
///
/// # Arguments
/// * `df` - Loaded table
/// * `columns` - Required column names, in output order
/// * `table` - Table name for error messages (e.g., "species")
///
/// # Example
/// ```rust,ignore
/// let df = select_required_columns(&raw, &["scientific_name", "park_name"], "observations")?;
/// ```
pub fn select_required_columns(
    df: &DataFrame,
    columns: &[&str],
    table: &str,
) -> Result<DataFrame> {
    let available: Vec<String> = df.get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !available.iter().any(|name| name == expected) {
            return Err(AnalysisError::schema(
                table,
                expected,
                format!("is missing. Available columns: {:?}", available),
            )
            .into());
        }
    }

    df.select(columns.iter().copied())
        .with_context(|| format!("{}: Failed to select columns {:?}", table, columns))
}

/// Cast the named columns to String, leaving the rest untouched
pub fn cast_to_string(df: DataFrame, columns: &[&str], table: &str) -> Result<DataFrame> {
    let casts: Vec<Expr> = columns.iter()
        .map(|&name| col(name).cast(DataType::String))
        .collect();

    df.lazy()
        .with_columns(casts)
        .collect()
        .with_context(|| format!("{}: Failed to cast {:?} to text", table, columns))
}
