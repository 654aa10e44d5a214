//! Species table cleaning and derived flags

use anyhow::{Context, Result};
use polars::prelude::*;

/// Replace missing conservation status with `label`
///
/// Null and empty-string cells both count as missing, so a later group-by on
/// status puts every row in exactly one bucket.
pub fn fill_missing_status(species: &DataFrame, label: &str) -> Result<DataFrame> {
    let status = col("conservation_status");

    species
        .clone()
        .lazy()
        .with_column(
            when(status.clone().is_null().or(status.clone().eq(lit(""))))
                .then(lit(label))
                .otherwise(status)
                .alias("conservation_status"),
        )
        .collect()
        .with_context(|| "Failed to fill missing conservation status")
}

/// Add `is_protected` and `is_sheep` columns to a cleaned species table
///
/// * `is_protected` - status differs from `no_intervention_label`
/// * `is_sheep` - `common_names` contains `sheep_term` (case-sensitive)
pub fn tag_species(
    species: &DataFrame,
    no_intervention_label: &str,
    sheep_term: &str,
) -> Result<DataFrame> {
    species
        .clone()
        .lazy()
        .with_columns([
            col("conservation_status")
                .neq(lit(no_intervention_label))
                .fill_null(lit(false))
                .alias("is_protected"),
            col("common_names")
                .str()
                .contains_literal(lit(sheep_term))
                .fill_null(lit(false))
                .alias("is_sheep"),
        ])
        .collect()
        .with_context(|| "Failed to derive species flags")
}
