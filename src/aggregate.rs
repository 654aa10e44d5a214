//! Group-wise aggregation
//!
//! Species counts always use distinct `scientific_name` values: a species can
//! occupy several rows (one per common-name entry) and must be counted once.

use anyhow::{Context, Result};
use polars::prelude::*;

/// Distinct species per conservation status, smallest bucket first
///
/// Rows with a null status are excluded, so run this after
/// `fill_missing_status` to cover every species.
pub fn species_per_status(species: &DataFrame) -> Result<DataFrame> {
    species
        .clone()
        .lazy()
        .filter(col("conservation_status").is_not_null())
        .group_by([col("conservation_status")])
        .agg([distinct_species().alias("species")])
        .sort(["species", "conservation_status"], Default::default())
        .collect()
        .with_context(|| "Failed to count species per conservation status")
}

/// Distinct species per (category, is_protected), long format
///
/// Only combinations present in the data appear; the pivot fills the gaps.
/// Rows without a category cannot be placed in any row of the pivot and are
/// dropped.
pub fn species_per_category_protection(tagged: &DataFrame) -> Result<DataFrame> {
    let missing = tagged.column("category")?.null_count();
    if missing > 0 {
        tracing::warn!("Dropping {} species rows with no category", missing);
    }

    tagged
        .clone()
        .lazy()
        .filter(col("category").is_not_null())
        .group_by([col("category"), col("is_protected")])
        .agg([distinct_species().alias("species")])
        .sort(["category", "is_protected"], Default::default())
        .collect()
        .with_context(|| "Failed to count species per category and protection")
}

/// Total observations per park, sorted by park name
pub fn observations_by_park(observations: &DataFrame) -> Result<DataFrame> {
    observations
        .clone()
        .lazy()
        .group_by([col("park_name")])
        .agg([col("observations").sum().cast(DataType::Int64).alias("observations")])
        .sort(["park_name"], Default::default())
        .collect()
        .with_context(|| "Failed to sum observations per park")
}

/// Weekly total for one park; `None` when the park has no rows
pub fn park_total(park_totals: &DataFrame, park: &str) -> Result<Option<i64>> {
    let names = park_totals.column("park_name")?.str()?;
    let totals = park_totals.column("observations")?.i64()?;

    Ok(names
        .into_iter()
        .zip(totals.into_iter())
        .find(|(name, _)| *name == Some(park))
        .and_then(|(_, total)| total))
}

/// Number of distinct non-null values in `column`
pub fn distinct_count(df: &DataFrame, column: &str) -> Result<usize> {
    let series = df
        .column(column)
        .with_context(|| format!("Column '{}' not found", column))?
        .as_materialized_series()
        .drop_nulls();

    Ok(series.n_unique()?)
}

fn distinct_species() -> Expr {
    col("scientific_name")
        .drop_nulls()
        .n_unique()
        .cast(DataType::Int64)
}
