//! Sheep species selection and observation join

use anyhow::{Context, Result};
use polars::prelude::*;

/// Every row flagged `is_sheep`, whatever its category
///
/// Useful to see how many plants carry "Sheep" in a common name.
pub fn sheep_rows(tagged: &DataFrame) -> Result<DataFrame> {
    tagged
        .clone()
        .lazy()
        .filter(col("is_sheep"))
        .collect()
        .with_context(|| "Failed to select sheep-named rows")
}

/// Sheep-named rows restricted to `category` (normally "Mammal")
///
/// Applying this to its own output returns the same rows. No match gives an
/// empty frame, not an error.
pub fn select_sheep_species(tagged: &DataFrame, category: &str) -> Result<DataFrame> {
    tagged
        .clone()
        .lazy()
        .filter(col("is_sheep").and(col("category").eq(lit(category))))
        .collect()
        .with_context(|| format!("Failed to select sheep species in category '{}'", category))
}

/// Inner join of sheep species with observations on `scientific_name`
///
/// One output row per matching observation row, i.e. per (species, park).
pub fn join_observations(sheep_species: &DataFrame, observations: &DataFrame) -> Result<DataFrame> {
    let joined = sheep_species
        .clone()
        .lazy()
        .inner_join(
            observations.clone().lazy(),
            col("scientific_name"),
            col("scientific_name"),
        )
        .collect()
        .with_context(|| "Failed to join sheep species with observations")?;

    if joined.height() == 0 {
        tracing::warn!("No observations matched the sheep species");
    }

    Ok(joined)
}
