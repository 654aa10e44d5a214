//! Dataset overview figures printed before the analysis proper

use crate::aggregate::distinct_count;
use anyhow::Result;
use polars::prelude::*;

/// Shape of the species table
#[derive(Debug, Clone)]
pub struct SpeciesOverview {
    pub rows: usize,
    pub distinct_species: usize,
    /// Categories in first-seen order
    pub categories: Vec<String>,
    /// Statuses in first-seen order; `None` is a missing status
    pub statuses: Vec<Option<String>>,
}

/// Shape of the observations table
#[derive(Debug, Clone)]
pub struct ObservationOverview {
    pub rows: usize,
    pub distinct_species: usize,
    pub parks: usize,
}

impl SpeciesOverview {
    pub fn from_frame(species: &DataFrame) -> Result<Self> {
        Ok(Self {
            rows: species.height(),
            distinct_species: distinct_count(species, "scientific_name")?,
            categories: unique_in_order(species, "category")?
                .into_iter()
                .flatten()
                .collect(),
            statuses: unique_in_order(species, "conservation_status")?,
        })
    }
}

impl ObservationOverview {
    pub fn from_frame(observations: &DataFrame) -> Result<Self> {
        Ok(Self {
            rows: observations.height(),
            distinct_species: distinct_count(observations, "scientific_name")?,
            parks: distinct_count(observations, "park_name")?,
        })
    }
}

fn unique_in_order(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let unique = df.column(column)?.as_materialized_series().unique_stable()?;
    Ok(unique
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_overview() {
        let species = df![
            "category" => &["Mammal", "Bird", "Mammal"],
            "scientific_name" => &["Canis lupus", "Sitta carolinensis", "Canis lupus"],
            "common_names" => &["Gray Wolf", "Nuthatch", "Wolf"],
            "conservation_status" => &[Some("Endangered"), None, Some("Endangered")],
        ].unwrap();

        let overview = SpeciesOverview::from_frame(&species).unwrap();

        assert_eq!(overview.rows, 3);
        assert_eq!(overview.distinct_species, 2);
        assert_eq!(overview.categories, vec!["Mammal", "Bird"]);
        assert_eq!(overview.statuses, vec![Some("Endangered".to_string()), None]);
    }

    #[test]
    fn test_observation_overview() {
        let observations = df![
            "scientific_name" => &["a", "a", "b"],
            "park_name" => &["Bryce National Park", "Yosemite National Park", "Bryce National Park"],
            "observations" => &[1i64, 2, 3],
        ].unwrap();

        let overview = ObservationOverview::from_frame(&observations).unwrap();

        assert_eq!(overview.rows, 3);
        assert_eq!(overview.distinct_species, 2);
        assert_eq!(overview.parks, 2);
    }
}
