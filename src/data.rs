//! Data Loading
//!
//! Loads the species metadata and park observation tables with Polars and
//! validates the columns the analysis depends on.

use crate::error::AnalysisError;
use crate::utils::{cast_to_string, select_required_columns};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

pub const SPECIES_COLUMNS: [&str; 4] = [
    "category",
    "scientific_name",
    "common_names",
    "conservation_status",
];

pub const OBSERVATION_COLUMNS: [&str; 3] = ["scientific_name", "park_name", "observations"];

/// Both survey tables, as loaded
pub struct SurveyData {
    /// One row per (species, common name) entry; status may be null
    pub species: DataFrame,

    /// Sightings per species per park over one week
    pub observations: DataFrame,
}

impl SurveyData {
    /// Load both tables. Either file missing aborts the run.
    pub fn load(species_path: &Path, observations_path: &Path) -> Result<Self> {
        let species = Self::load_species(species_path)?;
        let observations = Self::load_observations(observations_path)?;

        tracing::info!(
            "Loaded survey data: {} species rows, {} observation rows",
            species.height(),
            observations.height()
        );

        Ok(SurveyData {
            species,
            observations,
        })
    }

    /// Load species metadata from CSV
    ///
    /// All four columns are read as text; `conservation_status` keeps its nulls
    /// for the cleaning step.
    pub fn load_species(path: &Path) -> Result<DataFrame> {
        let raw = read_csv(path, "species")?;
        let df = select_required_columns(&raw, &SPECIES_COLUMNS, "species")?;
        cast_to_string(df, &SPECIES_COLUMNS, "species")
    }

    /// Load observation counts from CSV
    ///
    /// `observations` must be a null-free, non-negative integer column; it is
    /// normalized to Int64. A header-only file is a valid empty table.
    pub fn load_observations(path: &Path) -> Result<DataFrame> {
        let raw = read_csv(path, "observations")?;
        let df = select_required_columns(&raw, &OBSERVATION_COLUMNS, "observations")?;
        let mut df = cast_to_string(df, &["scientific_name", "park_name"], "observations")?;

        let counts = df.column("observations")?;
        if df.height() == 0 {
            // No rows to infer from, so the reader falls back to String
            tracing::warn!("Observations table {:?} has no rows", path);
            let counts = counts.cast(&DataType::Int64)?;
            df.with_column(counts)?;
            return Ok(df);
        }
        if !counts.dtype().is_integer() {
            return Err(AnalysisError::schema(
                "observations",
                "observations",
                format!("must be an integer count, found {}", counts.dtype()),
            )
            .into());
        }
        if counts.null_count() > 0 {
            return Err(AnalysisError::schema(
                "observations",
                "observations",
                format!("has {} missing values", counts.null_count()),
            )
            .into());
        }

        let counts = counts.cast(&DataType::Int64)?;
        if let Some(min) = counts.i64()?.min() {
            if min < 0 {
                return Err(AnalysisError::schema(
                    "observations",
                    "observations",
                    format!("must be non-negative, found {}", min),
                )
                .into());
            }
        }
        df.with_column(counts)?;

        Ok(df)
    }
}

fn read_csv(path: &Path, table: &str) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(AnalysisError::MissingInput {
            path: path.to_path_buf(),
        }
        .into());
    }

    tracing::debug!("Reading {} table from {:?}", table, path);

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None) // Scan entire file
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load {} CSV: {:?}", table, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_species_keeps_missing_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "species.csv",
            "category,scientific_name,common_names,conservation_status\n\
             Mammal,Ovis canadensis,Bighorn Sheep,Species of Concern\n\
             Bird,Sitta carolinensis,White-Breasted Nuthatch,\n",
        );

        let df = SurveyData::load_species(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("conservation_status").unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let err = SurveyData::load_species(Path::new("no/such/species.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "obs.csv",
            "scientific_name,observations\nOvis canadensis,10\n",
        );

        let err = SurveyData::load_observations(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Schema { column, .. }) if column == "park_name"
        ));
    }

    #[test]
    fn test_non_integer_observations_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "obs.csv",
            "scientific_name,park_name,observations\nOvis canadensis,Bryce National Park,lots\n",
        );

        let err = SurveyData::load_observations(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Schema { .. })
        ));
    }

    #[test]
    fn test_negative_observations_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "obs.csv",
            "scientific_name,park_name,observations\nOvis canadensis,Bryce National Park,-3\n",
        );

        assert!(SurveyData::load_observations(&path).is_err());
    }

    #[test]
    fn test_header_only_observations_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "obs.csv", "scientific_name,park_name,observations\n");

        let df = SurveyData::load_observations(&path).unwrap();

        assert_eq!(df.height(), 0);
        assert_eq!(df.column("observations").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("park_name").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_load_observations() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "obs.csv",
            "scientific_name,park_name,observations\n\
             Ovis canadensis,Bryce National Park,10\n\
             Ovis canadensis,Yellowstone National Park,20\n",
        );

        let df = SurveyData::load_observations(&path).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("observations").unwrap().dtype(), &DataType::Int64);
    }
}
