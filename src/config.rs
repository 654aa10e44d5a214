//! Analysis configuration
//!
//! Every field has a default, so `AnalysisConfig::default()` is the fixed
//! biodiversity analysis. An optional JSON file can override any subset of
//! fields (missing keys fall back to the defaults).

use crate::error::AnalysisError;
use crate::sample_size::SampleSizePlan;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "biodiversity_config.json";

/// Label used for species without a conservation status
pub const NO_INTERVENTION: &str = "No Intervention";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub species_path: PathBuf,
    pub observations_path: PathBuf,
    pub output_dir: PathBuf,
    pub status_chart_file: String,
    pub sheep_chart_file: String,

    /// Fill value for missing conservation status
    pub no_intervention_label: String,

    /// Case-sensitive substring searched in `common_names`
    pub sheep_term: String,
    pub sheep_category: String,

    /// Category pairs compared with a chi-squared test, in run order
    pub comparisons: Vec<(String, String)>,

    /// Baseline park and treatment park for the sample-size step
    pub baseline_park: String,
    pub treatment_park: String,

    pub sample_size: SampleSizePlan,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            species_path: PathBuf::from("species_info.csv"),
            observations_path: PathBuf::from("observations.csv"),
            output_dir: PathBuf::from("."),
            status_chart_file: "Conservation_Status.png".to_string(),
            sheep_chart_file: "ObsSheepPerWeek.png".to_string(),
            no_intervention_label: NO_INTERVENTION.to_string(),
            sheep_term: "Sheep".to_string(),
            sheep_category: "Mammal".to_string(),
            comparisons: vec![
                ("Mammal".to_string(), "Bird".to_string()),
                ("Reptile".to_string(), "Mammal".to_string()),
            ],
            baseline_park: "Bryce National Park".to_string(),
            treatment_park: "Yellowstone National Park".to_string(),
            sample_size: SampleSizePlan::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let contents = fs::read_to_string(path).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `path` if it exists, otherwise use the defaults
    pub fn load_or_default(path: &Path) -> Result<Self, AnalysisError> {
        if path.exists() {
            tracing::info!("Loading analysis config: {:?}", path);
            Self::load(path)
        } else {
            tracing::debug!("No config at {:?} - using defaults", path);
            Ok(Self::default())
        }
    }

    pub fn status_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.status_chart_file)
    }

    pub fn sheep_chart_path(&self) -> PathBuf {
        self.output_dir.join(&self.sheep_chart_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixed_analysis() {
        let config = AnalysisConfig::default();
        assert_eq!(config.no_intervention_label, "No Intervention");
        assert_eq!(config.comparisons.len(), 2);
        assert_eq!(config.comparisons[0], ("Mammal".to_string(), "Bird".to_string()));
        assert_eq!(config.sample_size.required_sample_size, 510.0);
        assert_eq!(config.status_chart_path(), PathBuf::from("./Conservation_Status.png"));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "output_dir": "charts", "sheep_term": "Goat" }}"#).unwrap();

        let config = AnalysisConfig::load(file.path()).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.sheep_term, "Goat");
        assert_eq!(config.sheep_category, "Mammal");
        assert_eq!(config.baseline_park, "Bryce National Park");
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = AnalysisConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AnalysisConfig::load_or_default(Path::new("does/not/exist.json")).unwrap();
        assert_eq!(config.sheep_term, "Sheep");
    }
}
