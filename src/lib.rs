//! National parks biodiversity analysis
//!
//! Loads species metadata and park observation counts with Polars, then:
//! - `cleaning/`: fills missing conservation status, derives protection and sheep flags
//! - `aggregate/`: distinct-species counts and park totals
//! - `pivot/`: per-category protection table
//! - `stats/`: chi-squared independence tests on 2x2 tables
//! - `sheep/`: sheep species selection and observation join
//! - `charts/` and `report/`: PNG bar charts and console tables
//! - `sample_size/`: weeks of observation needed for a field study
//!
//! `pipeline::run` executes the stages in order.

pub mod error;
pub mod config;
pub mod utils;
pub mod data;
pub mod cleaning;
pub mod aggregate;
pub mod pivot;
pub mod stats;
pub mod sheep;
pub mod summary;
pub mod sample_size;
pub mod charts;
pub mod report;
pub mod pipeline;

// Re-export commonly used types
pub use error::AnalysisError;
pub use config::{AnalysisConfig, NO_INTERVENTION};
pub use data::SurveyData;
pub use pivot::{CategoryPivot, CategoryProtection};
pub use stats::{ChiSquaredTest, ContingencyTable};
pub use sample_size::SampleSizePlan;
pub use pipeline::{run, AnalysisReport, ParkWeeks, Significance};
