//! Sample-size arithmetic for the foot-and-mouth field experiment
//!
//! The required sample size comes from an external calculator and is kept as
//! a named input. Nothing here recomputes it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SampleSizePlan {
    /// Disease rate at the baseline park (fraction)
    pub baseline_rate: f64,
    /// Smallest absolute reduction worth detecting (fraction)
    pub min_detectable_effect: f64,
    /// Sheep to observe per park, precomputed externally
    pub required_sample_size: f64,
}

impl Default for SampleSizePlan {
    fn default() -> Self {
        Self {
            baseline_rate: 0.15,
            min_detectable_effect: 0.05,
            required_sample_size: 510.0,
        }
    }
}

impl SampleSizePlan {
    /// Minimum detectable effect as a percent of the baseline rate
    ///
    /// This is the number entered into the external calculator.
    pub fn relative_mde_percent(&self) -> f64 {
        100.0 * self.min_detectable_effect / self.baseline_rate
    }

    /// Weeks needed at `weekly_count` sightings per week; `None` for 0
    pub fn weeks_to_observe(&self, weekly_count: i64) -> Option<f64> {
        if weekly_count <= 0 {
            return None;
        }
        Some(self.required_sample_size / weekly_count as f64)
    }
}
