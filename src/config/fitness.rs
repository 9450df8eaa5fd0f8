use super::traits::ConfigSection;
use crate::error::LegforgeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Minimum acceptable safety factor.
    pub design_factor: f64,
    /// Safety factors above `design_factor * upper_band_factor` mark a component over-designed.
    pub upper_band_factor: f64,
    /// Shaping target as a multiple of the design factor.
    pub target_ratio: f64,
    /// Fitness awarded per stress at the top of the shaping curve.
    pub max_score: f64,
    /// Safety factor recorded for a zero stress.
    pub infinite_safety_factor: f64,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            design_factor: 1.75,
            upper_band_factor: 5.0,
            target_ratio: 1.10,
            max_score: 100.0,
            infinite_safety_factor: 10_000.0,
        }
    }
}

impl FitnessConfig {
    pub fn target(&self) -> f64 {
        self.target_ratio * self.design_factor
    }

    pub fn upper_bound(&self) -> f64 {
        self.upper_band_factor * self.design_factor
    }
}

impl ConfigSection for FitnessConfig {
    fn section_name() -> &'static str {
        "fitness"
    }

    fn validate(&self) -> Result<(), LegforgeError> {
        if self.design_factor < 1.0 {
            return Err(LegforgeError::Configuration(
                "Design factor must be at least 1".to_string()
            ));
        }
        // The shaping curve divides by (target - 1).
        if self.target() <= 1.0 {
            return Err(LegforgeError::Configuration(
                "Shaping target must exceed 1".to_string()
            ));
        }
        if self.upper_band_factor < 1.0 {
            return Err(LegforgeError::Configuration(
                "Upper band factor must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
