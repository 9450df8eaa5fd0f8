use super::traits::ConfigSection;
use crate::error::LegforgeError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Members in the bootstrap generation.
    pub population_size: usize,
    pub num_generations: usize,
    /// Independent optimisation runs, each with a fresh population.
    pub runs: usize,
    /// Fraction of healthy members the bootstrap generation must reach.
    pub viability_threshold: f64,
    pub max_bootstrap_retries: usize,
    /// Age assigned at birth. Negative values give newborns a grace period before culling.
    pub newborn_age: i32,
    /// Evaluate members on the rayon pool.
    pub parallel: bool,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_generations: 150,
            runs: 1,
            viability_threshold: 0.66,
            max_bootstrap_retries: 200,
            newborn_age: -3,
            parallel: true,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), LegforgeError> {
        if self.population_size < 2 {
            return Err(LegforgeError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if self.runs == 0 {
            return Err(LegforgeError::Configuration(
                "At least one run is required".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.viability_threshold) {
            return Err(LegforgeError::Configuration(
                "Viability threshold must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let config = EvolutionConfig {
            viability_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
