use thiserror::Error;

#[derive(Error, Debug)]
pub enum LegforgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Missing data: {0}")]
    MissingData(String),

    // Structural invariants. These abort the run.
    #[error("Value {value} cannot be encoded in {bits} bits")]
    EncodeOverflow { value: u32, bits: usize },

    #[error("Genome length error in {component}: expected {expected} bits, got {actual}")]
    GenomeLength {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("Genome crossover length mismatch in {component}: {left} bits vs {right} bits")]
    GenomeLengthMismatch {
        component: String,
        left: usize,
        right: usize,
    },

    #[error("Chromosome segment count error in {component}: expected {expected}, got {actual}")]
    ChromosomeCount {
        component: String,
        expected: usize,
        actual: usize,
    },

    #[error("Component count error: expected {expected}, got {actual}")]
    ComponentCount { expected: usize, actual: usize },

    #[error("Unknown design variable '{name}' for {component}")]
    UnknownVariable { component: String, name: String },

    #[error("Chance list length {chances} does not match genome length {genome}")]
    ChanceLength { chances: usize, genome: usize },

    #[error("Genetic operator applied to an empty genome")]
    EmptyGenome,

    // Resource exhaustion. A designed stop condition rather than a crash.
    #[error("Dead population at generation {generation}: {population_size} members, total fitness {total_fitness}")]
    DeadPopulation {
        generation: usize,
        population_size: usize,
        total_fitness: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl LegforgeError {
    /// True for the logic/configuration defects that must halt the run loudly.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            LegforgeError::EncodeOverflow { .. }
                | LegforgeError::GenomeLength { .. }
                | LegforgeError::GenomeLengthMismatch { .. }
                | LegforgeError::ChromosomeCount { .. }
                | LegforgeError::ComponentCount { .. }
                | LegforgeError::UnknownVariable { .. }
                | LegforgeError::ChanceLength { .. }
                | LegforgeError::EmptyGenome
        )
    }

    pub fn is_dead_population(&self) -> bool {
        matches!(self, LegforgeError::DeadPopulation { .. })
    }
}

pub type Result<T> = std::result::Result<T, LegforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        let structural = LegforgeError::GenomeLengthMismatch {
            component: "HipFlexCylinder".to_string(),
            left: 24,
            right: 18,
        };
        assert!(structural.is_structural());
        assert!(!structural.is_dead_population());
        assert!(structural.to_string().contains("24 bits vs 18 bits"));

        let dead = LegforgeError::DeadPopulation {
            generation: 3,
            population_size: 0,
            total_fitness: 0.0,
        };
        assert!(dead.is_dead_population());
        assert!(!dead.is_structural());

        assert!(!LegforgeError::Configuration("x".to_string()).is_structural());
    }
}
