use crate::population::{Member, Population};
use serde::{Deserialize, Serialize};

/// Summary of one generation, one row of the statistics export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub population_count: usize,
    pub valid_count: usize,
    pub max_fitness: f64,
    pub min_fitness: f64,
    pub total_fitness: f64,
    pub average_fitness: f64,
}

pub struct MetricsEngine;

impl MetricsEngine {
    pub fn calculate(generation: usize, population: &Population) -> GenerationStats {
        Self::calculate_members(generation, &population.members)
    }

    pub fn calculate_members(generation: usize, members: &[Member]) -> GenerationStats {
        let fitness: Vec<f64> = members.iter().map(|m| m.total_fitness).collect();
        let total: f64 = fitness.iter().sum();
        let max = fitness.iter().copied().reduce(f64::max).unwrap_or(0.0);
        let min = fitness.iter().copied().reduce(f64::min).unwrap_or(0.0);
        let average = if fitness.is_empty() {
            0.0
        } else {
            total / fitness.len() as f64
        };

        GenerationStats {
            generation,
            population_count: members.len(),
            valid_count: members.iter().filter(|m| m.is_valid).count(),
            max_fitness: max,
            min_fitness: min,
            total_fitness: total,
            average_fitness: average,
        }
    }
}
