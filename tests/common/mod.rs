#![allow(dead_code)]

use legforge::config::{EvolutionConfig, FitnessConfig};
use legforge::data::{ClientParameters, DesignTables, ForceTable, Material, MaterialTable};
use legforge::types::ComponentId;
use std::collections::HashMap;

pub fn material(id: u32, yield_mpa: f64) -> Material {
    Material {
        id,
        name: format!("Test material {}", id),
        treatment: String::new(),
        cost: Some(2.0),
        density: 7850.0,
        ultimate_tensile_strength: None,
        yield_strength: yield_mpa,
        elastic_modulus: None,
        poissons_ratio: None,
    }
}

pub fn tables_with(materials: Vec<Material>, pressure_psi: i64) -> DesignTables {
    let mut forces = ForceTable::new();
    for id in ComponentId::ALL.iter().filter(|id| id.kind().is_cylinder()) {
        forces.insert(id.name(), "cyl_pressure", pressure_psi);
    }
    let client = ClientParameters::new(HashMap::from([
        ("Weight".to_string(), 800.0),
        ("FemurLength".to_string(), 450.0),
        ("TibiaRatio".to_string(), 0.9),
    ]));
    DesignTables::new(MaterialTable::new(materials), forces, client).unwrap()
}

/// Tables whose only material is far stronger than any stress the schema can produce.
pub fn strong_tables() -> DesignTables {
    tables_with(vec![material(1, 1e7), material(2, 2e7)], 10)
}

/// Tables whose only material fails every stress.
pub fn fragile_tables() -> DesignTables {
    tables_with(vec![material(1, 1e-9)], 2000)
}

/// Scoring that accepts any safety factor of at least 1 and keeps total fitness well above 1.
pub fn permissive_fitness() -> FitnessConfig {
    FitnessConfig {
        design_factor: 1.0,
        upper_band_factor: 1e20,
        target_ratio: 2.0,
        max_score: 1e25,
        infinite_safety_factor: 10_000.0,
    }
}

pub fn small_evolution(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 12,
        num_generations: 3,
        runs: 1,
        viability_threshold: 0.5,
        max_bootstrap_retries: 5,
        newborn_age: -3,
        parallel: false,
        seed: Some(seed),
    }
}
