use crate::engines::generation::operators::{initial_chances, CROSSOVER_SCHEDULE, MUTATION_SCHEDULE};
use crate::error::{LegforgeError, Result};
use crate::types::{ComponentId, ComponentKind, VariableSpec, BITS_PER_VARIABLE, MAX_ENCODED_VALUE};
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

/// One physical part of a member: its design variables, material choice, adaptive operator
/// chances, and the results of mechanical analysis and fitness evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    id: ComponentId,
    kind: ComponentKind,
    values: Vec<u32>,
    material_id: u32,
    /// Per-bit crossover chances, annealed every time crossover consults them.
    pub crossover_chances: Vec<f64>,
    /// Per-bit mutation chances, annealed every time mutation consults them.
    pub mutate_chances: Vec<f64>,
    pub stresses: BTreeMap<String, f64>,
    pub safety_factors: BTreeMap<String, f64>,
    pub fitness: f64,
    pub mass: f64,
    /// Maximum piston force, set for cylinders once analysed.
    pub max_force: Option<f64>,
    pub is_valid: bool,
}

impl Component {
    /// Fresh component with every variable drawn uniformly from its declared range.
    pub fn random<R: Rng>(id: ComponentId, kind: ComponentKind, material_ids: &[u32], rng: &mut R) -> Result<Self> {
        if material_ids.is_empty() {
            return Err(LegforgeError::MissingData("no materials to choose from".to_string()));
        }
        let material_id = material_ids[rng.gen_range(0..material_ids.len())];
        let values = Self::draw_values(kind.variables(), rng);
        Ok(Self::assemble(id, kind, material_id, values, rng))
    }

    /// Offspring shell: zeroed variables waiting to be decoded, inherited material, fresh chances.
    pub fn offspring<R: Rng>(id: ComponentId, kind: ComponentKind, material_id: u32, rng: &mut R) -> Self {
        let values = vec![0; kind.variable_count()];
        Self::assemble(id, kind, material_id, values, rng)
    }

    /// Component with explicit values and fresh chances, as when a stored design is reloaded.
    pub fn with_values<R: Rng>(
        id: ComponentId,
        kind: ComponentKind,
        material_id: u32,
        values: Vec<u32>,
        rng: &mut R,
    ) -> Result<Self> {
        Self::check_values(id, kind, &values)?;
        Ok(Self::assemble(id, kind, material_id, values, rng))
    }

    /// Component with explicit values and zeroed chances.
    pub fn from_values(id: ComponentId, kind: ComponentKind, material_id: u32, values: Vec<u32>) -> Result<Self> {
        if values.len() != kind.variable_count() {
            return Err(LegforgeError::ChromosomeCount {
                component: id.name().to_string(),
                expected: kind.variable_count(),
                actual: values.len(),
            });
        }
        let genome_len = kind.genome_len();
        Ok(Self {
            id,
            kind,
            values,
            material_id,
            crossover_chances: vec![0.0; genome_len],
            mutate_chances: vec![0.0; genome_len],
            stresses: BTreeMap::new(),
            safety_factors: BTreeMap::new(),
            fitness: 0.0,
            mass: 0.0,
            max_force: None,
            is_valid: true,
        })
    }

    /// Variable count must match the kind and every value must fit the codec.
    fn check_values(id: ComponentId, kind: ComponentKind, values: &[u32]) -> Result<()> {
        if values.len() != kind.variable_count() {
            return Err(LegforgeError::ChromosomeCount {
                component: id.name().to_string(),
                expected: kind.variable_count(),
                actual: values.len(),
            });
        }
        if let Some(&value) = values.iter().find(|v| **v > MAX_ENCODED_VALUE) {
            return Err(LegforgeError::EncodeOverflow {
                value,
                bits: BITS_PER_VARIABLE,
            });
        }
        Ok(())
    }

    fn assemble<R: Rng>(id: ComponentId, kind: ComponentKind, material_id: u32, values: Vec<u32>, rng: &mut R) -> Self {
        let genome_len = kind.genome_len();
        Self {
            id,
            kind,
            values,
            material_id,
            crossover_chances: initial_chances(genome_len, &CROSSOVER_SCHEDULE, rng),
            mutate_chances: initial_chances(genome_len, &MUTATION_SCHEDULE, rng),
            stresses: BTreeMap::new(),
            safety_factors: BTreeMap::new(),
            fitness: 0.0,
            mass: 0.0,
            max_force: None,
            is_valid: true,
        }
    }

    fn draw_values<R: Rng>(specs: &[VariableSpec], rng: &mut R) -> Vec<u32> {
        specs.iter().map(|spec| rng.gen_range(spec.min..=spec.max)).collect()
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn material_id(&self) -> u32 {
        self.material_id
    }

    pub fn variables(&self) -> &'static [VariableSpec] {
        self.kind.variables()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn variable_count(&self) -> usize {
        self.values.len()
    }

    /// (name, value) pairs in declaration order.
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.variables().iter().map(|spec| spec.name).zip(self.values.iter().copied())
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.variables()
            .iter()
            .position(|spec| spec.name == name)
            .ok_or_else(|| LegforgeError::UnknownVariable {
                component: self.name().to_string(),
                name: name.to_string(),
            })
    }

    pub fn value(&self, name: &str) -> Result<u32> {
        Ok(self.values[self.position(name)?])
    }

    /// Variable as a float, for geometry.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.value(name).map(f64::from)
    }

    pub fn set(&mut self, name: &str, value: u32) -> Result<()> {
        let index = self.position(name)?;
        self.values[index] = value;
        Ok(())
    }

    /// Redraw every variable from its declared range. Material and chances are kept.
    pub fn redraw<R: Rng>(&mut self, rng: &mut R) {
        self.values = Self::draw_values(self.kind.variables(), rng);
        self.reset_analysis();
    }

    /// Clear analysis and evaluation results ahead of a fresh mechanical analysis.
    pub fn reset_analysis(&mut self) {
        self.stresses.clear();
        self.safety_factors.clear();
        self.fitness = 0.0;
        self.mass = 0.0;
        self.max_force = None;
        self.is_valid = true;
    }

    pub fn invalidate(&mut self, reason: &dyn std::fmt::Display) {
        log::debug!("{} invalid: {}", self.id, reason);
        self.is_valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_values_in_declared_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let c = Component::random(ComponentId::FemurStructure, ComponentKind::Structure, &[1, 2], &mut rng).unwrap();
            for (spec, value) in c.variables().iter().zip(c.values()) {
                assert!(*value >= spec.min && *value <= spec.max);
            }
            assert!([1, 2].contains(&c.material_id()));
            assert_eq!(c.crossover_chances.len(), 66);
            assert!(c.crossover_chances.iter().all(|p| (0.1..=0.9).contains(p)));
            assert!(c.mutate_chances.iter().all(|p| (0.1..=0.3).contains(p)));
        }
    }

    #[test]
    fn test_named_access() {
        let mut c = Component::from_values(
            ComponentId::HipFlexCylinder,
            ComponentKind::Cylinder(Bore::Inner),
            1,
            vec![10, 12, 3, 2],
        )
        .unwrap();
        assert_eq!(c.value("cyl_thickness").unwrap(), 3);
        c.set("cyl_length", 7).unwrap();
        assert_eq!(c.get("cyl_length").unwrap(), 7.0);
        assert!(matches!(c.value("outer_diameter"), Err(LegforgeError::UnknownVariable { .. })));
    }

    #[test]
    fn test_from_values_checks_count() {
        let result = Component::from_values(ComponentId::HipGimbal, ComponentKind::Gimbal, 1, vec![1, 2, 3]);
        assert!(matches!(result, Err(LegforgeError::ChromosomeCount { expected: 4, actual: 3, .. })));
    }

    #[test]
    fn test_with_values_draws_chances() {
        let mut rng = StdRng::seed_from_u64(12);
        let c = Component::with_values(ComponentId::AnkleGimbal, ComponentKind::Gimbal, 3, vec![7, 6, 15, 10], &mut rng)
            .unwrap();
        assert_eq!(c.values(), &[7, 6, 15, 10]);
        assert_eq!(c.mutate_chances.len(), 24);
        assert!(c.mutate_chances.iter().all(|p| (0.1..=0.3).contains(p)));

        let overflow = Component::with_values(ComponentId::AnkleGimbal, ComponentKind::Gimbal, 3, vec![7, 64, 1, 1], &mut rng);
        assert!(matches!(overflow, Err(LegforgeError::EncodeOverflow { value: 64, bits: 6 })));
    }

    #[test]
    fn test_redraw_resets_analysis() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut c = Component::random(ComponentId::KneeGimbal, ComponentKind::Gimbal, &[4], &mut rng).unwrap();
        c.stresses.insert("ex_axial_stress".to_string(), 1.0);
        c.fitness = 40.0;
        c.is_valid = false;
        c.redraw(&mut rng);
        assert!(c.stresses.is_empty());
        assert_eq!(c.fitness, 0.0);
        assert!(c.is_valid);
        assert_eq!(c.material_id(), 4);
    }
}
