use crate::config::FitnessConfig;
use crate::data::{DesignTables, Material};
use crate::engines::evaluation::units::STRENGTH;
use crate::error::{LegforgeError, Result};
use crate::population::{Component, Member};
use std::f64::consts::PI;

/// Turns analysed stresses into safety factors, a validity verdict and a shaped fitness score.
#[derive(Debug, Clone)]
pub struct FitnessOracle {
    config: FitnessConfig,
}

impl FitnessOracle {
    pub fn new(config: FitnessConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitnessConfig {
        &self.config
    }

    /// `yield / |stress|`, with a zero stress mapped to the infinite-safety sentinel.
    pub fn safety_factor(&self, yield_strength_pa: f64, stress: f64) -> f64 {
        if stress == 0.0 {
            return self.config.infinite_safety_factor;
        }
        yield_strength_pa / stress.abs()
    }

    /// Shaping modifier for one safety factor. Rises towards 1 as `sf` approaches the target
    /// from below; past the target only the decaying reward term survives.
    pub fn shaping_modifier(&self, sf: f64) -> f64 {
        let target = self.config.target();
        let offset = target - 1.0;
        if sf < target {
            -0.5 * ((sf - 1.0) * PI / offset).cos() + 0.5
        } else {
            let overshoot = -2.0 * ((sf - 1.0 - offset).powi(2) + 1.0);
            overshoot.max(0.0) + offset / (2.0 * (sf - 1.0))
        }
    }

    /// Score every recorded stress of a component, in stress-name order. A safety factor below
    /// one fails the component outright and stops scoring; one outside the design band fails it
    /// but scoring continues.
    pub fn evaluate_component(&self, component: &mut Component, material: &Material) {
        component.safety_factors.clear();
        component.fitness = 0.0;

        let yield_pa = material.yield_strength * STRENGTH;
        let lower = self.config.design_factor;
        let upper = self.config.upper_bound();

        let stresses: Vec<(String, f64)> = component.stresses.iter().map(|(k, v)| (k.clone(), *v)).collect();
        for (name, stress) in stresses {
            let sf = self.safety_factor(yield_pa, stress);
            component.safety_factors.insert(name.clone(), sf);

            if sf < 1.0 {
                component.invalidate(&format_args!("{} safety factor {:.3} below 1", name, sf));
                return;
            }
            if sf < lower || sf > upper {
                component.invalidate(&format_args!("{} safety factor {:.3} outside design band", name, sf));
            }
            component.fitness += self.config.max_score * self.shaping_modifier(sf);
        }
    }

    /// Evaluate a defined member. Totals are sums over components; validity is their conjunction.
    pub fn evaluate_member(&self, member: &mut Member, tables: &DesignTables) -> Result<f64> {
        if member.is_evaluated {
            return Ok(member.total_fitness);
        }
        if !member.is_defined {
            return Err(LegforgeError::MissingData(format!(
                "mechanical analysis for member {}",
                member.id
            )));
        }

        for component in member.components_mut() {
            let material = tables.material(component.material_id())?;
            self.evaluate_component(component, material);
        }

        member.total_fitness = member.components().iter().map(|c| c.fitness).sum();
        member.is_valid = member.components().iter().all(|c| c.is_valid);
        member.is_evaluated = true;
        Ok(member.total_fitness)
    }
}
