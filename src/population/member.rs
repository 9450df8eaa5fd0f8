use super::{Component, GenerationContext};
use crate::data::DesignTables;
use crate::error::{LegforgeError, Result};
use crate::types::{ComponentId, COMPONENT_COUNT};
use rand::Rng;
use serde::Serialize;

/// A complete candidate leg design: one component per slot plus aggregate results.
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub id: u64,
    pub age: i32,
    components: Vec<Component>,
    pub total_mass: f64,
    pub total_cost: f64,
    pub total_fitness: f64,
    pub is_valid: bool,
    /// Mechanical analysis has run for the current variables.
    pub is_defined: bool,
    /// Fitness has been evaluated for the current analysis.
    pub is_evaluated: bool,
}

impl Member {
    /// Random member for the initial population.
    pub fn random<R: Rng>(ctx: &mut GenerationContext, tables: &DesignTables, rng: &mut R) -> Result<Self> {
        let components = ComponentId::ALL
            .iter()
            .map(|id| Component::random(*id, id.kind(), tables.material_ids(), rng))
            .collect::<Result<Vec<_>>>()?;
        Self::from_components(ctx.next_id(), ctx.newborn_age, components)
    }

    /// Member built from explicit components. Components are put in slot order and every slot
    /// must be filled exactly once.
    pub fn from_components(id: u64, age: i32, mut components: Vec<Component>) -> Result<Self> {
        if components.len() != COMPONENT_COUNT {
            return Err(LegforgeError::ComponentCount {
                expected: COMPONENT_COUNT,
                actual: components.len(),
            });
        }

        components.sort_by_key(|c| c.id().index());
        let mut distinct = components.iter().map(|c| c.id()).collect::<Vec<_>>();
        distinct.dedup();
        if distinct.len() != COMPONENT_COUNT {
            return Err(LegforgeError::ComponentCount {
                expected: COMPONENT_COUNT,
                actual: distinct.len(),
            });
        }

        Ok(Self {
            id,
            age,
            components,
            total_mass: 0.0,
            total_cost: 0.0,
            total_fitness: 0.0,
            is_valid: true,
            is_defined: false,
            is_evaluated: false,
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    pub fn component_mut(&mut self, id: ComponentId) -> &mut Component {
        &mut self.components[id.index()]
    }

    /// Valid with a total fitness of at least one.
    pub fn is_healthy(&self) -> bool {
        self.is_valid && self.total_fitness >= 1.0
    }

    /// Redraw every component's variables and clear all analysis state.
    pub fn regenerate<R: Rng>(&mut self, rng: &mut R) {
        for component in &mut self.components {
            component.redraw(rng);
        }
        self.reset_totals();
    }

    /// Forget analysis and evaluation so the next pass recomputes everything.
    pub fn reset_totals(&mut self) {
        self.total_mass = 0.0;
        self.total_cost = 0.0;
        self.total_fitness = 0.0;
        self.is_valid = true;
        self.is_defined = false;
        self.is_evaluated = false;
    }
}
