//! Stored designs: the material and variable values of every slot, without analysis results.
//! Population reports carry them, and a run can be seeded from them.

use super::{Component, GenerationContext, Member};
use crate::data::DesignTables;
use crate::error::Result;
use crate::types::ComponentId;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDesign {
    pub component: ComponentId,
    pub material: u32,
    /// Variable values in declared order.
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDesign {
    pub components: Vec<ComponentDesign>,
}

impl From<&Member> for MemberDesign {
    fn from(member: &Member) -> Self {
        Self {
            components: member
                .components()
                .iter()
                .map(|c| ComponentDesign {
                    component: c.id(),
                    material: c.material_id(),
                    values: c.values().to_vec(),
                })
                .collect(),
        }
    }
}

impl Member {
    /// Rebuild a member from a stored design. Every material must exist in the tables; adaptive
    /// chances are drawn fresh.
    pub fn from_design<R: Rng>(
        ctx: &mut GenerationContext,
        tables: &DesignTables,
        design: &MemberDesign,
        rng: &mut R,
    ) -> Result<Self> {
        let components = design
            .components
            .iter()
            .map(|c| {
                tables.material(c.material)?;
                Component::with_values(c.component, c.component.kind(), c.material, c.values.clone(), rng)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_components(ctx.next_id(), ctx.newborn_age, components)
    }
}
