use super::assembly::{
    cylinder_stresses, cylinder_volume, gimbal_stresses, gimbal_volume, mount_stresses, piston_force,
    structure_stresses, structure_volume, ActuatorLoad, StressMap,
};
use super::sections::{CylinderSection, GimbalSection, StructureSection};
use super::stress::DomainResult;
use super::units::VOLUME;
use crate::data::DesignTables;
use crate::error::{LegforgeError, Result};
use crate::population::{Component, Member};
use crate::types::{ComponentId, ComponentKind, Joint};
use std::collections::HashMap;

/// Runs mechanical analysis ("define") over a member: piston forces first, then stresses and
/// mass for every component. Domain failures invalidate the affected component only; missing
/// table entries and schema mismatches are returned as errors.
pub struct MechanicalAnalyzer<'a> {
    tables: &'a DesignTables,
}

impl<'a> MechanicalAnalyzer<'a> {
    pub fn new(tables: &'a DesignTables) -> Self {
        Self { tables }
    }

    pub fn define(&self, member: &mut Member) -> Result<()> {
        if member.is_defined {
            return Ok(());
        }
        member.reset_totals();
        for component in member.components_mut() {
            component.reset_analysis();
        }

        // cylinders drive everything else
        for component in member.components_mut().iter_mut().filter(|c| c.kind().is_cylinder()) {
            let section = CylinderSection::from_component(component)?;
            let pressure = self.tables.cylinder_pressure(component.id())?;
            match piston_force(&section, pressure) {
                Ok(force) => component.max_force = Some(force),
                Err(e) => {
                    component.max_force = Some(0.0);
                    component.invalidate(&e);
                }
            }
        }
        let loads = joint_loads(member);

        let mut total_mass = 0.0;
        let mut total_cost = 0.0;
        for component in member.components_mut() {
            let material = self.tables.material(component.material_id())?;
            let outcome = self.analyse_component(component, &loads)?;
            match outcome {
                Ok((volume, stresses)) => {
                    component.mass = material.density * volume * VOLUME;
                    component.stresses = stresses;
                }
                Err(e) => component.invalidate(&e),
            }
            total_mass += component.mass;
            total_cost += component.mass * material.cost_per_mass();
        }

        member.total_mass = total_mass;
        member.total_cost = total_cost;
        member.is_valid = member.components().iter().all(|c| c.is_valid);
        member.is_defined = true;
        Ok(())
    }

    /// Solid volume (mm³) and stresses of one component.
    fn analyse_component(
        &self,
        component: &Component,
        loads: &HashMap<Joint, Vec<ActuatorLoad>>,
    ) -> Result<DomainResult<(f64, StressMap)>> {
        let body_weight = self.tables.limb.body_weight;
        let no_loads = Vec::new();
        let loads_at = |joint: Joint| loads.get(&joint).unwrap_or(&no_loads);

        let outcome = match component.kind() {
            ComponentKind::Cylinder(_) => {
                let section = CylinderSection::from_component(component)?;
                let pressure = self.tables.cylinder_pressure(component.id())?;
                cylinder_stresses(&section, pressure).map(|s| (cylinder_volume(&section), s))
            }
            ComponentKind::Structure => {
                let section = StructureSection::from_component(component)?;
                let (proximal, distal) = component.id().structure_ends().ok_or_else(|| {
                    LegforgeError::UnknownVariable {
                        component: component.name().to_string(),
                        name: "<structure ends>".to_string(),
                    }
                })?;
                let length = self.tables.limb.segment_length(component.id());
                structure_volume(&section, length).and_then(|volume| {
                    let mut stresses =
                        structure_stresses(&section, loads_at(proximal), loads_at(distal), body_weight)?;
                    stresses.extend(mount_stresses(&section, loads_at(proximal), loads_at(distal))?);
                    Ok((volume, stresses))
                })
            }
            ComponentKind::Gimbal => {
                let section = GimbalSection::from_component(component)?;
                let joint = component.id().joint().ok_or_else(|| LegforgeError::UnknownVariable {
                    component: component.name().to_string(),
                    name: "<joint>".to_string(),
                })?;
                gimbal_stresses(&section, loads_at(joint), body_weight).map(|s| (gimbal_volume(&section), s))
            }
        };
        Ok(outcome)
    }
}

/// Loads each joint's cylinders transmit, in slot order.
pub fn joint_loads(member: &Member) -> HashMap<Joint, Vec<ActuatorLoad>> {
    let mut loads: HashMap<Joint, Vec<ActuatorLoad>> = HashMap::new();
    for joint in [Joint::Hip, Joint::Knee, Joint::Ankle] {
        for id in ComponentId::cylinders_of(joint) {
            if let (Some(case), Some(motion)) = (id.load_case(), id.motion()) {
                let force = member.component(id).max_force.unwrap_or(0.0);
                loads.entry(joint).or_default().push(ActuatorLoad::new(case, motion.axis(), force));
            }
        }
    }
    loads
}
