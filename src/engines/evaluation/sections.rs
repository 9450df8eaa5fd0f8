//! Typed views over a component's design variables, in millimetres.

use crate::error::{LegforgeError, Result};
use crate::population::Component;
use crate::types::{Bore, ComponentKind};

fn wrong_kind(component: &Component, wanted: &str) -> LegforgeError {
    LegforgeError::UnknownVariable {
        component: component.name().to_string(),
        name: format!("<{} section>", wanted),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSection {
    pub bore: Bore,
    /// The bore's design diameter: inner for `Bore::Inner`, outer for `Bore::Outer`.
    pub diameter: f64,
    pub length: f64,
    pub thickness: f64,
    pub base_thickness: f64,
}

impl CylinderSection {
    pub fn from_component(component: &Component) -> Result<Self> {
        let bore = match component.kind() {
            ComponentKind::Cylinder(bore) => bore,
            _ => return Err(wrong_kind(component, "cylinder")),
        };
        let diameter = match bore {
            Bore::Inner => component.get("inner_diameter")?,
            Bore::Outer => component.get("outer_diameter")?,
        };
        Ok(Self {
            bore,
            diameter,
            length: component.get("cyl_length")?,
            thickness: component.get("cyl_thickness")?,
            base_thickness: component.get("base_thickness")?,
        })
    }

    pub fn inner_radius(&self) -> f64 {
        match self.bore {
            Bore::Inner => self.diameter / 2.0,
            Bore::Outer => self.diameter / 2.0 - self.thickness,
        }
    }

    pub fn outer_radius(&self) -> f64 {
        match self.bore {
            Bore::Inner => self.diameter / 2.0 + self.thickness,
            Bore::Outer => self.diameter / 2.0,
        }
    }

    /// Bore depth between the two end caps, never negative.
    pub fn inner_length(&self) -> f64 {
        (self.length - 2.0 * self.base_thickness).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureSection {
    pub rib_width: f64,
    pub rib_length: f64,
    pub flange_width: f64,
    pub flange_thickness: f64,
    pub core_diameter: f64,
    pub core_inner_diameter: f64,
    pub core_thickness: f64,
    pub mount_thickness: f64,
    pub mount_width: f64,
    pub mount_modifier: f64,
    pub mount_peg_diameter: f64,
}

impl StructureSection {
    pub fn from_component(component: &Component) -> Result<Self> {
        if component.kind() != ComponentKind::Structure {
            return Err(wrong_kind(component, "structure"));
        }
        Ok(Self {
            rib_width: component.get("rib_width")?,
            rib_length: component.get("rib_length")?,
            flange_width: component.get("flange_width")?,
            flange_thickness: component.get("flange_thickness")?,
            core_diameter: component.get("core_diameter")?,
            core_inner_diameter: component.get("core_inner_diameter")?,
            core_thickness: component.get("core_thickness")?,
            mount_thickness: component.get("mount_thickness")?,
            mount_width: component.get("mount_width")?,
            mount_modifier: component.get("mount_modifier")?,
            mount_peg_diameter: component.get("mount_peg_diameter")?,
        })
    }

    /// Distance from the rib root to the flange corner.
    pub fn flange_radius(&self) -> f64 {
        (self.rib_length.powi(2) + (self.flange_width / 2.0).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalSection {
    pub peg_length: f64,
    pub peg_diameter: f64,
    pub mount_modifier: f64,
    pub mount_thickness: f64,
}

impl GimbalSection {
    pub fn from_component(component: &Component) -> Result<Self> {
        if component.kind() != ComponentKind::Gimbal {
            return Err(wrong_kind(component, "gimbal"));
        }
        Ok(Self {
            peg_length: component.get("peg_length")?,
            peg_diameter: component.get("peg_diameter")?,
            mount_modifier: component.get("mount_modifier")?,
            mount_thickness: component.get("mount_thickness")?,
        })
    }

    pub fn mount_width(&self) -> f64 {
        (1.0 + self.mount_modifier / 100.0) * self.peg_diameter
    }

    pub fn mount_height(&self) -> f64 {
        1.5 * self.mount_width()
    }
}
