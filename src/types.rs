use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of components every member owns.
pub const COMPONENT_COUNT: usize = 14;

/// Bits per encoded design variable.
pub const BITS_PER_VARIABLE: usize = 6;

/// Largest value a design variable can hold once encoded.
pub const MAX_ENCODED_VALUE: u32 = (1 << BITS_PER_VARIABLE) - 1;

/// How a cylinder's bore is parameterised. Exactly one of the two diameters is a design variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bore {
    /// `inner_diameter` is the design variable; the wall grows outward.
    Inner,
    /// `outer_diameter` is the design variable; the wall grows inward.
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentKind {
    Cylinder(Bore),
    Structure,
    Gimbal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    Hip,
    Knee,
    Ankle,
}

impl Joint {
    pub fn prefix(&self) -> &'static str {
        match self {
            Joint::Hip => "hip",
            Joint::Knee => "knee",
            Joint::Ankle => "ankle",
        }
    }
}

/// Motion an actuator cylinder drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Motion {
    Abduct,
    Adduct,
    Extend,
    Flex,
    Rotate,
}

impl Motion {
    pub fn suffix(&self) -> &'static str {
        match self {
            Motion::Abduct => "ab",
            Motion::Adduct => "ad",
            Motion::Extend => "ex",
            Motion::Flex => "fl",
            Motion::Rotate => "ir",
        }
    }

    pub fn axis(&self) -> LoadAxis {
        match self {
            Motion::Flex | Motion::Extend => LoadAxis::X,
            Motion::Abduct | Motion::Adduct => LoadAxis::Y,
            Motion::Rotate => LoadAxis::Z,
        }
    }
}

/// Axis a transmitted actuator force loads a structure about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadAxis {
    X,
    Y,
    Z,
}

/// Declared design variable: its name and the inclusive range random draws come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: &'static str,
    pub min: u32,
    pub max: u32,
}

const fn var(name: &'static str, min: u32, max: u32) -> VariableSpec {
    VariableSpec { name, min, max }
}

pub const INNER_BORE_CYLINDER_VARIABLES: &[VariableSpec] = &[
    var("inner_diameter", 1, 20),
    var("cyl_length", 1, 20),
    var("cyl_thickness", 1, 20),
    var("base_thickness", 1, 20),
];

pub const OUTER_BORE_CYLINDER_VARIABLES: &[VariableSpec] = &[
    var("outer_diameter", 1, 20),
    var("cyl_length", 1, 20),
    var("cyl_thickness", 1, 20),
    var("base_thickness", 1, 20),
];

pub const STRUCTURE_VARIABLES: &[VariableSpec] = &[
    var("rib_width", 1, 20),
    var("rib_length", 1, 20),
    var("flange_width", 1, 20),
    var("flange_thickness", 1, 20),
    var("core_diameter", 1, 20),
    var("core_inner_diameter", 1, 20),
    var("core_thickness", 1, 20),
    var("mount_thickness", 1, 20),
    var("mount_width", 1, 20),
    var("mount_modifier", 0, 50),
    var("mount_peg_diameter", 1, 10),
];

pub const GIMBAL_VARIABLES: &[VariableSpec] = &[
    var("peg_length", 1, 20),
    var("peg_diameter", 1, 20),
    var("mount_modifier", 1, 63),
    var("mount_thickness", 1, 10),
];

impl ComponentKind {
    /// Ordered design variables for this kind. Encoding order follows this list.
    pub fn variables(&self) -> &'static [VariableSpec] {
        match self {
            ComponentKind::Cylinder(Bore::Inner) => INNER_BORE_CYLINDER_VARIABLES,
            ComponentKind::Cylinder(Bore::Outer) => OUTER_BORE_CYLINDER_VARIABLES,
            ComponentKind::Structure => STRUCTURE_VARIABLES,
            ComponentKind::Gimbal => GIMBAL_VARIABLES,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variables().len()
    }

    pub fn genome_len(&self) -> usize {
        self.variable_count() * BITS_PER_VARIABLE
    }

    pub fn is_cylinder(&self) -> bool {
        matches!(self, ComponentKind::Cylinder(_))
    }
}

/// The fourteen component slots of a member, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentId {
    FemurStructure,
    TibiaStructure,
    HipGimbal,
    KneeGimbal,
    AnkleGimbal,
    HipAbductCylinder,
    HipAdductCylinder,
    HipExtendCylinder,
    HipFlexCylinder,
    KneeExtendCylinder,
    KneeFlexCylinder,
    AnkleExtendCylinder,
    AnkleFlexCylinder,
    AnkleRotateCylinder,
}

impl ComponentId {
    pub const ALL: [ComponentId; COMPONENT_COUNT] = [
        ComponentId::FemurStructure,
        ComponentId::TibiaStructure,
        ComponentId::HipGimbal,
        ComponentId::KneeGimbal,
        ComponentId::AnkleGimbal,
        ComponentId::HipAbductCylinder,
        ComponentId::HipAdductCylinder,
        ComponentId::HipExtendCylinder,
        ComponentId::HipFlexCylinder,
        ComponentId::KneeExtendCylinder,
        ComponentId::KneeFlexCylinder,
        ComponentId::AnkleExtendCylinder,
        ComponentId::AnkleFlexCylinder,
        ComponentId::AnkleRotateCylinder,
    ];

    /// Slot index inside a member.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComponentId::FemurStructure => "FemurStructure",
            ComponentId::TibiaStructure => "TibiaStructure",
            ComponentId::HipGimbal => "HipGimbal",
            ComponentId::KneeGimbal => "KneeGimbal",
            ComponentId::AnkleGimbal => "AnkleGimbal",
            ComponentId::HipAbductCylinder => "HipAbductCylinder",
            ComponentId::HipAdductCylinder => "HipAdductCylinder",
            ComponentId::HipExtendCylinder => "HipExtendCylinder",
            ComponentId::HipFlexCylinder => "HipFlexCylinder",
            ComponentId::KneeExtendCylinder => "KneeExtendCylinder",
            ComponentId::KneeFlexCylinder => "KneeFlexCylinder",
            ComponentId::AnkleExtendCylinder => "AnkleExtendCylinder",
            ComponentId::AnkleFlexCylinder => "AnkleFlexCylinder",
            ComponentId::AnkleRotateCylinder => "AnkleRotateCylinder",
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentId::FemurStructure | ComponentId::TibiaStructure => ComponentKind::Structure,
            ComponentId::HipGimbal | ComponentId::KneeGimbal | ComponentId::AnkleGimbal => {
                ComponentKind::Gimbal
            }
            _ => ComponentKind::Cylinder(Bore::Inner),
        }
    }

    /// Joint a gimbal or cylinder belongs to. Structures span two joints.
    pub fn joint(&self) -> Option<Joint> {
        match self {
            ComponentId::HipGimbal
            | ComponentId::HipAbductCylinder
            | ComponentId::HipAdductCylinder
            | ComponentId::HipExtendCylinder
            | ComponentId::HipFlexCylinder => Some(Joint::Hip),
            ComponentId::KneeGimbal
            | ComponentId::KneeExtendCylinder
            | ComponentId::KneeFlexCylinder => Some(Joint::Knee),
            ComponentId::AnkleGimbal
            | ComponentId::AnkleExtendCylinder
            | ComponentId::AnkleFlexCylinder
            | ComponentId::AnkleRotateCylinder => Some(Joint::Ankle),
            ComponentId::FemurStructure | ComponentId::TibiaStructure => None,
        }
    }

    /// Motion driven by a cylinder slot.
    pub fn motion(&self) -> Option<Motion> {
        match self {
            ComponentId::HipAbductCylinder => Some(Motion::Abduct),
            ComponentId::HipAdductCylinder => Some(Motion::Adduct),
            ComponentId::HipExtendCylinder
            | ComponentId::KneeExtendCylinder
            | ComponentId::AnkleExtendCylinder => Some(Motion::Extend),
            ComponentId::HipFlexCylinder
            | ComponentId::KneeFlexCylinder
            | ComponentId::AnkleFlexCylinder => Some(Motion::Flex),
            ComponentId::AnkleRotateCylinder => Some(Motion::Rotate),
            _ => None,
        }
    }

    /// Load-case label used in stress names, e.g. `hip_fl`.
    pub fn load_case(&self) -> Option<String> {
        match (self.joint(), self.motion()) {
            (Some(joint), Some(motion)) => Some(format!("{}_{}", joint.prefix(), motion.suffix())),
            _ => None,
        }
    }

    /// Cylinder slots actuating a joint, in slot order.
    pub fn cylinders_of(joint: Joint) -> impl Iterator<Item = ComponentId> {
        ComponentId::ALL
            .into_iter()
            .filter(move |id| id.kind().is_cylinder() && id.joint() == Some(joint))
    }

    /// (proximal, distal) joints of a structural beam.
    pub fn structure_ends(&self) -> Option<(Joint, Joint)> {
        match self {
            ComponentId::FemurStructure => Some((Joint::Hip, Joint::Knee)),
            ComponentId::TibiaStructure => Some((Joint::Knee, Joint::Ankle)),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
