//! Read-only lookup tables consumed by the analysis engine.
//!
//! All three tables are resolved once before a run starts and shared by reference with every
//! evaluation worker. Nothing here is mutated during optimisation.

use crate::error::{LegforgeError, Result};
use crate::types::ComponentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Cost per unit mass assumed when a material row carries no numeric cost.
pub const DEFAULT_COST_PER_MASS: f64 = 50.0;

/// Force-table entry holding a cylinder's rated pressure (psi).
pub const CYLINDER_PRESSURE_KEY: &str = "cyl_pressure";

pub const BODY_WEIGHT_KEY: &str = "Weight";
pub const FEMUR_LENGTH_KEY: &str = "FemurLength";
pub const TIBIA_RATIO_KEY: &str = "TibiaRatio";

/// One row of the material-property table. Strengths are in MPa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: u32,
    pub name: String,
    pub treatment: String,
    pub cost: Option<f64>,
    pub density: f64,
    pub ultimate_tensile_strength: Option<f64>,
    pub yield_strength: f64,
    pub elastic_modulus: Option<f64>,
    pub poissons_ratio: Option<f64>,
}

impl Material {
    pub fn cost_per_mass(&self) -> f64 {
        self.cost.unwrap_or(DEFAULT_COST_PER_MASS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: BTreeMap<u32, Material>,
}

impl MaterialTable {
    pub fn new(materials: impl IntoIterator<Item = Material>) -> Self {
        Self {
            materials: materials.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn get(&self, id: u32) -> Option<&Material> {
        self.materials.get(&id)
    }

    /// Material ids in ascending order; random material choice indexes into this.
    pub fn ids(&self) -> Vec<u32> {
        self.materials.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}

/// Named load cases per component, e.g. `HipFlexCylinder -> cyl_pressure -> 3000`.
#[derive(Debug, Clone, Default)]
pub struct ForceTable {
    entries: HashMap<String, BTreeMap<String, i64>>,
}

impl ForceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: &str, case: &str, value: i64) {
        self.entries
            .entry(component.to_string())
            .or_default()
            .insert(case.to_string(), value);
    }

    pub fn get(&self, component: &str, case: &str) -> Option<i64> {
        self.entries.get(component).and_then(|cases| cases.get(case)).copied()
    }

    pub fn cases(&self, component: &str) -> Option<&BTreeMap<String, i64>> {
        self.entries.get(component)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flat client anthropometric parameters.
#[derive(Debug, Clone, Default)]
pub struct ClientParameters {
    values: HashMap<String, f64>,
}

impl ClientParameters {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn require(&self, name: &str) -> Result<f64> {
        self.get(name)
            .ok_or_else(|| LegforgeError::MissingData(format!("client parameter '{}'", name)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Client values the analysis needs, resolved once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbParameters {
    /// Body weight, newtons.
    pub body_weight: f64,
    /// Femur segment length, mm.
    pub femur_length: f64,
    /// Tibia segment length, mm.
    pub tibia_length: f64,
}

impl LimbParameters {
    pub fn from_client(client: &ClientParameters) -> Result<Self> {
        let body_weight = client.require(BODY_WEIGHT_KEY)?;
        let femur_length = client.require(FEMUR_LENGTH_KEY)?;
        let tibia_ratio = match client.get(TIBIA_RATIO_KEY) {
            Some(ratio) => ratio,
            None => {
                log::warn!("No {} client parameter, using a 1:1 tibia/femur ratio", TIBIA_RATIO_KEY);
                1.0
            }
        };

        Ok(Self {
            body_weight,
            femur_length,
            tibia_length: femur_length * tibia_ratio,
        })
    }

    pub fn segment_length(&self, id: ComponentId) -> f64 {
        match id {
            ComponentId::TibiaStructure => self.tibia_length,
            _ => self.femur_length,
        }
    }
}

/// Every read-only input of a run, checked for completeness up front.
#[derive(Debug, Clone)]
pub struct DesignTables {
    pub materials: MaterialTable,
    pub forces: ForceTable,
    pub client: ClientParameters,
    pub limb: LimbParameters,
    material_ids: Vec<u32>,
}

impl DesignTables {
    pub fn new(materials: MaterialTable, forces: ForceTable, client: ClientParameters) -> Result<Self> {
        if materials.is_empty() {
            return Err(LegforgeError::MissingData("material table is empty".to_string()));
        }

        for id in ComponentId::ALL.iter().filter(|id| id.kind().is_cylinder()) {
            if forces.get(id.name(), CYLINDER_PRESSURE_KEY).is_none() {
                return Err(LegforgeError::MissingData(format!(
                    "force table entry '{}' for {}",
                    CYLINDER_PRESSURE_KEY, id
                )));
            }
        }

        let limb = LimbParameters::from_client(&client)?;
        let material_ids = materials.ids();

        Ok(Self {
            materials,
            forces,
            client,
            limb,
            material_ids,
        })
    }

    pub fn material_ids(&self) -> &[u32] {
        &self.material_ids
    }

    pub fn material(&self, id: u32) -> Result<&Material> {
        self.materials
            .get(id)
            .ok_or_else(|| LegforgeError::MissingData(format!("material id {}", id)))
    }

    /// Rated pressure (psi) of a cylinder slot.
    pub fn cylinder_pressure(&self, id: ComponentId) -> Result<f64> {
        self.forces
            .get(id.name(), CYLINDER_PRESSURE_KEY)
            .map(|p| p as f64)
            .ok_or_else(|| {
                LegforgeError::MissingData(format!(
                    "force table entry '{}' for {}",
                    CYLINDER_PRESSURE_KEY, id
                ))
            })
    }
}
