use super::traits::ConfigSection;
use crate::error::LegforgeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub materials_path: PathBuf,
    pub forces_path: PathBuf,
    pub client_path: PathBuf,
    /// Directory generation statistics and population reports are written to.
    pub export_dir: PathBuf,
    /// Stored designs placed in every run's initial population. A design list or an exported
    /// population report.
    pub seed_designs_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            materials_path: PathBuf::from("data/material_properties.csv"),
            forces_path: PathBuf::from("data/component_forces.txt"),
            client_path: PathBuf::from("data/client_info.csv"),
            export_dir: PathBuf::from("output"),
            seed_designs_path: None,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), LegforgeError> {
        for (label, path) in [
            ("materials_path", &self.materials_path),
            ("forces_path", &self.forces_path),
            ("client_path", &self.client_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(LegforgeError::Configuration(format!("{} must not be empty", label)));
            }
        }
        Ok(())
    }
}
