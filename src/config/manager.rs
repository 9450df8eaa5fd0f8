use super::{
    data::DataConfig,
    evolution::EvolutionConfig,
    fitness::FitnessConfig,
    traits::ConfigSection,
};
use crate::error::LegforgeError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `LEGFORGE__EVOLUTION__SEED=7`.
pub const ENV_PREFIX: &str = "LEGFORGE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub fitness: FitnessConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), LegforgeError> {
        self.evolution.validate()?;
        self.fitness.validate()?;
        self.data.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML file, layer `LEGFORGE__SECTION__FIELD` environment overrides on top, and
    /// validate the result before it replaces the current configuration.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LegforgeError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;

        log::info!(
            "Loaded configuration from {} ({}, {}, {})",
            path.as_ref().display(),
            EvolutionConfig::section_name(),
            FitnessConfig::section_name(),
            DataConfig::section_name()
        );

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LegforgeError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)?;

        std::fs::write(path, toml_str)
            .map_err(|e| LegforgeError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, LegforgeError> {
        self.config
            .read()
            .map(|config| config.clone())
            .map_err(|_| LegforgeError::Configuration("Configuration lock poisoned".to_string()))
    }

    pub fn update<F>(&self, f: F) -> Result<(), LegforgeError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write_lock()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, LegforgeError> {
        self.config
            .write()
            .map_err(|_| LegforgeError::Configuration("Configuration lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legforge.toml");
        std::fs::write(
            &path,
            "[evolution]\npopulation_size = 40\nseed = 11\n\n[fitness]\ndesign_factor = 2.0\n",
        )
        .unwrap();

        let manager = ConfigManager::new();
        manager.load_from_file(&path).unwrap();
        let config = manager.get().unwrap();

        assert_eq!(config.evolution.population_size, 40);
        assert_eq!(config.evolution.seed, Some(11));
        assert_eq!(config.evolution.num_generations, 150);
        assert_eq!(config.fitness.design_factor, 2.0);
        assert_eq!(config.fitness.upper_band_factor, 5.0);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("legforge.toml");
        std::fs::write(&path, "[evolution]\npopulation_size = 1\n").unwrap();

        let manager = ConfigManager::new();
        assert!(manager.load_from_file(&path).is_err());
        assert_eq!(manager.get().unwrap().evolution.population_size, 100);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let manager = ConfigManager::new();
        manager
            .update(|config| config.evolution.num_generations = 12)
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        assert_eq!(reloaded.get().unwrap().evolution.num_generations, 12);
    }

    #[test]
    fn test_update_rejects_invalid_change() {
        let manager = ConfigManager::new();
        let result = manager.update(|config| config.fitness.design_factor = 0.5);
        assert!(result.is_err());
        assert_eq!(manager.get().unwrap().fitness.design_factor, 1.75);
    }
}
