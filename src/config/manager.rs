use super::{
    features::FeatureConfig, metrics::MetricsConfig, signals::SignalConfig,
    simulation::SimulationConfig, traits::ConfigSection,
};
use crate::error::VolSpreadError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix for environment overrides, e.g. `VOLSPREAD__SIMULATION__HOLD_PERIOD=10`.
pub const ENV_PREFIX: &str = "VOLSPREAD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub signals: SignalConfig,
    pub simulation: SimulationConfig,
    pub metrics: MetricsConfig,
    pub features: FeatureConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), VolSpreadError> {
        self.signals.validate()?;
        self.simulation.validate()?;
        self.metrics.validate()?;
        self.features.validate()?;
        Ok(())
    }

    /// Defaults, then the optional file, then environment overrides.
    fn layered(path: Option<&Path>) -> Result<Self, VolSpreadError> {
        let mut builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config: AppConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
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

    /// Defaults with environment overrides only.
    pub fn from_env() -> Result<Self, VolSpreadError> {
        let config = AppConfig::layered(None)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), VolSpreadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(VolSpreadError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config = AppConfig::layered(Some(path))?;
        log::info!("Loaded configuration from {}", path.display());

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), VolSpreadError> {
        let toml_str = {
            let config = self.config.read().unwrap_or_else(|e| e.into_inner());
            toml::to_string_pretty(&*config)?
        };
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Applies `f` to a copy and only stores it if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), VolSpreadError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}
