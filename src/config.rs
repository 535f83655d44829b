use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::mapping::{CoordinateMapper, DomainPolicy};

pub const CONFIG_FILE: &str = "scatterfit.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub margin: f32,
    pub domain: DomainPolicy,
    /// Defaults to a step that suits the domain policy.
    pub tick_step: Option<f64>,
    pub hover_tolerance: f64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            margin: 40.0,
            domain: DomainPolicy::default(),
            tick_step: None,
            hover_tolerance: 7.0,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Config, ConfigLoadError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads [`CONFIG_FILE`] from the working directory, a missing file
    /// gives the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Config, ConfigLoadError> {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(s) => Self::from_toml_str(&s),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Settings the mapper cannot work with are replaced by their defaults.
    pub fn mapper(&self) -> CoordinateMapper {
        if !self.domain.is_valid() {
            warn!(
                "domain {:?} has no positive scale_max, using {:?}",
                self.domain,
                DomainPolicy::default()
            );
        }
        let mapper = CoordinateMapper::new(
            self.canvas_width as f64,
            self.canvas_height as f64,
            self.margin as f64,
            self.domain,
        )
        .with_hover_tolerance(self.hover_tolerance);
        match self.tick_step {
            Some(step) if mapper.accepts_tick_step(step) => mapper.with_tick_step(step),
            Some(step) => {
                warn!(
                    "tick_step {} is not usable, keeping {}",
                    step,
                    mapper.tick_step()
                );
                mapper
            }
            None => mapper,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    IllegalConfigEntry(#[from] toml::de::Error),
}
