//! Configuration loading and management

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Where the schema definition text comes from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaSource {
    /// Schema definition given inline
    Inline { sdl: String },

    /// Schema definition read from a file
    Path { path: String },
}

impl SchemaSource {
    /// Produce the raw schema text
    pub fn load(&self) -> Result<String, ConfigError> {
        match self {
            SchemaSource::Inline { sdl } => Ok(sdl.clone()),
            SchemaSource::Path { path } => {
                std::fs::read_to_string(path).map_err(|source| ConfigError::SchemaIo {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

/// Complete configuration for the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema source (inline SDL or a file path)
    pub schema: SchemaSource,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
