// SPDX-License-Identifier: AGPL-3.0-or-later
//! Editor configuration loaded from TOML

use crate::normalize::NormalizeConfig;
use crate::traits::{ImportConfig, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Every tunable of an editor; missing tables fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub normalize: NormalizeConfig,
    pub import: ImportConfig,
    pub render: RenderConfig,
}

impl EditorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}
