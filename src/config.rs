//! Engine Configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::typography::TypeScale;

pub const DEFAULT_NET_QUANTITY_UNIT: &str = "oz";

pub const COTTAGE_FOOD_DISCLAIMER: &str = "MADE IN A HOME KITCHEN THAT HAS NOT BEEN INSPECTED BY THE STATE OR LOCAL HEALTH DEPARTMENT.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailureMode {
    /// Errors stop composition.
    #[default]
    Block,
    /// Violations are reported, composition proceeds.
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default = "default_unit")]
    pub default_net_quantity_unit: String,
    #[serde(default)]
    pub type_scale: TypeScale,
    #[serde(default)]
    pub failure_mode: FailureMode,
    #[serde(default = "default_disclaimer")]
    pub cottage_disclaimer: String,
}

fn default_unit() -> String { DEFAULT_NET_QUANTITY_UNIT.to_string() }
fn default_disclaimer() -> String { COTTAGE_FOOD_DISCLAIMER.to_string() }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_net_quantity_unit: default_unit(),
            type_scale: TypeScale::default(),
            failure_mode: FailureMode::default(),
            cottage_disclaimer: default_disclaimer(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
