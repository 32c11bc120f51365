//! Registry configuration loaded from environment variables.
//!
//! ## Variables
//!
//! - `MAPPER_DUPLICATE_POLICY` - `reject` or `replace` (default: `reject`)
//! - `MAPPER_CONVENTION_MAPPING` - `true` or `false` (default: `true`)

use crate::framework::error::MapperError;
use serde::Deserialize;
use std::str::FromStr;

/// What `create_mapping` does when the `(source, destination)` pair already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateMapping` and leave the existing definition untouched.
    #[default]
    Reject,
    /// Replace the existing definition.
    Replace,
}

impl FromStr for DuplicatePolicy {
    type Err = MapperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "replace" => Ok(DuplicatePolicy::Replace),
            other => Err(MapperError::Config(format!(
                "unknown duplicate policy `{other}`, expected `reject` or `replace`"
            ))),
        }
    }
}

/// Settings a registry is created with. Fixed for the registry's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Copy same-named members from the source when no resolver is registered.
    pub convention_mapping: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            convention_mapping: true,
        }
    }
}

impl MapperConfig {
    pub const DUPLICATE_POLICY_VAR: &'static str = "MAPPER_DUPLICATE_POLICY";
    pub const CONVENTION_MAPPING_VAR: &'static str = "MAPPER_CONVENTION_MAPPING";

    pub fn from_env() -> Result<Self, MapperError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds a config from any variable source. Unset variables keep their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MapperError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(Self::DUPLICATE_POLICY_VAR) {
            config.duplicate_policy = raw.parse()?;
        }

        if let Some(raw) = lookup(Self::CONVENTION_MAPPING_VAR) {
            config.convention_mapping = raw.trim().parse().map_err(|_| {
                MapperError::Config(format!(
                    "{} must be `true` or `false`, got `{raw}`",
                    Self::CONVENTION_MAPPING_VAR
                ))
            })?;
        }

        Ok(config)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_convention_mapping(mut self, enabled: bool) -> Self {
        self.convention_mapping = enabled;
        self
    }
}
