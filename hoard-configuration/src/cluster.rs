use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use hoard::{Group, Loader, Registry};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::group::GroupConfig;
use crate::ring::RingConfig;

/// Top-level configuration: one ring and any number of groups.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClusterConfig {
    #[serde(default)]
    pub ring: RingConfig,
    #[serde(default)]
    pub groups: Vec<GroupConfig>,
}

impl ClusterConfig {
    /// Parses a YAML document and checks that group names are unique.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigError::DuplicateGroup(group.name.clone()));
            }
        }
        Ok(())
    }

    /// Builds a registry holding one group per configured entry.
    ///
    /// `loaders` maps group names to their loaders. Every configured group
    /// needs one; extra loaders are ignored.
    pub fn into_registry(
        self,
        loaders: &HashMap<String, Arc<dyn Loader>>,
    ) -> Result<Registry, ConfigError> {
        self.validate()?;
        let registry = Registry::new();
        for group in self.groups {
            let loader = loaders
                .get(&group.name)
                .cloned()
                .ok_or_else(|| ConfigError::MissingLoader(group.name.clone()))?;
            let max_bytes = group.max_bytes();
            debug!(group = %group.name, max_bytes, "configuring group");
            registry.insert(Group::with_shared_loader(group.name, max_bytes, loader));
        }
        Ok(registry)
    }
}
