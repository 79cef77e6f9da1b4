use hoard::{DEFAULT_REPLICAS, HashFn, HashRing, SharedRing, crc32_ieee};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ConfigError;

/// Hash function used to place keys and virtual points.
///
/// Every node of a cluster must use the same one.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
pub enum HashKind {
    /// CRC-32 with the IEEE polynomial.
    #[default]
    Crc32,
}

impl HashKind {
    /// Convert configuration hash kind to a ring hash function.
    pub fn to_hash_fn(self) -> HashFn {
        match self {
            HashKind::Crc32 => Arc::new(crc32_ieee),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RingConfig {
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    #[serde(default)]
    pub hash: HashKind,
    /// Nodes placed on the ring at startup.
    #[serde(default)]
    pub nodes: Vec<String>,
}

fn default_replicas() -> usize {
    DEFAULT_REPLICAS
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hash: HashKind::default(),
            nodes: Vec::new(),
        }
    }
}

impl RingConfig {
    pub fn into_ring(self) -> Result<HashRing, ConfigError> {
        let mut ring = HashRing::builder()
            .replicas(self.replicas)
            .hash_fn(self.hash.to_hash_fn())
            .build()?;
        ring.add_nodes(self.nodes);
        Ok(ring)
    }

    pub fn into_shared_ring(self) -> Result<SharedRing, ConfigError> {
        self.into_ring().map(SharedRing::new)
    }
}
