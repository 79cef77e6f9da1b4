//! Builder for configuring [`HashRing`].

use std::sync::Arc;

use hoard_core::{HashFn, default_hash};

use crate::error::RingError;
use crate::ring::HashRing;

/// Virtual points per node used when no replica count is configured.
pub const DEFAULT_REPLICAS: usize = 50;

/// Builder for creating a [`HashRing`].
///
/// Use [`HashRing::builder`] to create a new builder instance. Replica count
/// and hash are fixed for the lifetime of the ring.
///
/// # Example
///
/// ```
/// use hoard_ring::HashRing;
///
/// let ring = HashRing::builder()
///     .replicas(100)
///     .hasher(|data: &[u8]| data.iter().map(|&b| u32::from(b)).sum())
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.replicas(), 100);
/// ```
#[derive(Clone)]
pub struct HashRingBuilder {
    replicas: usize,
    hash: Option<HashFn>,
}

impl HashRingBuilder {
    /// Creates a builder with [`DEFAULT_REPLICAS`] and the CRC-32 hash.
    pub fn new() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hash: None,
        }
    }

    /// Sets the number of virtual points each node contributes.
    ///
    /// More replicas smooth the key distribution and reduce how much load
    /// shifts when a node joins or leaves, at the cost of a larger ring.
    ///
    /// # Default
    ///
    /// [`DEFAULT_REPLICAS`]
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Sets the hash function from a closure or function.
    ///
    /// # Default
    ///
    /// [`crc32_ieee`](hoard_core::crc32_ieee)
    pub fn hasher<F>(mut self, hash: F) -> Self
    where
        F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
    {
        self.hash = Some(Arc::new(hash));
        self
    }

    /// Sets an already shared hash function.
    pub fn hash_fn(mut self, hash: HashFn) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Builds the [`HashRing`].
    ///
    /// Fails with [`RingError::InvalidReplicas`] if the replica count is zero.
    pub fn build(self) -> Result<HashRing, RingError> {
        if self.replicas == 0 {
            return Err(RingError::InvalidReplicas(self.replicas));
        }
        let hash = self.hash.unwrap_or_else(default_hash);
        Ok(HashRing::from_parts(self.replicas, hash))
    }
}

impl Default for HashRingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HashRingBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashRingBuilder")
            .field("replicas", &self.replicas)
            .field("custom_hash", &self.hash.is_some())
            .finish()
    }
}
