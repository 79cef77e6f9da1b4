//! Consistent hashing ring implementation.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use hoard_core::{HashFn, NodeName};
use tracing::debug;

use crate::builder::HashRingBuilder;
use crate::error::RingError;

/// Consistent hashing ring for deterministic key placement.
///
/// Each real node is mapped to `replicas` virtual points on a `u32` ring.
/// The point for replica `i` of node `name` is `hash(format!("{i}{name}"))`.
/// A key is owned by the node of the first point at or after `hash(key)`;
/// keys hashing past the last point wrap around to the first one.
///
/// Points are kept in a sorted vector, so lookups are a binary search.
/// Two points that collide are both kept in the vector, while ownership of
/// the colliding position goes to whichever node was added last.
///
/// The ring is not internally synchronized; see [`SharedRing`](crate::SharedRing)
/// for concurrent use.
#[derive(Clone)]
pub struct HashRing {
    hash: HashFn,
    replicas: usize,
    points: Vec<u32>,
    owners: HashMap<u32, NodeName>,
}

impl HashRing {
    /// Creates an empty ring with `replicas` virtual points per node and the
    /// default CRC-32 hash.
    ///
    /// Fails with [`RingError::InvalidReplicas`] when `replicas` is zero.
    pub fn new(replicas: usize) -> Result<Self, RingError> {
        Self::builder().replicas(replicas).build()
    }

    /// Creates a new builder for `HashRing`.
    pub fn builder() -> HashRingBuilder {
        HashRingBuilder::new()
    }

    pub(crate) fn from_parts(replicas: usize, hash: HashFn) -> Self {
        Self {
            hash,
            replicas,
            points: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Adds nodes to the ring.
    ///
    /// Every node contributes `replicas` virtual points. Names are not
    /// deduplicated: adding a node that is already present inserts its
    /// points again.
    pub fn add_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        for node in nodes {
            let node = node.into();
            for replica in 0..self.replicas {
                let point = self.virtual_point(replica, &node);
                self.points.push(point);
                self.owners.insert(point, node.clone());
            }
            debug!(node = %node, replicas = self.replicas, "added node to ring");
        }
        self.points.sort_unstable();
    }

    /// Removes nodes from the ring.
    ///
    /// The virtual points of every named node are recomputed and dropped.
    /// Removing an unknown node is a no-op, unless one of its computed points
    /// collides with a point of a node still on the ring.
    pub fn remove_nodes<I>(&mut self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        let mut removed = HashSet::new();
        for node in nodes {
            let node = node.into();
            for replica in 0..self.replicas {
                let point = self.virtual_point(replica, &node);
                self.owners.remove(&point);
                removed.insert(point);
            }
            debug!(node = %node, "removed node from ring");
        }
        // retain keeps relative order, so the ring stays sorted
        self.points.retain(|point| !removed.contains(point));
    }

    /// Returns the node owning `key`, or `None` if the ring is empty.
    pub fn locate(&self, key: &str) -> Option<&NodeName> {
        if self.points.is_empty() {
            return None;
        }
        let hash = (self.hash)(key.as_bytes());
        let idx = self.points.partition_point(|&point| point < hash);
        let point = self.points[idx % self.points.len()];
        self.owners.get(&point)
    }

    /// Returns the number of virtual points per node.
    #[inline]
    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Returns the number of virtual points on the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the ring has no virtual points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the distinct real nodes owning at least one point, sorted.
    pub fn nodes(&self) -> Vec<NodeName> {
        self.owners
            .values()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns `true` if `node` owns at least one point.
    pub fn contains_node(&self, node: &str) -> bool {
        self.owners.values().any(|owner| owner.as_str() == node)
    }

    /// Returns the sorted virtual points.
    pub fn points(&self) -> &[u32] {
        &self.points
    }

    fn virtual_point(&self, replica: usize, node: &NodeName) -> u32 {
        let input = format!("{replica}{node}");
        (self.hash)(input.as_bytes())
    }
}

impl fmt::Debug for HashRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("replicas", &self.replicas)
            .field("points", &self.points.len())
            .field("nodes", &self.nodes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_ring(replicas: usize) -> HashRing {
        HashRing::builder()
            .replicas(replicas)
            .hasher(|key: &[u8]| {
                std::str::from_utf8(key)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0)
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_zero_replicas_rejected() {
        assert_eq!(HashRing::new(0).unwrap_err(), RingError::InvalidReplicas(0));
    }

    #[test]
    fn test_empty_ring_locates_nothing() {
        let ring = HashRing::new(3).unwrap();
        assert!(ring.is_empty());
        assert!(ring.locate("anything").is_none());
    }

    #[test]
    fn test_virtual_points_sorted() {
        let mut ring = identity_ring(3);
        ring.add_nodes(["2", "4", "6"]);
        assert_eq!(ring.points(), &[2, 4, 6, 12, 14, 16, 22, 24, 26]);
        assert_eq!(ring.len(), 9);
    }

    #[test]
    fn test_remove_keeps_order_and_owners_in_sync() {
        let mut ring = identity_ring(3);
        ring.add_nodes(["2", "4", "6", "8"]);
        ring.remove_nodes(["4"]);
        assert_eq!(ring.points(), &[2, 6, 8, 12, 16, 18, 22, 26, 28]);
        assert_eq!(ring.owners.len(), ring.len());
        assert!(!ring.contains_node("4"));
        assert_eq!(ring.nodes(), vec![NodeName::from("2"), "6".into(), "8".into()]);
    }

    #[test]
    fn test_remove_unknown_node_is_noop() {
        let mut ring = identity_ring(3);
        ring.add_nodes(["2", "4"]);
        ring.remove_nodes(["7"]);
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn test_remove_all_nodes_empties_ring() {
        let mut ring = HashRing::new(16).unwrap();
        ring.add_nodes(["a", "b"]);
        ring.remove_nodes(["a", "b"]);
        assert!(ring.is_empty());
        assert!(ring.owners.is_empty());
        assert!(ring.locate("key").is_none());
    }

    #[test]
    fn test_readding_node_duplicates_points() {
        let mut ring = identity_ring(2);
        ring.add_nodes(["3"]);
        ring.add_nodes(["3"]);
        assert_eq!(ring.points(), &[3, 3, 13, 13]);
        assert_eq!(ring.locate("5").map(NodeName::as_str), Some("3"));

        ring.remove_nodes(["3"]);
        assert!(ring.is_empty());
    }

    #[test]
    fn test_collision_last_write_wins() {
        // every point collides on 7
        let mut ring = HashRing::builder()
            .replicas(2)
            .hasher(|_: &[u8]| 7)
            .build()
            .unwrap();
        ring.add_nodes(["first", "second"]);
        assert_eq!(ring.points(), &[7, 7, 7, 7]);
        assert_eq!(ring.locate("k").map(NodeName::as_str), Some("second"));
    }
}
