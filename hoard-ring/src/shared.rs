//! Copy-on-write ring for concurrent lookups.

use std::sync::{Arc, PoisonError, RwLock};

use hoard_core::NodeName;

use crate::ring::HashRing;

/// Thread-safe [`HashRing`] with copy-on-write membership changes.
///
/// Readers take a cheap [`snapshot`](Self::snapshot) (an `Arc` clone under a
/// short read lock) and then locate keys without holding any lock. Writers
/// serialize on the write lock; when snapshots are still alive the ring is
/// cloned before being modified, so those readers keep a consistent view.
///
/// # Example
///
/// ```
/// use hoard_ring::{HashRing, SharedRing};
///
/// let ring = SharedRing::new(HashRing::new(50).unwrap());
/// ring.add_nodes(["peer-a", "peer-b"]);
///
/// let before = ring.snapshot();
/// ring.remove_nodes(["peer-a"]);
///
/// assert_eq!(before.nodes().len(), 2);
/// assert_eq!(ring.locate("key").unwrap().as_str(), "peer-b");
/// ```
#[derive(Debug)]
pub struct SharedRing {
    current: RwLock<Arc<HashRing>>,
}

impl SharedRing {
    /// Wraps a ring for shared use.
    pub fn new(ring: HashRing) -> Self {
        Self {
            current: RwLock::new(Arc::new(ring)),
        }
    }

    /// Returns the current ring.
    ///
    /// The snapshot is immutable; later membership changes are not visible
    /// through it.
    pub fn snapshot(&self) -> Arc<HashRing> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Returns the node owning `key` on the current ring.
    pub fn locate(&self, key: &str) -> Option<NodeName> {
        self.snapshot().locate(key).cloned()
    }

    /// Adds nodes. See [`HashRing::add_nodes`].
    pub fn add_nodes<I>(&self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        self.update(|ring| ring.add_nodes(nodes));
    }

    /// Removes nodes. See [`HashRing::remove_nodes`].
    pub fn remove_nodes<I>(&self, nodes: I)
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        self.update(|ring| ring.remove_nodes(nodes));
    }

    fn update(&self, f: impl FnOnce(&mut HashRing)) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut *guard));
    }
}

impl From<HashRing> for SharedRing {
    fn from(ring: HashRing) -> Self {
        Self::new(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_snapshot_is_isolated_from_updates() {
        let shared = SharedRing::new(HashRing::new(8).unwrap());
        let empty = shared.snapshot();
        shared.add_nodes(["a"]);

        assert!(empty.is_empty());
        assert_eq!(shared.snapshot().len(), 8);
        assert_eq!(shared.locate("x").unwrap(), "a");
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let shared = Arc::new(SharedRing::new(HashRing::new(32).unwrap()));
        shared.add_nodes(["n0"]);

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..500 {
                        let snapshot = shared.snapshot();
                        let key = format!("key-{i}");
                        let first = snapshot.locate(&key).cloned();
                        assert!(first.is_some());
                        assert_eq!(snapshot.locate(&key).cloned(), first);
                    }
                })
            })
            .collect();

        for i in 1..20 {
            shared.add_nodes([format!("n{i}")]);
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(shared.snapshot().nodes().len(), 20);
    }
}
