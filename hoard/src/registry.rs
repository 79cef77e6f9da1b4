use std::sync::Arc;

use dashmap::DashMap;
use hoard_core::ByteView;
use smol_str::SmolStr;
use tracing::{debug, info};

use crate::error::CacheError;
use crate::group::Group;
use crate::loader::Loader;

/// Thread-safe collection of [`Group`]s keyed by name.
///
/// The registry is an explicit value instead of process-wide state: create
/// one, register groups on it and share it by cloning (clones refer to the
/// same groups).
#[derive(Clone, Default)]
pub struct Registry {
    groups: Arc<DashMap<SmolStr, Arc<Group>>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and registers it under `name`.
    ///
    /// A group already registered under the same name is replaced; callers
    /// still holding it keep a working, detached group.
    pub fn new_group(
        &self,
        name: impl Into<SmolStr>,
        max_bytes: i64,
        loader: impl Loader + 'static,
    ) -> Arc<Group> {
        self.insert(Group::new(name, max_bytes, loader))
    }

    /// Registers an already built group, replacing any group with its name.
    pub fn insert(&self, group: Group) -> Arc<Group> {
        let name = SmolStr::new(group.name());
        let group = Arc::new(group);
        if self.groups.insert(name.clone(), Arc::clone(&group)).is_some() {
            info!(group = %name, "replaced existing group");
        } else {
            debug!(group = %name, "registered group");
        }
        group
    }

    /// Returns the group registered under `name`.
    pub fn group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Unregisters and returns the group registered under `name`.
    pub fn remove_group(&self, name: &str) -> Option<Arc<Group>> {
        self.groups.remove(name).map(|(_, group)| group)
    }

    /// Looks up `key` in the group registered under `group`.
    pub async fn get(&self, group: &str, key: &str) -> Result<ByteView, CacheError> {
        // clone the handle out so no shard lock is held across the load
        let handle = self
            .group(group)
            .ok_or_else(|| CacheError::NoSuchGroup(group.to_owned()))?;
        handle.get(key).await
    }

    /// Returns the number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the registered group names, sorted.
    pub fn names(&self) -> Vec<SmolStr> {
        let mut names: Vec<_> = self.groups.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("groups", &self.names())
            .finish()
    }
}
