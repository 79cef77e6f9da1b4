use thiserror::Error;

use crate::loader::BoxError;

/// Errors returned by [`Group`](crate::Group) and [`Registry`](crate::Registry) lookups.
///
/// Cache misses are not errors; they are served by the loader. Only the
/// conditions below reach the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The requested key was empty.
    #[error("key is required")]
    EmptyKey,

    /// The loader failed to produce a value.
    ///
    /// The failure is not cached: the next request for the same key calls
    /// the loader again.
    #[error("failed to load key `{key}`: {source}")]
    Load {
        /// Key that was being loaded.
        key: String,
        /// Error returned by the loader.
        source: BoxError,
    },

    /// No group is registered under the requested name.
    #[error("no such group: {0}")]
    NoSuchGroup(String),
}
