#![warn(missing_docs)]
//! # hoard-core
//!
//! Shared building blocks for the hoard look-aside cache.
//!
//! The two core data structures of hoard live in their own crates:
//! `hoard-lru` (the byte-bounded eviction cache) and `hoard-ring`
//! (the consistent-hash ring). This crate holds the small pieces both of
//! them, and the orchestrating `hoard` crate, agree on:
//!
//! - [`ByteSize`] - how many bytes a stored value accounts for
//! - [`ByteView`] - an immutable, cheaply cloneable byte blob
//! - [`NodeName`] - an opaque cluster node identifier
//! - [`HashFn`] - the pluggable 32-bit hash used to place keys on the ring

pub mod hash;
pub mod node;
pub mod size;
pub mod view;

pub use hash::{HashFn, crc32_ieee, default_hash};
pub use node::NodeName;
pub use size::ByteSize;
pub use view::ByteView;

/// Raw byte data type used for loaded and cached payloads.
pub type Raw = bytes::Bytes;
