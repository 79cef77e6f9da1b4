#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cache;
pub mod metrics;
mod sync;

pub use builder::LruCacheBuilder;
pub use cache::{EvictionCallback, Keys, LruCache};
pub use hoard_core::ByteSize;
pub use sync::SyncLruCache;
