#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod ring;
mod shared;

pub use builder::{DEFAULT_REPLICAS, HashRingBuilder};
pub use error::RingError;
pub use hoard_core::{HashFn, NodeName, crc32_ieee};
pub use ring::HashRing;
pub use shared::SharedRing;
