#![doc = include_str!("../README.md")]

pub mod cluster;
pub mod error;
pub mod group;
pub mod ring;

pub use cluster::ClusterConfig;
pub use error::ConfigError;
pub use group::GroupConfig;
pub use ring::{HashKind, RingConfig};
