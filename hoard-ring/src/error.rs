use thiserror::Error;

/// Errors raised while constructing a [`HashRing`](crate::HashRing).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingError {
    /// The replica count must be at least one.
    #[error("invalid replica count {0}: every node needs at least one virtual point")]
    InvalidReplicas(usize),
}
