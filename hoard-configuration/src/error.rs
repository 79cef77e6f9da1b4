use hoard::RingError;
use thiserror::Error;

/// Errors raised while reading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// The ring settings were rejected.
    #[error(transparent)]
    Ring(#[from] RingError),

    /// A configured group has no loader.
    #[error("no loader provided for group `{0}`")]
    MissingLoader(String),

    /// Two groups share a name.
    #[error("group `{0}` is configured more than once")]
    DuplicateGroup(String),
}
