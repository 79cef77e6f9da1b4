use bytesize::ByteSize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GroupConfig {
    pub name: String,
    /// Byte budget for keys plus values. Absent means unlimited.
    #[serde(default)]
    pub max_bytes: Option<ByteSize>,
}

impl GroupConfig {
    /// Budget in the form taken by the cache, where `0` disables eviction.
    pub fn max_bytes(&self) -> i64 {
        self.max_bytes
            .map(|size| i64::try_from(size.as_u64()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
