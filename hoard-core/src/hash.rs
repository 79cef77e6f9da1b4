//! Pluggable 32-bit hashing for ring placement.

use std::sync::Arc;

/// A hash function mapping bytes onto the 32-bit ring space.
///
/// The function is shared cluster configuration: every participant must
/// use the same one, or nodes will disagree about key ownership.
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// CRC-32 checksum with the IEEE polynomial.
///
/// This is the checksum used by zlib, PNG and Ethernet, so any process,
/// in any language, can reproduce ring positions.
///
/// ```
/// assert_eq!(hoard_core::crc32_ieee(b"123456789"), 0xCBF4_3926);
/// ```
#[inline]
pub fn crc32_ieee(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Returns the default ring hash, [`crc32_ieee`].
pub fn default_hash() -> HashFn {
    Arc::new(crc32_ieee)
}
