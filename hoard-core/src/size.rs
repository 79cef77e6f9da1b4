//! Byte accounting for cached values.

use bytes::Bytes;
use smol_str::SmolStr;

/// Reports the number of bytes a value occupies for cache accounting.
///
/// The eviction cache never looks inside stored values; it only asks them
/// for their size. An entry is accounted as `key.len() + value.byte_size()`.
///
/// # Example
///
/// ```
/// use hoard_core::ByteSize;
///
/// struct Blob(Vec<u8>);
///
/// impl ByteSize for Blob {
///     fn byte_size(&self) -> usize {
///         self.0.len()
///     }
/// }
///
/// assert_eq!(Blob(vec![0; 16]).byte_size(), 16);
/// ```
pub trait ByteSize {
    /// Returns the accounted size of this value in bytes.
    fn byte_size(&self) -> usize;
}

impl ByteSize for Bytes {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Vec<u8> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for Box<[u8]> {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for String {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for &'static str {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl ByteSize for SmolStr {
    #[inline]
    fn byte_size(&self) -> usize {
        self.len()
    }
}

impl<T: ByteSize + ?Sized> ByteSize for std::sync::Arc<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        (**self).byte_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_string_like_sizes() {
        assert_eq!(String::from("value1").byte_size(), 6);
        assert_eq!("k2".byte_size(), 2);
        assert_eq!(SmolStr::new("abc").byte_size(), 3);
    }

    #[test]
    fn test_byte_containers() {
        assert_eq!(vec![1u8, 2, 3].byte_size(), 3);
        assert_eq!(Bytes::from_static(b"1234").byte_size(), 4);
        assert_eq!(vec![0u8; 5].into_boxed_slice().byte_size(), 5);
    }

    #[test]
    fn test_arc_delegates_to_inner() {
        let shared: Arc<String> = Arc::new("shared".to_string());
        assert_eq!(shared.byte_size(), 6);
    }
}
