//! Immutable byte blob handed out by cache groups.

use std::fmt;

use bytes::Bytes;

use crate::size::ByteSize;

/// A read-only view over a contiguous chunk of bytes.
///
/// `ByteView` is what cache groups store and return. Cloning is cheap
/// (reference counted), and nothing reachable through a view can modify
/// the underlying bytes, so a view obtained from the cache can be shared
/// freely without affecting the cached copy.
///
/// # Example
///
/// ```
/// use hoard_core::ByteView;
///
/// let view = ByteView::from("630");
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.to_string(), "630");
///
/// let mut copy = view.to_vec();
/// copy[0] = b'9';
/// assert_eq!(view.as_bytes(), b"630");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteView(Bytes);

impl ByteView {
    /// Creates a view by copying `data`.
    ///
    /// Use this when the source buffer is owned by someone else and may
    /// be reused or mutated after the call.
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(data))
    }

    /// Returns the number of bytes in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the view holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a borrowed slice of the bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns an owned copy of the bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Returns the underlying [`Bytes`] handle without copying.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

impl ByteSize for ByteView {
    #[inline]
    fn byte_size(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for ByteView {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteView").field(&self.0).finish()
    }
}

impl From<Bytes> for ByteView {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl From<String> for ByteView {
    fn from(s: String) -> Self {
        Self(Bytes::from(s))
    }
}

impl From<&str> for ByteView {
    fn from(s: &str) -> Self {
        Self::copy_from_slice(s.as_bytes())
    }
}
