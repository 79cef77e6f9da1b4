use std::future::Future;

use async_trait::async_trait;
use hoard_core::Raw;

/// Boxed error type returned by loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Loads the value for a key that is not cached.
///
/// Implement it for a database client, file reader or remote API. Plain
/// async closures taking the key as a `String` implement it as well:
///
/// ```
/// use bytes::Bytes;
/// use hoard::{BoxError, Loader};
///
/// fn assert_loader<L: Loader>(_: &L) {}
///
/// let echo = |key: String| async move { Ok::<_, BoxError>(Bytes::from(key)) };
/// assert_loader(&echo);
/// ```
///
/// Errors are handed back to the caller of [`Group::get`](crate::Group::get)
/// and are not cached.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Produces the value for `key`.
    async fn load(&self, key: &str) -> Result<Raw, BoxError>;
}

#[async_trait]
impl<F, Fut> Loader for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Raw, BoxError>> + Send + 'static,
{
    async fn load(&self, key: &str) -> Result<Raw, BoxError> {
        (self)(key.to_owned()).await
    }
}
