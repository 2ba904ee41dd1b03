//! Image port for fetching place photos.

use std::future::Future;
use std::pin::Pin;

use super::BoxError;

/// Boxed future type alias used by [`ImageFetcher`].
pub type ImageFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, BoxError>> + Send + 'a>>;

/// Fetches the bytes behind an image URL.
pub trait ImageFetcher: Send + Sync {
    /// Fetches the image at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be retrieved.
    fn fetch(&self, url: &str) -> ImageFuture<'_>;
}
