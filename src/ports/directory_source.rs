//! Directory source port for fetching the place directory document.

use std::future::Future;
use std::pin::Pin;

use super::BoxError;

/// Boxed future type alias used by [`DirectorySource`] to keep the trait dyn-compatible.
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<String, BoxError>> + Send + 'a>>;

/// Fetches the raw text of a directory document.
///
/// The location is either an `http(s)` URL or a local file path; the
/// caller decides how to parse the returned text.
pub trait DirectorySource: Send + Sync {
    /// Fetches the document at `location`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved (network,
    /// missing file, non-success HTTP status).
    fn fetch(&self, location: &str) -> SourceFuture<'_>;
}
