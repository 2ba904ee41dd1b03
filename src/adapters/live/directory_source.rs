//! Live adapter for the `DirectorySource` port.

use reqwest::Client;

use crate::ports::{BoxError, DirectorySource, SourceFuture};

/// Returns `true` for locations fetched over HTTP rather than read from disk.
pub(crate) fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches directory documents over HTTP(S) or from the local filesystem.
pub struct LiveDirectorySource {
    client: Client,
}

impl LiveDirectorySource {
    /// Creates a new live directory source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for LiveDirectorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectorySource for LiveDirectorySource {
    fn fetch(&self, location: &str) -> SourceFuture<'_> {
        let location = location.to_string();

        Box::pin(async move {
            if !is_remote(&location) {
                tracing::debug!(path = %location, "reading directory document from disk");
                return std::fs::read_to_string(&location).map_err(|e| -> BoxError {
                    format!("failed to read {location}: {e}").into()
                });
            }

            tracing::debug!(url = %location, "requesting directory document");
            let response = self.client.get(&location).send().await.map_err(|e| -> BoxError {
                format!("request failed: {e}").into()
            })?;

            let status = response.status();
            if !status.is_success() {
                return Err(format!("server answered {}", status.as_u16()).into());
            }

            response.text().await.map_err(|e| -> BoxError {
                format!("failed to read response body: {e}").into()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_locations_are_http_urls() {
        assert!(is_remote("http://manta.cs.vt.edu/VTQuest/LocationData.json"));
        assert!(is_remote("https://example.invalid/places.yaml"));
        assert!(!is_remote("places.json"));
        assert!(!is_remote("/srv/data/http-places.json"));
    }

    #[tokio::test]
    async fn reads_local_documents() {
        let dir = std::env::temp_dir().join("vtquest_live_source_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("places.json");
        std::fs::write(&path, "{}").unwrap();

        let source = LiveDirectorySource::new();
        let text = source.fetch(&path.display().to_string()).await.unwrap();
        assert_eq!(text, "{}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_local_document_is_an_error() {
        let err = LiveDirectorySource::new().fetch("/nonexistent/places.json").await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/places.json"));
    }
}
