//! Live adapter for the `ImageFetcher` port.

use reqwest::Client;

use super::directory_source::is_remote;
use crate::ports::{BoxError, ImageFetcher, ImageFuture};

/// Fetches images over HTTP(S), or from disk for plain paths.
pub struct LiveImageFetcher {
    client: Client,
}

impl LiveImageFetcher {
    /// Creates a new live image fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for LiveImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageFetcher for LiveImageFetcher {
    fn fetch(&self, url: &str) -> ImageFuture<'_> {
        let url = url.to_string();

        Box::pin(async move {
            if !is_remote(&url) {
                return std::fs::read(&url).map_err(|e| -> BoxError { e.into() });
            }

            let response = self.client.get(&url).send().await.map_err(|e| -> BoxError {
                format!("request failed: {e}").into()
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(format!("server answered {}", status.as_u16()).into());
            }
            let bytes = response.bytes().await.map_err(|e| -> BoxError {
                format!("failed to read image body: {e}").into()
            })?;
            Ok(bytes.to_vec())
        })
    }
}
