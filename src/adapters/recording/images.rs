//! Recording adapter for the `ImageFetcher` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ImageFetcher, ImageFuture};

/// Records image fetches while delegating to an inner implementation.
pub struct RecordingImageFetcher {
    inner: Box<dyn ImageFetcher>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageFetcher {
    /// Creates a new recording fetcher wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageFetcher>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct FetchInput<'a> {
    url: &'a str,
}

impl ImageFetcher for RecordingImageFetcher {
    fn fetch(&self, url: &str) -> ImageFuture<'_> {
        let url = url.to_string();
        Box::pin(async move {
            let result = self.inner.fetch(&url).await;
            record_result(&self.recorder, "images", "fetch", &FetchInput { url: &url }, &result);
            result
        })
    }
}
