//! Recording adapter for the `DirectorySource` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{DirectorySource, SourceFuture};

/// Records directory fetches while delegating to an inner implementation.
pub struct RecordingDirectorySource {
    inner: Box<dyn DirectorySource>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingDirectorySource {
    /// Creates a new recording source wrapping the given implementation.
    pub fn new(inner: Box<dyn DirectorySource>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct FetchInput<'a> {
    location: &'a str,
}

impl DirectorySource for RecordingDirectorySource {
    fn fetch(&self, location: &str) -> SourceFuture<'_> {
        let location = location.to_string();
        Box::pin(async move {
            let result = self.inner.fetch(&location).await;
            let input = FetchInput {
                location: &location,
            };
            record_result(&self.recorder, "directory", "fetch", &input, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveDirectorySource;

    #[tokio::test]
    async fn records_failed_fetch_as_err() {
        let dir = std::env::temp_dir().join("vtquest_rec_directory_test");
        let cassette_path = dir.join("directory.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&cassette_path, "test")));

        {
            let source = RecordingDirectorySource::new(
                Box::new(LiveDirectorySource::new()),
                Arc::clone(&recorder),
            );
            assert!(source.fetch("/nonexistent/places.json").await.is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&cassette_path).unwrap();
        assert!(content.contains("directory"));
        assert!(content.contains("/nonexistent/places.json"));
        assert!(content.contains("err"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
