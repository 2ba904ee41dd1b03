//! Replaying adapter for the `ImageFetcher` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{ImageFetcher, ImageFuture};

/// Serves recorded image bytes from a cassette.
pub struct ReplayingImageFetcher {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingImageFetcher {
    /// Creates a replaying fetcher backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl ImageFetcher for ReplayingImageFetcher {
    fn fetch(&self, _url: &str) -> ImageFuture<'_> {
        let output = next_output(&self.replayer, "images", "fetch");
        Box::pin(async move { replay_result::<Vec<u8>>(&output, "images::fetch") })
    }
}
