//! Replaying adapter for the `DirectorySource` port.

use std::sync::Mutex;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{DirectorySource, SourceFuture};

/// Serves recorded directory documents from a cassette.
pub struct ReplayingDirectorySource {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingDirectorySource {
    /// Creates a replaying source backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl DirectorySource for ReplayingDirectorySource {
    fn fetch(&self, _location: &str) -> SourceFuture<'_> {
        let output = next_output(&self.replayer, "directory", "fetch");
        Box::pin(async move { replay_result::<String>(&output, "directory::fetch") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(outputs: Vec<serde_json::Value>) -> CassetteReplayer {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|(output, seq)| Interaction {
                seq,
                port: "directory".into(),
                method: "fetch".into(),
                input: json!({"location": "places.json"}),
                output,
            })
            .collect();
        CassetteReplayer::new(&Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            app_version: "0.1.0".into(),
            interactions,
        })
    }

    #[tokio::test]
    async fn replays_documents_then_failures() {
        let source = ReplayingDirectorySource::new(make_replayer(vec![
            json!({"ok": "{\"Bell Hall\": {}}"}),
            json!({"err": "server answered 503"}),
        ]));

        assert_eq!(source.fetch("places.json").await.unwrap(), "{\"Bell Hall\": {}}");
        let err = source.fetch("places.json").await.unwrap_err();
        assert_eq!(err.to_string(), "server answered 503");
    }
}
