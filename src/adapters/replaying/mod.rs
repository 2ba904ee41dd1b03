//! Replaying adapters that serve recorded interactions.

pub mod directory_source;
pub mod images;
pub mod location;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::BoxError;

pub use directory_source::ReplayingDirectorySource;
pub use images::ReplayingImageFetcher;
pub use location::ReplayingLocationService;

/// Take the next recorded output for `port::method`.
///
/// A missing interaction is served as a recorded failure, so it reaches
/// callers through the port's normal error path.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = match replayer.lock() {
        Ok(guard) => guard,
        Err(e) => {
            let message = format!("{port}::{method}: replayer lock poisoned: {e}");
            return serde_json::json!({ "err": message });
        }
    };
    match replayer.next_interaction(port, method) {
        Ok(interaction) => interaction.output.clone(),
        Err(message) => {
            tracing::warn!(%port, %method, "{message}");
            serde_json::json!({ "err": message })
        }
    }
}

/// Decode a recorded `{"ok": v}` / `{"err": "message"}` output.
///
/// Mirror of `recording::record_result`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, BoxError> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
