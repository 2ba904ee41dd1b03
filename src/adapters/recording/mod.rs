//! Recording adapters that capture interactions to cassettes.

pub mod directory_source;
pub mod images;
pub mod location;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use directory_source::RecordingDirectorySource;
pub use images::RecordingImageFetcher;
pub use location::RecordingLocationService;

/// Record a `Result<T, E>` interaction using the ok/err JSON convention.
///
/// Mirror of `replaying::replay_result`.
///
/// Convention:
/// - `Ok(v)` is serialized as `{"ok": v}`
/// - `Err(e)` is serialized as `{"err": e.to_string()}`
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": to_json(v) }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    push(recorder, port, method, to_json(input), output);
}

/// Record an interaction whose output is serialized as-is.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    push(recorder, port, method, to_json(input), to_json(output));
}

fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unserializable cassette value");
        serde_json::Value::Null
    })
}

fn push(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(e) => tracing::warn!(%port, %method, error = %e, "recorder lock poisoned"),
    }
}
