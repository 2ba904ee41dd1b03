//! Recording adapter for the `LocationService` port.

use std::sync::{Arc, Mutex};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::directory::Coordinates;
use crate::ports::{LocationError, LocationService};

/// Records location fixes while delegating to an inner implementation.
///
/// Failures are recorded structurally so replay can tell a denied
/// permission from an unavailable fix.
pub struct RecordingLocationService {
    inner: Box<dyn LocationService>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingLocationService {
    /// Creates a new recording service wrapping the given implementation.
    pub fn new(inner: Box<dyn LocationService>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl LocationService for RecordingLocationService {
    fn current_fix(&self) -> Result<Coordinates, LocationError> {
        let result = self.inner.current_fix();
        let output = match &result {
            Ok(fix) => serde_json::json!({ "ok": fix }),
            Err(e) => serde_json::json!({ "err": e }),
        };
        let input = serde_json::json!({});
        record_interaction(&self.recorder, "location", "current_fix", &input, &output);
        result
    }
}
