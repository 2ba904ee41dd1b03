//! Replaying adapter for the `LocationService` port.

use std::sync::Mutex;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::directory::Coordinates;
use crate::ports::{LocationError, LocationService};

/// Serves recorded location fixes from a cassette.
pub struct ReplayingLocationService {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingLocationService {
    /// Creates a replaying service backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl LocationService for ReplayingLocationService {
    fn current_fix(&self) -> Result<Coordinates, LocationError> {
        let output = next_output(&self.replayer, "location", "current_fix");
        if let Some(err) = output.get("err") {
            return Err(serde_json::from_value(err.clone()).unwrap_or_else(|_| {
                let reason = err.as_str().map_or_else(|| err.to_string(), String::from);
                LocationError::Unavailable(reason)
            }));
        }
        let value = output.get("ok").unwrap_or(&output);
        serde_json::from_value(value.clone()).map_err(|e| {
            LocationError::Unavailable(format!("location::current_fix: failed to deserialize: {e}"))
        })
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
                port: "location".into(),
                method: "current_fix".into(),
                input: json!({}),
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

    #[test]
    fn replays_fixes_and_structured_failures() {
        let service = ReplayingLocationService::new(make_replayer(vec![
            json!({"ok": {"latitude": 37.25, "longitude": -80.5}}),
            json!({"err": "PermissionDenied"}),
            json!({"err": {"Unavailable": "no signal"}}),
        ]));

        assert_eq!(service.current_fix().unwrap().to_string(), "37.25,-80.5");
        assert_eq!(service.current_fix(), Err(LocationError::PermissionDenied));
        assert_eq!(service.current_fix(), Err(LocationError::Unavailable("no signal".into())));
    }

    #[test]
    fn out_of_range_recorded_fix_is_unavailable() {
        let service = ReplayingLocationService::new(make_replayer(vec![json!({
            "ok": {"latitude": 500.0, "longitude": -80.5}
        })]));

        match service.current_fix() {
            Err(LocationError::Unavailable(reason)) => {
                assert!(reason.contains("latitude 500 is out of range"), "{reason}");
            }
            other => panic!("expected an unavailable fix, got {other:?}"),
        }
    }
}
