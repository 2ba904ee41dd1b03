//! Cassette data structures for recording and replaying port interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded interaction with an external port.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// Port name (`"directory"`, `"location"`, `"images"`).
    pub port: String,
    /// Method name invoked on the port.
    pub method: String,
    /// Input data sent to the port.
    pub input: serde_json::Value,
    /// Output data returned from the port.
    pub output: serde_json::Value,
}

/// A cassette containing a sequence of recorded interactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Version of `vtquest` that recorded it.
    pub app_version: String,
    /// Ordered list of interactions.
    pub interactions: Vec<Interaction>,
}

impl Cassette {
    /// Reads and parses a cassette YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error string if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_cassette_written_as_yaml() {
        let dir = std::env::temp_dir().join("vtquest_cassette_format_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("directory.cassette.yaml");

        let cassette = Cassette {
            name: "format-test".into(),
            recorded_at: Utc::now(),
            app_version: "0.1.0".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "directory".into(),
                method: "fetch".into(),
                input: json!({"location": "places.json"}),
                output: json!({"ok": "{}"}),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let loaded = Cassette::from_file(&path).unwrap();
        assert_eq!(loaded.interactions, cassette.interactions);
        assert_eq!(loaded.app_version, "0.1.0");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_cassette_names_the_path() {
        let err =
            Cassette::from_file(std::path::Path::new("/nonexistent/x.cassette.yaml")).unwrap_err();
        assert!(err.contains("/nonexistent/x.cassette.yaml"));
    }
}
