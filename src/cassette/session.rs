//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Ports with their own cassette file, in the order they are written.
pub const PORTS: [&str; 3] = ["directory", "location", "images"];

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing to a separate cassette file.
/// All cassettes are stored in a timestamped directory.
pub struct RecordingSession {
    /// Recorder for directory source interactions.
    pub directory: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for location service interactions.
    pub location: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for image fetcher interactions.
    pub images: Arc<Mutex<CassetteRecorder>>,
    /// Output directory containing all cassette files.
    output_dir: PathBuf,
}

/// Path of `port`'s cassette inside a session directory.
#[must_use]
pub fn port_cassette_path(dir: &Path, port: &str) -> PathBuf {
    dir.join(format!("{port}.cassette.yaml"))
}

impl RecordingSession {
    /// Create a new recording session in a timestamped directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session directory already exists
    /// - The directory cannot be created
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(port_cassette_path(&output_dir, port), name)))
        };

        Ok(Self {
            directory: make_recorder("directory"),
            location: make_recorder("location"),
            images: make_recorder("images"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a cassette
    /// file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.directory, "directory")?;
        finish_one(self.location, "location")?;
        finish_one(self.images, "images")?;

        Ok(self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_one_cassette_per_port() {
        let root = std::env::temp_dir().join("vtquest_session_test");
        let session = RecordingSession::new(&root).expect("session should start");
        let dir = session.output_dir().to_path_buf();
        assert!(dir.exists());

        let written = session.finish().expect("finish should succeed");
        assert_eq!(written, dir);
        for port in PORTS {
            assert!(port_cassette_path(&dir, port).exists(), "missing {port} cassette");
        }

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn finish_fails_while_an_adapter_holds_a_recorder() {
        let root = std::env::temp_dir().join("vtquest_session_held_test");
        let session = RecordingSession::new(&root).unwrap();
        let held = Arc::clone(&session.location);

        let err = session.finish().unwrap_err();
        assert!(err.contains("location"));

        drop(held);
        let _ = std::fs::remove_dir_all(&root);
    }
}
