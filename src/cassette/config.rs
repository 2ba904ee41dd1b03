//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use super::session::port_cassette_path;

/// Per-port cassette file paths. Ports without a cassette path fail when
/// called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the directory source cassette file.
    pub directory: Option<PathBuf>,
    /// Path to the location service cassette file.
    pub location: Option<PathBuf>,
    /// Path to the image fetcher cassette file.
    pub images: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the directory source port.
    pub directory: Option<CassetteReplayer>,
    /// Replayer for the location service port.
    pub location: Option<CassetteReplayer>,
    /// Replayer for the image fetcher port.
    pub images: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Points each port at its cassette inside a recorded session directory,
    /// skipping ports whose file is absent.
    #[must_use]
    pub fn from_session_dir(dir: &Path) -> Self {
        let existing = |port: &str| Some(port_cassette_path(dir, port)).filter(|p| p.exists());
        Self {
            directory: existing("directory"),
            location: existing("location"),
            images: existing("images"),
        }
    }

    /// Load a single cassette file and create a replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_port_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        Ok(CassetteReplayer::new(&Cassette::from_file(path)?))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            directory: self.directory.as_deref().map(Self::load_port_cassette).transpose()?,
            location: self.location.as_deref().map(Self::load_port_cassette).transpose()?,
            images: self.images.as_deref().map(Self::load_port_cassette).transpose()?,
        })
    }
}
