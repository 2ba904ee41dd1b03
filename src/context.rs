//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{ConfiguredLocationService, LiveDirectorySource, LiveImageFetcher};
use crate::adapters::recording::{
    RecordingDirectorySource, RecordingImageFetcher, RecordingLocationService,
};
use crate::adapters::replaying::{
    ReplayingDirectorySource, ReplayingImageFetcher, ReplayingLocationService,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::AppConfig;
use crate::directory::Coordinates;
use crate::ports::{
    BoxError, DirectorySource, ImageFetcher, ImageFuture, LocationError, LocationService,
    SourceFuture,
};

/// Env var naming a directory to record a session into.
pub const RECORD_ENV: &str = "VTQUEST_RECORD";
/// Env var naming a cassette file or session directory to replay.
pub const REPLAY_ENV: &str = "VTQUEST_REPLAY";

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying, recording).
pub struct ServiceContext {
    /// Where the directory document comes from.
    pub source: Box<dyn DirectorySource>,
    /// One-shot current position.
    pub location: Box<dyn LocationService>,
    /// Place photos.
    pub images: Box<dyn ImageFetcher>,
}

impl ServiceContext {
    /// Creates a live context from the given configuration.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        Self {
            source: Box::new(LiveDirectorySource::new()),
            location: Box::new(ConfiguredLocationService::new(config.location.clone())),
            images: Box::new(LiveImageFetcher::new()),
        }
    }

    /// Creates a recording context that captures every port interaction
    /// into a new session directory under `root`.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(
        root: &Path,
        config: &AppConfig,
    ) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;
        let live = Self::live(config);
        let ctx = Self {
            source: Box::new(RecordingDirectorySource::new(
                live.source,
                session.directory.clone(),
            )),
            location: Box::new(RecordingLocationService::new(
                live.location,
                session.location.clone(),
            )),
            images: Box::new(RecordingImageFetcher::new(live.images, session.images.clone())),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from a single cassette file.
    ///
    /// Every port gets its own replayer over the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::from_file(path)?;
        Ok(Self {
            source: Box::new(ReplayingDirectorySource::new(CassetteReplayer::new(&cassette))),
            location: Box::new(ReplayingLocationService::new(CassetteReplayer::new(&cassette))),
            images: Box::new(ReplayingImageFetcher::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a cassette fail every call with a message naming the
    /// missing cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;
        Ok(Self {
            source: match replayers.directory {
                Some(r) => Box::new(ReplayingDirectorySource::new(r)),
                None => Box::new(Unconfigured),
            },
            location: match replayers.location {
                Some(r) => Box::new(ReplayingLocationService::new(r)),
                None => Box::new(Unconfigured),
            },
            images: match replayers.images {
                Some(r) => Box::new(ReplayingImageFetcher::new(r)),
                None => Box::new(Unconfigured),
            },
        })
    }

    /// Picks adapters from the environment: replay when `VTQUEST_REPLAY` is
    /// set, record when `VTQUEST_RECORD` is set, live otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette cannot be loaded or a session cannot start.
    pub fn from_env(config: &AppConfig) -> Result<(Self, Option<RecordingSession>), String> {
        if let Ok(path) = std::env::var(REPLAY_ENV) {
            let path = Path::new(&path);
            tracing::info!(cassette = %path.display(), "replaying recorded session");
            let ctx = if path.is_dir() {
                Self::replaying_from(&CassetteConfig::from_session_dir(path))?
            } else {
                Self::replaying(path)?
            };
            return Ok((ctx, None));
        }
        if let Ok(root) = std::env::var(RECORD_ENV) {
            let (ctx, session) = Self::recording_at(Path::new(&root), config)?;
            tracing::info!(dir = %session.output_dir().display(), "recording session");
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(config), None))
    }
}

// --- Adapter for ports without a cassette ---

struct Unconfigured;

fn unconfigured(port: &str) -> String {
    format!("{port} port not configured for replay: no cassette loaded for {port}")
}

impl DirectorySource for Unconfigured {
    fn fetch(&self, _location: &str) -> SourceFuture<'_> {
        Box::pin(async { Err::<String, BoxError>(unconfigured("directory").into()) })
    }
}

impl LocationService for Unconfigured {
    fn current_fix(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unavailable(unconfigured("location")))
    }
}

impl ImageFetcher for Unconfigured {
    fn fetch(&self, _url: &str) -> ImageFuture<'_> {
        Box::pin(async { Err::<Vec<u8>, BoxError>(unconfigured("images").into()) })
    }
}
