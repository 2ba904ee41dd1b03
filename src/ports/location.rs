//! Location port for one-shot current-position fixes.

use serde::{Deserialize, Serialize};

use crate::directory::Coordinates;

/// Why a location fix could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum LocationError {
    /// The user has not authorized location monitoring.
    #[error("location monitoring is not authorized")]
    PermissionDenied,
    /// Location services are off or no fix could be determined.
    #[error("{0}")]
    Unavailable(String),
}

/// Provides the device's current position.
///
/// A request yields at most one fix; updates stop after the first one.
pub trait LocationService: Send + Sync {
    /// Requests a single best-effort fix.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::PermissionDenied`] when monitoring is not
    /// authorized, or [`LocationError::Unavailable`] with a message otherwise.
    fn current_fix(&self) -> Result<Coordinates, LocationError>;
}
