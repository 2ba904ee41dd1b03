//! Location service backed by configuration.
//!
//! A command-line host has no positioning hardware, so the "device" fix is
//! whatever the user configured (`--at`, `VTQUEST_LOCATION`, or the config
//! file).

use crate::config::LocationConfig;
use crate::directory::Coordinates;
use crate::ports::{LocationError, LocationService};

/// Serves the configured position as the current fix.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocationService {
    config: LocationConfig,
}

impl ConfiguredLocationService {
    /// Creates a location service from the given settings.
    #[must_use]
    pub fn new(config: LocationConfig) -> Self {
        Self { config }
    }
}

impl LocationService for ConfiguredLocationService {
    fn current_fix(&self) -> Result<Coordinates, LocationError> {
        if !self.config.authorized {
            return Err(LocationError::PermissionDenied);
        }
        let fix = self.config.fix.as_deref().ok_or_else(|| {
            LocationError::Unavailable("no position configured; pass --at LAT,LNG".to_string())
        })?;
        fix.parse().map_err(LocationError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(fix: Option<&str>, authorized: bool) -> ConfiguredLocationService {
        ConfiguredLocationService::new(LocationConfig {
            fix: fix.map(String::from),
            authorized,
        })
    }

    #[test]
    fn serves_configured_fix() {
        let fix = service(Some("37.25,-80.5"), true).current_fix().unwrap();
        assert_eq!(fix.to_string(), "37.25,-80.5");
    }

    #[test]
    fn unauthorized_is_denied_even_with_a_fix() {
        assert_eq!(
            service(Some("37.25,-80.5"), false).current_fix(),
            Err(LocationError::PermissionDenied)
        );
    }

    #[test]
    fn missing_or_bad_fix_is_unavailable() {
        assert!(matches!(service(None, true).current_fix(), Err(LocationError::Unavailable(_))));
        assert!(matches!(
            service(Some("here"), true).current_fix(),
            Err(LocationError::Unavailable(_))
        ));
    }
}
