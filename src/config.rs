//! Layered application configuration.
//!
//! Values are resolved in order, later layers winning:
//!
//! 1. built-in defaults,
//! 2. a YAML file (`--config <PATH>`, or `vtquest.yaml` in the working
//!    directory when present),
//! 3. `VTQUEST_*` environment variables (a `.env` file is loaded first),
//! 4. command-line flags, applied by the command layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::directory::Coordinates;
use crate::error::{Error, Result};
use crate::map_query::{MapQueryBuilder, DEFAULT_ZOOM};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "vtquest.yaml";

/// Centre point of the campus overview map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    /// Label shown on the overview marker.
    pub label: String,
    /// Latitude of the campus centre.
    pub latitude: f64,
    /// Longitude of the campus centre.
    pub longitude: f64,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            label: "VT Campus".to_string(),
            latitude: 37.227_799_793_584_01,
            longitude: -80.422_368_049_621_58,
        }
    }
}

/// Settings for the configured location service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Current position as `"lat,lng"`, when known.
    pub fix: Option<String>,
    /// Whether location monitoring is authorized.
    pub authorized: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fix: None,
            authorized: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL or path of the directory document.
    pub source: String,
    /// Map page the generated queries address.
    pub maps_page: String,
    /// Zoom level of point maps.
    pub zoom: u8,
    /// Campus overview centre.
    pub campus: CampusConfig,
    /// Location service settings.
    pub location: LocationConfig,
    /// Image shown when a place photo cannot be fetched.
    pub placeholder_image: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: "places.json".to_string(),
            maps_page: "maps.html".to_string(),
            zoom: DEFAULT_ZOOM,
            campus: CampusConfig::default(),
            location: LocationConfig::default(),
            placeholder_image: "imageUnavailable.png".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolves defaults, the config file, and the process environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a file cannot be read or parsed, or an
    /// environment value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a YAML config file over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Applies `VTQUEST_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unparseable boolean.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(source) = lookup("VTQUEST_SOURCE") {
            self.source = source;
        }
        if let Some(page) = lookup("VTQUEST_MAPS_PAGE") {
            self.maps_page = page;
        }
        if let Some(fix) = lookup("VTQUEST_LOCATION") {
            self.location.fix = Some(fix);
        }
        if let Some(flag) = lookup("VTQUEST_LOCATION_AUTHORIZED") {
            self.location.authorized = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(Error::Config(format!(
                        "VTQUEST_LOCATION_AUTHORIZED must be true or false, got {other:?}"
                    )))
                }
            };
        }
        Ok(())
    }

    /// Builds the map query builder these settings describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the campus centre is not a valid position.
    pub fn query_builder(&self) -> Result<MapQueryBuilder> {
        let center = Coordinates::new(self.campus.latitude, self.campus.longitude)
            .map_err(|e| Error::Config(format!("campus centre: {e}")))?;
        Ok(MapQueryBuilder::new(
            self.maps_page.clone(),
            self.zoom,
            self.campus.label.clone(),
            center,
        ))
    }
}
