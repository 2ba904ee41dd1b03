//! Place records and their geographic coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Deserializing goes through [`Coordinates::new`], so a recorded or
/// configured pair is range-checked like a parsed one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    /// Latitude in `[-90, 90]`.
    pub latitude: f64,
    /// Longitude in `[-180, 180]`.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns a description of the offending component.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} is out of range"));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} is out of range"));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Unchecked wire form of [`Coordinates`].
#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = String;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    /// Parses the `"lat,lng"` form used by the directory document.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected \"lat,lng\", got {s:?}"));
        };
        let latitude: f64 =
            lat.trim().parse().map_err(|_| format!("latitude {:?} is not a number", lat.trim()))?;
        let longitude: f64 =
            lng.trim().parse().map_err(|_| format!("longitude {:?} is not a number", lng.trim()))?;
        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A named campus location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    /// Unique display name; the directory key.
    pub name: String,
    /// Short building code, e.g. `"BUR"`.
    pub abbreviation: String,
    /// Category label, e.g. `"Academic"`.
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// URL of a photo of the place, when one exists.
    pub image: Option<String>,
    /// Where the place is.
    pub coordinates: Coordinates,
}

/// Attribute mapping of a single place as it appears in the source document.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    abbreviation: String,
    category: String,
    description: String,
    #[serde(default)]
    image: Option<String>,
    location: String,
}

impl RawPlace {
    /// Validates the raw attributes into a [`Place`] named `name`.
    pub(crate) fn into_place(self, name: String) -> Result<Place, String> {
        let coordinates = self.location.parse::<Coordinates>()?;
        let image = self.image.map(|url| url.trim().to_string()).filter(|url| !url.is_empty());
        Ok(Place {
            name,
            abbreviation: self.abbreviation,
            category: self.category,
            description: self.description,
            image,
            coordinates,
        })
    }
}
