//! Map-page query construction.
//!
//! The map viewer is an HTML page that reads what to display from its
//! query string. Every builder here is pure: identical inputs always give
//! byte-identical output.

use std::fmt;

use clap::ValueEnum;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

use crate::directory::Coordinates;

/// Characters escaped inside a query value. Spaces are handled separately.
const QUERY_VALUE: &AsciiSet = &CONTROLS
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Default zoom level of point maps.
pub const DEFAULT_ZOOM: u8 = 16;

/// Base map style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    /// Street map.
    Roadmap,
    /// Aerial imagery.
    Satellite,
    /// Imagery with street overlay.
    Hybrid,
    /// Physical relief.
    Terrain,
}

impl MapType {
    /// Value of the `maptype` parameter.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Roadmap => "ROADMAP",
            Self::Satellite => "SATELLITE",
            Self::Hybrid => "HYBRID",
            Self::Terrain => "TERRAIN",
        }
    }
}

/// How a route is travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// By car.
    Driving,
    /// On foot.
    Walking,
    /// By bicycle.
    Bicycling,
    /// By public transit.
    Transit,
}

impl TravelMode {
    /// Value of the `traveltype` parameter.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Driving => "DRIVING",
            Self::Walking => "WALKING",
            Self::Bicycling => "BICYCLING",
            Self::Transit => "TRANSIT",
        }
    }

    /// Title shown above a route map.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Driving => "Driving",
            Self::Walking => "Walking",
            Self::Bicycling => "Bicycling",
            Self::Transit => "Transit",
        }
    }
}

/// One end of a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// A free-text address.
    Address(String),
    /// A known position.
    Coordinates(Coordinates),
}

impl Endpoint {
    fn encoded(&self) -> String {
        match self {
            Self::Address(address) => encode_value(address),
            Self::Coordinates(coordinates) => coordinates.to_string(),
        }
    }
}

impl From<&str> for Endpoint {
    fn from(address: &str) -> Self {
        Self::Address(address.to_string())
    }
}

impl From<Coordinates> for Endpoint {
    fn from(coordinates: Coordinates) -> Self {
        Self::Coordinates(coordinates)
    }
}

/// Encodes a query value: spaces become `+`, reserved characters are percent-encoded.
#[must_use]
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string().replace(' ', "+")
}

/// A fully assembled map-page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapQuery {
    page: String,
    params: Vec<(&'static str, String)>,
}

impl MapQuery {
    /// The map page the query addresses.
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Encoded value of parameter `key`, if present.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    /// The `key=value&...` part, without the page.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.params.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>().join("&")
    }

    /// The full `page?query` string the map viewer loads.
    #[must_use]
    pub fn to_url(&self) -> String {
        format!("{}?{}", self.page, self.query_string())
    }
}

impl fmt::Display for MapQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

/// Builds [`MapQuery`] values for one map page.
#[derive(Debug, Clone, PartialEq)]
pub struct MapQueryBuilder {
    maps_page: String,
    zoom: u8,
    campus_label: String,
    campus_center: Coordinates,
}

impl MapQueryBuilder {
    /// Creates a builder for `maps_page` at `zoom`, centring overviews on `campus_center`.
    #[must_use]
    pub fn new(
        maps_page: impl Into<String>,
        zoom: u8,
        campus_label: impl Into<String>,
        campus_center: Coordinates,
    ) -> Self {
        Self {
            maps_page: maps_page.into(),
            zoom,
            campus_label: campus_label.into(),
            campus_center,
        }
    }

    fn query(&self, params: Vec<(&'static str, String)>) -> MapQuery {
        MapQuery {
            page: self.maps_page.clone(),
            params,
        }
    }

    /// Shows a free-text address. The caller ensures `address` is not blank.
    #[must_use]
    pub fn for_address(&self, address: &str, map_type: MapType) -> MapQuery {
        self.query(vec![
            ("place", encode_value(address)),
            ("maptype", map_type.as_param().to_string()),
            ("zoom", self.zoom.to_string()),
        ])
    }

    /// Shows a labelled point.
    #[must_use]
    pub fn for_coordinates(
        &self,
        coordinates: Coordinates,
        label: &str,
        map_type: MapType,
    ) -> MapQuery {
        self.query(vec![
            ("n", encode_value(label)),
            ("lat", coordinates.latitude.to_string()),
            ("lng", coordinates.longitude.to_string()),
            ("maptype", map_type.as_param().to_string()),
            ("zoom", self.zoom.to_string()),
        ])
    }

    /// Shows directions between two endpoints.
    #[must_use]
    pub fn for_route(&self, from: &Endpoint, to: &Endpoint, travel_mode: TravelMode) -> MapQuery {
        self.query(vec![
            ("start", from.encoded()),
            ("end", to.encoded()),
            ("traveltype", travel_mode.as_param().to_string()),
        ])
    }

    /// Shows the whole campus around its configured centre.
    #[must_use]
    pub fn campus_overview(&self, map_type: MapType) -> MapQuery {
        self.for_coordinates(self.campus_center, &self.campus_label, map_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> MapQueryBuilder {
        let center = Coordinates::new(37.227_799_793_584_01, -80.422_368_049_621_58).unwrap();
        MapQueryBuilder::new("maps.html", DEFAULT_ZOOM, "VT Campus", center)
    }

    #[test]
    fn address_query_is_deterministic() {
        let b = builder();
        let first = b.for_address("123 Main St", MapType::Roadmap).to_string();
        let second = b.for_address("123 Main St", MapType::Roadmap).to_string();
        assert_eq!(first, second);
        assert_eq!(first, "maps.html?place=123+Main+St&maptype=ROADMAP&zoom=16");
        assert_eq!(b.for_address("123 Main St", MapType::Roadmap).to_url(), first);
    }

    #[test]
    fn address_query_has_no_spaces() {
        let query = builder().for_address("123 Main St", MapType::Roadmap).to_string();
        assert!(!query.contains(' '));
    }

    #[test]
    fn reserved_characters_cannot_break_the_query() {
        let query = builder().for_address("A&B=C #5 + more", MapType::Hybrid);
        assert_eq!(query.param("place"), Some("A%26B%3DC+%235+%2B+more"));
        assert_eq!(query.param("maptype"), Some("HYBRID"));
    }

    #[test]
    fn route_query_names_mode_once_and_both_ends() {
        let query = builder()
            .for_route(&Endpoint::from("A"), &Endpoint::from("B"), TravelMode::Transit)
            .to_string();
        assert_eq!(query.matches("traveltype=TRANSIT").count(), 1);
        assert!(query.contains("start=A"));
        assert!(query.contains("end=B"));
    }

    #[test]
    fn coordinate_route_uses_comma_joined_pairs() {
        let from = Coordinates::new(37.2296, -80.4236).unwrap();
        let to = Coordinates::new(37.2201, -80.4182).unwrap();
        let query = builder().for_route(&from.into(), &to.into(), TravelMode::Walking);
        assert_eq!(
            query.query_string(),
            "start=37.2296,-80.4236&end=37.2201,-80.4182&traveltype=WALKING"
        );
    }

    #[test]
    fn point_query_carries_label_and_position() {
        let here = Coordinates::new(37.25, -80.5).unwrap();
        let query = builder().for_coordinates(here, "Current Location", MapType::Terrain);
        assert_eq!(
            query.to_string(),
            "maps.html?n=Current+Location&lat=37.25&lng=-80.5&maptype=TERRAIN&zoom=16"
        );
    }

    #[test]
    fn campus_overview_centres_on_campus() {
        assert_eq!(
            builder().campus_overview(MapType::Satellite).to_string(),
            concat!(
                "maps.html?n=VT+Campus&lat=37.22779979358401&lng=-80.42236804962158",
                "&maptype=SATELLITE&zoom=16",
            )
        );
    }

    #[test]
    fn travel_mode_labels() {
        assert_eq!(TravelMode::Bicycling.label(), "Bicycling");
        assert_eq!(TravelMode::Bicycling.as_param(), "BICYCLING");
    }
}
