//! Screen-flow state machine.
//!
//! Screens are states; user actions are [`Event`]s. Every transition
//! produces the [`NavigationContext`] the target screen needs, built from
//! validated input. A rejected event leaves the navigator exactly where it
//! was.
//!
//! ```text
//! PlaceBrowse ──select──▶ PlaceDetail ──map──▶ MapDisplay
//!      ▲                                          │
//!      └──────────────────── back ────────────────┘
//! AddressEntry ──address / here / directions──▶ MapDisplay
//! CampusRouteSelect ──route──▶ MapDisplay
//! ```

use std::fmt;

use crate::directory::{Catalog, Coordinates, Place};
use crate::error::{Error, MissingField, Result, UnselectedOption};
use crate::map_query::{Endpoint, MapQuery, MapQueryBuilder, MapType, TravelMode};
use crate::ports::{LocationError, LocationService};

/// Label shown over a map of the current position.
pub const CURRENT_LOCATION_LABEL: &str = "Current Location";

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Sectioned list of all places.
    PlaceBrowse,
    /// Details of one place.
    PlaceDetail,
    /// Free-text address, current location, and address directions.
    AddressEntry,
    /// Pick two campus places for directions.
    CampusRouteSelect,
    /// The embedded map viewer.
    MapDisplay,
}

impl Screen {
    /// Short name used in messages and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PlaceBrowse => "place browse",
            Self::PlaceDetail => "place detail",
            Self::AddressEntry => "address entry",
            Self::CampusRouteSelect => "campus route select",
            Self::MapDisplay => "map display",
        }
    }

    /// Whether the screen is the root of a tab.
    #[must_use]
    pub fn is_root(self) -> bool {
        matches!(self, Self::PlaceBrowse | Self::AddressEntry | Self::CampusRouteSelect)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of the place detail screen.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDetailContext {
    /// The selected place.
    pub place: Place,
}

/// Payload of the map display screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDisplayContext {
    /// What the map viewer should load.
    pub query: MapQuery,
    /// Heading shown above the map.
    pub title: String,
    /// Tab root that `Back` returns to.
    pub origin: Screen,
}

/// Values handed to the screen being entered.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationContext {
    /// A tab root; these screens read everything they need from the catalog.
    Root(Screen),
    /// Entering the place detail screen.
    PlaceDetail(PlaceDetailContext),
    /// Entering the map display screen.
    MapDisplay(MapDisplayContext),
}

impl NavigationContext {
    /// The screen this context belongs to.
    #[must_use]
    pub fn screen(&self) -> Screen {
        match self {
            Self::Root(screen) => *screen,
            Self::PlaceDetail(_) => Screen::PlaceDetail,
            Self::MapDisplay(_) => Screen::MapDisplay,
        }
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Jump to a tab root.
    SwitchTab(Screen),
    /// Pick the place at a section/row of the index.
    SelectPlace {
        /// Section of the alphabetic index.
        section: usize,
        /// Row within the section.
        row: usize,
    },
    /// Show the detailed place on a map.
    ShowPlaceOnMap {
        /// Selected map type, if any.
        map_type: Option<MapType>,
    },
    /// Show a typed address on a map.
    ShowAddress {
        /// Address as typed.
        address: String,
        /// Selected map type, if any.
        map_type: Option<MapType>,
    },
    /// Show a location fix on a map.
    ShowCurrentLocation {
        /// The fix obtained from the location service.
        fix: Coordinates,
        /// Selected map type, if any.
        map_type: Option<MapType>,
    },
    /// Directions between two typed addresses.
    AddressDirections {
        /// Starting address as typed.
        from: String,
        /// Destination address as typed.
        to: String,
        /// Selected travel mode, if any.
        travel_mode: Option<TravelMode>,
    },
    /// Directions between two campus places.
    CampusRoute {
        /// Starting place name, if chosen.
        from: Option<String>,
        /// Destination place name, if chosen.
        to: Option<String>,
        /// Selected travel mode, if any.
        travel_mode: Option<TravelMode>,
    },
    /// Return to the previous screen.
    Back,
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Self::SwitchTab(_) => "switch tab",
            Self::SelectPlace { .. } => "select a place",
            Self::ShowPlaceOnMap { .. } => "show the place on a map",
            Self::ShowAddress { .. } => "show an address",
            Self::ShowCurrentLocation { .. } => "show the current location",
            Self::AddressDirections { .. } => "get address directions",
            Self::CampusRoute { .. } => "get campus directions",
            Self::Back => "go back",
        }
    }
}

fn require_text(text: &str, field: MissingField) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(Error::ValidationMissingInput { field })
    } else {
        Ok(trimmed)
    }
}

fn require_map_type(map_type: Option<MapType>) -> Result<MapType> {
    map_type.ok_or(Error::ValidationUnselectedOption {
        option: UnselectedOption::MapType,
    })
}

fn require_travel_mode(travel_mode: Option<TravelMode>) -> Result<TravelMode> {
    travel_mode.ok_or(Error::ValidationUnselectedOption {
        option: UnselectedOption::TravelMode,
    })
}

/// Drives the screen flow over a loaded catalog.
pub struct Navigator<'a> {
    catalog: &'a Catalog,
    queries: &'a MapQueryBuilder,
    current: NavigationContext,
}

impl<'a> Navigator<'a> {
    /// Starts on the place browse screen.
    #[must_use]
    pub fn new(catalog: &'a Catalog, queries: &'a MapQueryBuilder) -> Self {
        Self {
            catalog,
            queries,
            current: NavigationContext::Root(Screen::PlaceBrowse),
        }
    }

    /// The current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.current.screen()
    }

    /// The context the current screen was entered with.
    #[must_use]
    pub fn context(&self) -> &NavigationContext {
        &self.current
    }

    /// The catalog being browsed.
    #[must_use]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Applies `event`, moving to the next screen on success.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the current screen is unchanged.
    pub fn handle(&mut self, event: Event) -> Result<&NavigationContext> {
        let from = self.screen();
        let next = self.next(event).inspect_err(|e| {
            tracing::debug!(screen = %from, error = %e, "transition rejected");
        })?;
        tracing::debug!(from = %from, to = %next.screen(), "transition");
        self.current = next;
        Ok(&self.current)
    }

    /// Validates the map type, then asks `location` for a fix and shows it.
    ///
    /// Checking the map type first means no fix is requested for a request
    /// that would be rejected anyway.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LocationPermissionDenied`] or
    /// [`Error::LocationUnavailable`] when no fix is produced, or any
    /// validation failure of the transition.
    pub fn show_current_location(
        &mut self,
        location: &dyn LocationService,
        map_type: Option<MapType>,
    ) -> Result<&NavigationContext> {
        self.expect_screen(Screen::AddressEntry, "show the current location")?;
        let map_type = require_map_type(map_type)?;
        let fix = location.current_fix().map_err(|e| match e {
            LocationError::PermissionDenied => Error::LocationPermissionDenied,
            LocationError::Unavailable(reason) => Error::LocationUnavailable { reason },
        })?;
        self.handle(Event::ShowCurrentLocation {
            fix,
            map_type: Some(map_type),
        })
    }

    fn expect_screen(&self, screen: Screen, event: &'static str) -> Result<()> {
        if self.screen() == screen {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                screen: self.screen().name(),
                event,
            })
        }
    }

    fn map(&self, query: MapQuery, title: impl Into<String>, origin: Screen) -> NavigationContext {
        NavigationContext::MapDisplay(MapDisplayContext {
            query,
            title: title.into(),
            origin,
        })
    }

    fn next(&self, event: Event) -> Result<NavigationContext> {
        let invalid = |event: &Event| Error::InvalidTransition {
            screen: self.screen().name(),
            event: event.name(),
        };

        match (&self.current, event) {
            (
                NavigationContext::Root(_) | NavigationContext::MapDisplay(_),
                Event::SwitchTab(target),
            ) if target.is_root() => {
                Ok(NavigationContext::Root(target))
            }
            (NavigationContext::Root(Screen::PlaceBrowse), Event::SelectPlace { section, row }) => {
                let place = self.catalog.index().place_for_section_row(
                    self.catalog.directory(),
                    section,
                    row,
                )?;
                Ok(NavigationContext::PlaceDetail(PlaceDetailContext {
                    place: place.clone(),
                }))
            }
            (NavigationContext::PlaceDetail(detail), Event::ShowPlaceOnMap { map_type }) => {
                let map_type = require_map_type(map_type)?;
                let place = &detail.place;
                let query = self.queries.for_coordinates(place.coordinates, &place.name, map_type);
                Ok(self.map(query, place.name.clone(), Screen::PlaceBrowse))
            }
            (NavigationContext::PlaceDetail(_), Event::Back) => {
                Ok(NavigationContext::Root(Screen::PlaceBrowse))
            }
            (
                NavigationContext::Root(Screen::AddressEntry),
                Event::ShowAddress { address, map_type },
            ) => {
                let address = require_text(&address, MissingField::Address)?;
                let map_type = require_map_type(map_type)?;
                let query = self.queries.for_address(address, map_type);
                Ok(self.map(query, address, Screen::AddressEntry))
            }
            (
                NavigationContext::Root(Screen::AddressEntry),
                Event::ShowCurrentLocation { fix, map_type },
            ) => {
                let map_type = require_map_type(map_type)?;
                let query = self.queries.for_coordinates(fix, CURRENT_LOCATION_LABEL, map_type);
                Ok(self.map(query, CURRENT_LOCATION_LABEL, Screen::AddressEntry))
            }
            (
                NavigationContext::Root(Screen::AddressEntry),
                Event::AddressDirections {
                    from,
                    to,
                    travel_mode,
                },
            ) => {
                let from = require_text(&from, MissingField::FromAddress)?;
                let to = require_text(&to, MissingField::ToAddress)?;
                let travel_mode = require_travel_mode(travel_mode)?;
                let query =
                    self.queries.for_route(&Endpoint::from(from), &Endpoint::from(to), travel_mode);
                Ok(self.map(query, travel_mode.label(), Screen::AddressEntry))
            }
            (
                NavigationContext::Root(Screen::CampusRouteSelect),
                Event::CampusRoute {
                    from,
                    to,
                    travel_mode,
                },
            ) => {
                let chosen = |name: Option<String>| {
                    name.filter(|n| !n.trim().is_empty())
                        .ok_or(Error::ValidationMissingInput {
                            field: MissingField::CampusPlaces,
                        })
                };
                let (from, to) = (chosen(from)?, chosen(to)?);
                let travel_mode = require_travel_mode(travel_mode)?;
                let directory = self.catalog.directory();
                let start = directory.get(&from)?.coordinates;
                let end = directory.get(&to)?.coordinates;
                let query = self.queries.for_route(&start.into(), &end.into(), travel_mode);
                Ok(self.map(query, travel_mode.label(), Screen::CampusRouteSelect))
            }
            (NavigationContext::MapDisplay(map), Event::Back) => {
                Ok(NavigationContext::Root(map.origin))
            }
            (_, event) => Err(invalid(&event)),
        }
    }
}
