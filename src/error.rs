//! Error taxonomy shared by the directory, navigation, and port layers.

use std::fmt;

use thiserror::Error;

/// Convenient result alias for the `vtquest` library.
pub type Result<T> = std::result::Result<T, Error>;

/// A required text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// The address to show on a map.
    Address,
    /// The starting address of address directions.
    FromAddress,
    /// The destination address of address directions.
    ToAddress,
    /// The start and end places of campus directions.
    CampusPlaces,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Address => "address",
            Self::FromAddress => "from address",
            Self::ToAddress => "to address",
            Self::CampusPlaces => "from and to places",
        })
    }
}

/// A required choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnselectedOption {
    /// Base map style.
    MapType,
    /// Directions travel mode.
    TravelMode,
}

impl fmt::Display for UnselectedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MapType => "map type",
            Self::TravelMode => "travel mode",
        })
    }
}

/// Top-level library error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The directory document could not be fetched.
    #[error("unable to access {location}: {reason}")]
    SourceUnreachable { location: String, reason: String },

    /// The directory document was fetched but could not be decoded or validated.
    #[error("malformed directory document: {reason}")]
    SourceMalformed { reason: String },

    /// A required text input was left empty.
    #[error("missing input: {field}")]
    ValidationMissingInput { field: MissingField },

    /// A required choice (map type, travel mode) was not selected.
    #[error("no {option} selected")]
    ValidationUnselectedOption { option: UnselectedOption },

    /// The location service could not produce a fix.
    #[error("unable to determine current location: {reason}")]
    LocationUnavailable { reason: String },

    /// The user has not authorized location monitoring.
    #[error("location monitoring is not authorized")]
    LocationPermissionDenied,

    /// The image behind a place's image reference could not be fetched.
    #[error("image unavailable at {url}: {reason}")]
    ImageUnavailable { url: String, reason: String },

    /// No place with the given name exists in the directory.
    #[error("unknown place: {name}")]
    PlaceNotFound { name: String },

    /// A section or row index does not address an entry of the index.
    #[error("no entry at section {section}, row {row}")]
    SelectionOutOfRange { section: usize, row: usize },

    /// The requested event is not valid on the current screen.
    #[error("cannot {event} from {screen}")]
    InvalidTransition {
        screen: &'static str,
        event: &'static str,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// A user-facing message describing a failure, as an alert would show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Short headline.
    pub title: String,
    /// Explanatory body text.
    pub message: String,
    /// Whether the notice blocks any further navigation.
    pub blocking: bool,
}

impl Error {
    /// Returns `true` for failures that must stop the application at startup.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SourceUnreachable { .. } | Self::SourceMalformed { .. })
    }

    /// Builds the notice presented to the user for this failure.
    #[must_use]
    pub fn notice(&self) -> Notice {
        let (title, message) = match self {
            Self::SourceUnreachable { location, .. } => (
                format!("Unable to Access the File: {location}"),
                "Possible causes: (a) No network connection, (b) Accessed file is misplaced, \
                 or (c) Server is down."
                    .to_string(),
            ),
            Self::SourceMalformed { reason } => (
                "Unreadable Directory!".to_string(),
                format!("The place data is invalid: {reason}"),
            ),
            Self::ValidationMissingInput { field } => match field {
                MissingField::Address => (
                    "Address Missing!".to_string(),
                    "Please enter an address to show on map!".to_string(),
                ),
                MissingField::FromAddress | MissingField::ToAddress => (
                    "Selection Missing!".to_string(),
                    "Please enter both From and To addresses for directions!".to_string(),
                ),
                MissingField::CampusPlaces => (
                    "Selection Missing!".to_string(),
                    "Please select both From and To places for directions!".to_string(),
                ),
            },
            Self::ValidationUnselectedOption { option } => match option {
                UnselectedOption::TravelMode => (
                    "Directions Type Unselected!".to_string(),
                    "Please select a directions type!".to_string(),
                ),
                UnselectedOption::MapType => (
                    "Map Type Unselected!".to_string(),
                    "Please select a map type to show the address!".to_string(),
                ),
            },
            Self::LocationUnavailable { reason } => (
                "Unable to Locate!".to_string(),
                format!("An error occurred while trying to determine your location: {reason}"),
            ),
            Self::LocationPermissionDenied => (
                "Authorization Denied!".to_string(),
                "Unable to determine current location!".to_string(),
            ),
            Self::ImageUnavailable { .. } => {
                ("Image Unavailable".to_string(), "Showing placeholder image.".to_string())
            }
            Self::PlaceNotFound { name } => {
                ("Unknown Place!".to_string(), format!("No campus place is named {name}."))
            }
            Self::SelectionOutOfRange { .. } | Self::InvalidTransition { .. } => {
                ("Invalid Selection!".to_string(), self.to_string())
            }
            Self::Config(reason) => ("Configuration Error!".to_string(), reason.clone()),
        };
        Notice {
            title,
            message,
            blocking: self.is_fatal(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.title, self.message)
    }
}
