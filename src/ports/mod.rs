//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the directory core and an
//! external system (the directory document host, the device location
//! service, the image host). Implementations live in `src/adapters/`.

pub mod directory_source;
pub mod images;
pub mod location;

pub use directory_source::{DirectorySource, SourceFuture};
pub use images::{ImageFetcher, ImageFuture};
pub use location::{LocationError, LocationService};

/// Error type returned across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
