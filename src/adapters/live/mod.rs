//! Live adapters for real external interactions.

pub mod directory_source;
pub mod images;
pub mod location;

pub use directory_source::LiveDirectorySource;
pub use images::LiveImageFetcher;
pub use location::ConfiguredLocationService;
