//! Core library for the `vtquest` campus directory.
//!
//! The directory is loaded once into a [`Catalog`], browsed through an
//! [`AlphabeticIndex`], and navigated with a [`Navigator`] whose map
//! screens are described by [`MapQuery`] values.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod directory;
pub mod error;
pub mod map_query;
pub mod navigation;
pub mod ports;

pub use config::AppConfig;
pub use directory::{AlphabeticIndex, Catalog, Coordinates, Place, PlaceDirectory};
pub use error::{Error, MissingField, Notice, Result, UnselectedOption};
pub use map_query::{MapQuery, MapQueryBuilder, MapType, TravelMode};
pub use navigation::{Event, NavigationContext, Navigator, Screen};

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> std::result::Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
