//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::directory::Coordinates;
use crate::map_query::{MapType, TravelMode};

/// Top-level CLI parser for `vtquest`.
#[derive(Debug, Parser)]
#[command(name = "vtquest", version, about = "Browse campus places and map them")]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides applied on top of the layered configuration.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// URL or path of the directory document.
    #[arg(long, global = true, value_name = "URL_OR_PATH")]
    pub source: Option<String>,

    /// YAML configuration file (default: `vtquest.yaml` when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Map page the generated queries address.
    #[arg(long, global = true, value_name = "PAGE")]
    pub maps_page: Option<String>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every place, sectioned by first letter.
    Places,
    /// Print the side-index section titles.
    Letters,
    /// Show the details of one place.
    Info {
        /// Exact place name.
        name: String,
        /// Write the place photo to this file.
        #[arg(long, value_name = "PATH")]
        save_image: Option<PathBuf>,
    },
    /// Show one place on the map.
    Show {
        /// Exact place name.
        name: String,
        /// Base map style.
        #[arg(long, value_enum)]
        map_type: Option<MapType>,
    },
    /// Show the whole campus.
    Campus {
        /// Base map style.
        #[arg(long, value_enum)]
        map_type: Option<MapType>,
    },
    /// Show a free-text address on the map.
    Address {
        /// Address to show.
        #[arg(default_value = "")]
        address: String,
        /// Base map style.
        #[arg(long, value_enum)]
        map_type: Option<MapType>,
    },
    /// Show the current location on the map.
    Here {
        /// Base map style.
        #[arg(long, value_enum)]
        map_type: Option<MapType>,
        /// Current position as `LAT,LNG`, overriding the configured fix.
        #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
        at: Option<Coordinates>,
    },
    /// Directions between two addresses.
    Directions {
        /// Starting address.
        #[arg(long, default_value = "")]
        from: String,
        /// Destination address.
        #[arg(long, default_value = "")]
        to: String,
        /// How the route is travelled.
        #[arg(long, value_enum)]
        travel: Option<TravelMode>,
    },
    /// Directions between two campus places.
    Route {
        /// Starting place name.
        #[arg(long)]
        from: Option<String>,
        /// Destination place name.
        #[arg(long)]
        to: Option<String>,
        /// How the route is travelled.
        #[arg(long, value_enum)]
        travel: Option<TravelMode>,
    },
    /// Interactive session over the screen flow.
    Browse,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use crate::map_query::{MapType, TravelMode};
    use clap::Parser;

    #[test]
    fn parses_places_subcommand() {
        let cli = Cli::parse_from(["vtquest", "places"]);
        assert!(matches!(cli.command, Command::Places));
        assert!(cli.global.source.is_none());
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::parse_from([
            "vtquest",
            "letters",
            "--source",
            "campus.yaml",
            "--maps-page",
            "m.html",
        ]);
        assert_eq!(cli.global.source.as_deref(), Some("campus.yaml"));
        assert_eq!(cli.global.maps_page.as_deref(), Some("m.html"));
    }

    #[test]
    fn parses_map_type_values() {
        let cli = Cli::parse_from(["vtquest", "show", "Burruss Hall", "--map-type", "satellite"]);
        match cli.command {
            Command::Show { name, map_type } => {
                assert_eq!(name, "Burruss Hall");
                assert_eq!(map_type, Some(MapType::Satellite));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn map_type_is_optional_at_parse_time() {
        let cli = Cli::parse_from(["vtquest", "campus"]);
        assert!(matches!(cli.command, Command::Campus { map_type: None }));
    }

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::parse_from([
            "vtquest",
            "here",
            "--map-type",
            "roadmap",
            "--at",
            "37.25,-80.5",
        ]);
        match cli.command {
            Command::Here { at: Some(at), .. } => assert_eq!(at.to_string(), "37.25,-80.5"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_travel_mode() {
        assert!(Cli::try_parse_from(["vtquest", "route", "--travel", "flying"]).is_err());
    }

    #[test]
    fn parses_route() {
        let cli = Cli::parse_from([
            "vtquest",
            "route",
            "--from",
            "Bell Hall",
            "--to",
            "Alumni Hall",
            "--travel",
            "walking",
        ]);
        match cli.command {
            Command::Route { from, to, travel } => {
                assert_eq!(from.as_deref(), Some("Bell Hall"));
                assert_eq!(to.as_deref(), Some("Alumni Hall"));
                assert_eq!(travel, Some(TravelMode::Walking));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
