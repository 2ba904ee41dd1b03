//! `vtquest browse` command: a line-driven session over the screen flow.
//!
//! Each input line is one user action. A rejected action prints its
//! notice and leaves the session on the same screen.

use std::io::{self, BufRead, Write};

use clap::ValueEnum;

use crate::error::UnselectedOption;
use crate::map_query::{MapType, TravelMode};
use crate::navigation::{Event, NavigationContext, Navigator, Screen};

use super::info::{fetch_image, render_place};
use super::listing::render_places;
use super::map::render_map;
use super::App;

const HELP: &str = "\
Commands:
  list                          show the sectioned place list
  open SECTION ROW | open NAME  open a place's details
  map [TYPE]                    show the open place on a map
  address [TYPE] TEXT           show an address on a map
  here [TYPE]                   show the current location on a map
  directions MODE | FROM | TO   directions between two addresses
  route MODE | FROM | TO        directions between two campus places
  tab browse|address|route      switch tab
  back                          return to the previous screen
  quit                          end the session
TYPE is roadmap, satellite, hybrid, or terrain.
MODE is driving, walking, bicycling, or transit.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    Event(Event),
    OpenByName(String),
    Here(Option<MapType>),
    List,
    Help,
    Quit,
}

fn parse_option<T: ValueEnum>(text: &str, what: UnselectedOption) -> Result<Option<T>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    T::from_str(text, true).map(Some).map_err(|_| format!("Unknown {what}: {text}"))
}

fn parse_tab(text: &str) -> Result<Screen, String> {
    match text.trim().to_ascii_lowercase().as_str() {
        "browse" | "places" => Ok(Screen::PlaceBrowse),
        "address" => Ok(Screen::AddressEntry),
        "route" | "campus" => Ok(Screen::CampusRouteSelect),
        other => Err(format!("Unknown tab: {other}")),
    }
}

/// Splits `MODE | FROM | TO`; absent parts are empty.
fn split_route(rest: &str) -> (&str, &str, &str) {
    let mut parts = rest.splitn(3, '|').map(str::trim);
    (parts.next().unwrap_or(""), parts.next().unwrap_or(""), parts.next().unwrap_or(""))
}

fn parse_line(line: &str) -> Result<Action, String> {
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, r)| (c, r.trim()));
    match command.to_ascii_lowercase().as_str() {
        "quit" | "exit" => Ok(Action::Quit),
        "help" | "?" => Ok(Action::Help),
        "list" => Ok(Action::List),
        "back" => Ok(Action::Event(Event::Back)),
        "tab" => parse_tab(rest).map(|screen| Action::Event(Event::SwitchTab(screen))),
        "open" => {
            let numbers: Vec<&str> = rest.split_whitespace().collect();
            match numbers.as_slice() {
                [section, row] => match (section.parse(), row.parse()) {
                    (Ok(section), Ok(row)) => {
                        Ok(Action::Event(Event::SelectPlace { section, row }))
                    }
                    _ => Ok(Action::OpenByName(rest.to_string())),
                },
                [] => Err("Usage: open SECTION ROW | open NAME".to_string()),
                _ => Ok(Action::OpenByName(rest.to_string())),
            }
        }
        "map" => Ok(Action::Event(Event::ShowPlaceOnMap {
            map_type: parse_option(rest, UnselectedOption::MapType)?,
        })),
        "address" => {
            let (first, remainder) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let (map_type, address) = match MapType::from_str(first, true) {
                Ok(map_type) => (Some(map_type), remainder.trim()),
                Err(_) => (None, rest),
            };
            Ok(Action::Event(Event::ShowAddress {
                address: address.to_string(),
                map_type,
            }))
        }
        "here" => Ok(Action::Here(parse_option(rest, UnselectedOption::MapType)?)),
        "directions" => {
            let (mode, from, to) = split_route(rest);
            Ok(Action::Event(Event::AddressDirections {
                from: from.to_string(),
                to: to.to_string(),
                travel_mode: parse_option(mode, UnselectedOption::TravelMode)?,
            }))
        }
        "route" => {
            let (mode, from, to) = split_route(rest);
            let chosen = |name: &str| Some(name.to_string()).filter(|n| !n.is_empty());
            Ok(Action::Event(Event::CampusRoute {
                from: chosen(from),
                to: chosen(to),
                travel_mode: parse_option(mode, UnselectedOption::TravelMode)?,
            }))
        }
        other => Err(format!("Unknown command: {other} (type `help`)")),
    }
}

async fn render_screen<W: Write>(
    app: &App<'_>,
    ctx: &NavigationContext,
    out: &mut W,
) -> io::Result<()> {
    match ctx {
        NavigationContext::Root(Screen::PlaceBrowse) => {
            write!(out, "{}", render_places(&app.catalog))
        }
        NavigationContext::Root(Screen::AddressEntry) => {
            writeln!(out, "Enter an address, ask for `here`, or get `directions`.")
        }
        NavigationContext::Root(_) => {
            writeln!(out, "Pick two of: {}", app.catalog.directory().names().join(", "))
        }
        NavigationContext::PlaceDetail(detail) => {
            let image =
                fetch_image(app.ctx.images.as_ref(), &detail.place, &app.config.placeholder_image)
                    .await;
            write!(out, "{}", render_place(&detail.place, Some(&image)))
        }
        NavigationContext::MapDisplay(map) => writeln!(out, "{}", render_map(map)),
    }
}

/// Runs a session reading actions from `input` and writing screens to `out`.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn session<R: BufRead, W: Write>(app: &App<'_>, input: R, mut out: W) -> io::Result<()> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    render_screen(app, nav.context(), &mut out).await?;

    let mut lines = input.lines();
    loop {
        write!(out, "{}> ", nav.screen())?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let action = match parse_line(line) {
            Ok(action) => action,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        let outcome = match action {
            Action::Quit => break,
            Action::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Action::List => {
                write!(out, "{}", render_places(&app.catalog))?;
                continue;
            }
            Action::Event(event) => nav.handle(event).map(|_| ()),
            Action::OpenByName(name) => app
                .catalog
                .index()
                .locate(&name)
                .and_then(|(section, row)| {
                    nav.handle(Event::SelectPlace { section, row }).map(|_| ())
                }),
            Action::Here(map_type) => nav
                .show_current_location(app.ctx.location.as_ref(), map_type)
                .map(|_| ()),
        };

        match outcome {
            Ok(()) => render_screen(app, nav.context(), &mut out).await?,
            Err(e) => writeln!(out, "{}", e.notice())?,
        }
    }
    Ok(())
}

/// Execute the `browse` command over stdin and stdout.
///
/// # Errors
///
/// Returns an error string if the terminal cannot be read or written.
pub async fn run(app: &App<'_>) -> Result<(), String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(app, stdin.lock(), stdout.lock())
        .await
        .map_err(|e| format!("Browse session failed: {e}"))
}
