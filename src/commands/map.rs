//! Commands that end on the map display screen.
//!
//! Each one drives a fresh [`Navigator`] through the same transitions the
//! interactive session uses, so validation is identical in both.

use crate::error::{Error, Result, UnselectedOption};
use crate::map_query::{MapType, TravelMode};
use crate::navigation::{Event, MapDisplayContext, NavigationContext, Navigator, Screen};

use super::{report, App};

/// Title line followed by the map-page request.
#[must_use]
pub fn render_map(map: &MapDisplayContext) -> String {
    format!("{}\n{}", map.title, map.query)
}

fn print_map(ctx: Result<&NavigationContext>) -> std::result::Result<(), String> {
    match ctx.map_err(|e| report(&e))? {
        NavigationContext::MapDisplay(map) => {
            println!("{}", render_map(map));
            Ok(())
        }
        other => Err(format!("Expected the map display, reached {}", other.screen())),
    }
}

fn on_tab<'n>(
    nav: &'n mut Navigator<'_>,
    tab: Screen,
    event: Event,
) -> Result<&'n NavigationContext> {
    nav.handle(Event::SwitchTab(tab))?;
    nav.handle(event)
}

fn place_on_map<'n>(
    nav: &'n mut Navigator<'_>,
    name: &str,
    map_type: Option<MapType>,
) -> Result<&'n NavigationContext> {
    let (section, row) = nav.catalog().index().locate(name)?;
    nav.handle(Event::SelectPlace { section, row })?;
    nav.handle(Event::ShowPlaceOnMap { map_type })
}

/// Execute the `show` command.
///
/// # Errors
///
/// Returns the notice text if the place is unknown or no map type is given.
pub fn show(
    app: &App<'_>,
    name: &str,
    map_type: Option<MapType>,
) -> std::result::Result<(), String> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    print_map(place_on_map(&mut nav, name, map_type))
}

/// Execute the `campus` command.
///
/// # Errors
///
/// Returns the notice text if no map type is given.
pub fn campus(app: &App<'_>, map_type: Option<MapType>) -> std::result::Result<(), String> {
    let map_type = map_type
        .ok_or(Error::ValidationUnselectedOption {
            option: UnselectedOption::MapType,
        })
        .map_err(|e| report(&e))?;
    let map = MapDisplayContext {
        query: app.queries.campus_overview(map_type),
        title: app.config.campus.label.clone(),
        origin: Screen::PlaceBrowse,
    };
    println!("{}", render_map(&map));
    Ok(())
}

/// Execute the `address` command.
///
/// # Errors
///
/// Returns the notice text if the address is blank or no map type is given.
pub fn address(
    app: &App<'_>,
    address: &str,
    map_type: Option<MapType>,
) -> std::result::Result<(), String> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    print_map(on_tab(
        &mut nav,
        Screen::AddressEntry,
        Event::ShowAddress {
            address: address.to_string(),
            map_type,
        },
    ))
}

/// Execute the `here` command.
///
/// # Errors
///
/// Returns the notice text if no map type is given or no fix is available.
pub fn here(app: &App<'_>, map_type: Option<MapType>) -> std::result::Result<(), String> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    if let Err(e) = nav.handle(Event::SwitchTab(Screen::AddressEntry)) {
        return Err(report(&e));
    }
    print_map(nav.show_current_location(app.ctx.location.as_ref(), map_type))
}

/// Execute the `directions` command.
///
/// # Errors
///
/// Returns the notice text if an address is blank or no travel mode is given.
pub fn directions(
    app: &App<'_>,
    from: &str,
    to: &str,
    travel: Option<TravelMode>,
) -> std::result::Result<(), String> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    print_map(on_tab(
        &mut nav,
        Screen::AddressEntry,
        Event::AddressDirections {
            from: from.to_string(),
            to: to.to_string(),
            travel_mode: travel,
        },
    ))
}

/// Execute the `route` command.
///
/// # Errors
///
/// Returns the notice text if a place is missing or unknown, or no travel
/// mode is given.
pub fn route(
    app: &App<'_>,
    from: Option<String>,
    to: Option<String>,
    travel: Option<TravelMode>,
) -> std::result::Result<(), String> {
    let mut nav = Navigator::new(&app.catalog, &app.queries);
    print_map(on_tab(
        &mut nav,
        Screen::CampusRouteSelect,
        Event::CampusRoute {
            from,
            to,
            travel_mode: travel,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::config::AppConfig;

    #[test]
    fn place_on_map_goes_through_detail() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let mut nav = Navigator::new(&app.catalog, &app.queries);

        let NavigationContext::MapDisplay(map) =
            place_on_map(&mut nav, "Bell Hall", Some(MapType::Satellite)).unwrap()
        else {
            panic!("expected map display");
        };
        assert_eq!(
            render_map(map),
            "Bell Hall\nmaps.html?n=Bell+Hall&lat=37.231&lng=-80.4213&maptype=SATELLITE&zoom=16"
        );
    }

    #[test]
    fn show_reports_missing_map_type() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let err = show(&app, "Bell Hall", None).unwrap_err();
        assert!(err.starts_with("Map Type Unselected!"));
    }

    #[test]
    fn show_reports_unknown_place() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        assert!(show(&app, "Nowhere Hall", Some(MapType::Roadmap))
            .unwrap_err()
            .starts_with("Unknown Place!"));
    }

    #[test]
    fn validation_failures_surface_their_notices() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);

        assert!(campus(&app, None).unwrap_err().starts_with("Map Type Unselected!"));
        assert!(address(&app, " ", Some(MapType::Roadmap))
            .unwrap_err()
            .starts_with("Address Missing!"));
        assert!(directions(&app, "A", "", Some(TravelMode::Walking))
            .unwrap_err()
            .contains("Please enter both From and To addresses"));
        assert!(route(&app, None, Some("Bell Hall".into()), Some(TravelMode::Walking))
            .unwrap_err()
            .contains("Please select both From and To places"));
        assert!(route(&app, Some("Alumni Hall".into()), Some("Bell Hall".into()), None)
            .unwrap_err()
            .starts_with("Directions Type Unselected!"));
    }

    #[test]
    fn successful_commands_print() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);

        campus(&app, Some(MapType::Roadmap)).unwrap();
        here(&app, Some(MapType::Hybrid)).unwrap();
        route(
            &app,
            Some("Alumni Hall".into()),
            Some("Bell Hall".into()),
            Some(TravelMode::Transit),
        )
        .unwrap();
    }
}
