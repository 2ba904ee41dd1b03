//! `vtquest places` and `vtquest letters` commands.

use crate::directory::Catalog;

use super::App;

/// Execute the `places` command.
///
/// # Errors
///
/// Never fails once the directory is loaded.
pub fn places(app: &App<'_>) -> Result<(), String> {
    print!("{}", render_places(&app.catalog));
    Ok(())
}

/// Execute the `letters` command.
///
/// # Errors
///
/// Never fails once the directory is loaded.
pub fn letters(app: &App<'_>) -> Result<(), String> {
    println!("{}", app.catalog.index().section_titles().join(" "));
    Ok(())
}

/// Sectioned listing: one header per letter, then `row. name (category)`.
///
/// Section and row numbers are the ones `browse` accepts for `open`.
#[must_use]
pub fn render_places(catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    for (s, section) in catalog.index().sections().iter().enumerate() {
        lines.push(format!("[{s}] {}", section.letter));
        lines.extend(section.names.iter().enumerate().map(|(row, name)| {
            match catalog.directory().get(name) {
                Ok(place) => format!("  {row:>3}. {name} ({})", place.category),
                Err(_) => format!("  {row:>3}. {name}"),
            }
        }));
    }
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::config::AppConfig;
    use crate::directory::{DocumentFormat, PlaceDirectory};

    #[test]
    fn listing_groups_by_letter_with_categories() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        assert_eq!(
            render_places(&app.catalog),
            concat!(
                "[0] A\n",
                "    0. Alumni Hall (Other)\n",
                "[1] B\n",
                "    0. Bell Hall (Academic)\n",
                "    1. Burruss Hall (Administrative)\n",
            )
        );
    }

    #[test]
    fn empty_catalog_renders_nothing() {
        let directory = PlaceDirectory::from_document("{}", DocumentFormat::Json).unwrap();
        assert_eq!(render_places(&Catalog::new(directory)), "");
    }
}
