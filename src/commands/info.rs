//! `vtquest info` command.

use std::path::Path;

use crate::directory::Place;
use crate::error::Error;
use crate::ports::ImageFetcher;

use super::{report, App};

/// What the detail screen shows for a place's photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceImage {
    /// The photo was fetched.
    Fetched {
        /// Where it came from.
        url: String,
        /// Raw image bytes.
        bytes: Vec<u8>,
    },
    /// No photo could be fetched; the placeholder is shown instead.
    Placeholder(String),
}

/// Fetches the photo of `place`, degrading to `placeholder` when it has
/// none or the fetch fails.
pub async fn fetch_image(
    images: &dyn ImageFetcher,
    place: &Place,
    placeholder: &str,
) -> PlaceImage {
    let Some(url) = place.image.as_deref() else {
        tracing::debug!(place = %place.name, "place has no image reference");
        return PlaceImage::Placeholder(placeholder.to_string());
    };
    match images.fetch(url).await {
        Ok(bytes) => PlaceImage::Fetched {
            url: url.to_string(),
            bytes,
        },
        Err(e) => {
            let err = Error::ImageUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!(place = %place.name, error = %err, "showing placeholder image");
            PlaceImage::Placeholder(placeholder.to_string())
        }
    }
}

/// Detail text of a place, as the detail screen lays it out.
#[must_use]
pub fn render_place(place: &Place, image: Option<&PlaceImage>) -> String {
    let mut lines = vec![
        format!("{} ({})", place.name, place.abbreviation),
        format!("Category: {}", place.category),
        format!("Location: {}", place.coordinates),
    ];
    match image {
        Some(PlaceImage::Fetched { url, bytes }) => {
            lines.push(format!("Image: {url} ({} bytes)", bytes.len()));
        }
        Some(PlaceImage::Placeholder(placeholder)) => lines.push(format!("Image: {placeholder}")),
        None => {}
    }
    lines.push(place.description.clone());
    lines.join("\n") + "\n"
}

/// Execute the `info` command.
///
/// # Errors
///
/// Returns an error string if the place is unknown or the image cannot be saved.
pub async fn run(app: &App<'_>, name: &str, save_image: Option<&Path>) -> Result<(), String> {
    let place = app.catalog.directory().get(name).map_err(|e| report(&e))?;
    let image = fetch_image(app.ctx.images.as_ref(), place, &app.config.placeholder_image).await;
    print!("{}", render_place(place, Some(&image)));

    if let Some(path) = save_image {
        match &image {
            PlaceImage::Fetched { bytes, .. } => {
                std::fs::write(path, bytes)
                    .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
                eprintln!("Image saved to: {}", path.display());
            }
            PlaceImage::Placeholder(_) => {
                tracing::warn!(path = %path.display(), "no image to save");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;
    use crate::config::AppConfig;

    #[tokio::test]
    async fn fetched_image_is_reported_with_size() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let place = app.catalog.directory().get("Burruss Hall").unwrap();

        let image = fetch_image(ctx.images.as_ref(), place, "imageUnavailable.png").await;
        assert_eq!(
            image,
            PlaceImage::Fetched {
                url: "http://example.invalid/burruss.jpg".into(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            }
        );
        let text = render_place(place, Some(&image));
        assert!(text.starts_with("Burruss Hall (BUR)\nCategory: Administrative\n"));
        assert!(text.contains("Image: http://example.invalid/burruss.jpg (3 bytes)"));
    }

    #[test]
    fn detail_text_without_image_is_one_line_per_field() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let place = app.catalog.directory().get("Alumni Hall").unwrap();

        assert_eq!(
            render_place(place, None),
            "Alumni Hall (ALH)\nCategory: Other\nLocation: 37.2321,-80.4183\nAlumni offices.\n"
        );
        let placeholder = PlaceImage::Placeholder("imageUnavailable.png".into());
        let text = render_place(place, Some(&placeholder));
        assert!(text.ends_with("\nImage: imageUnavailable.png\nAlumni offices.\n"));
        assert!(text.contains("Location: 37.2321,-80.4183\nImage:"));
    }

    #[tokio::test]
    async fn failed_fetch_degrades_to_placeholder() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let bell = app.catalog.directory().get("Bell Hall").unwrap();
        let alumni = app.catalog.directory().get("Alumni Hall").unwrap();

        for place in [bell, alumni] {
            let image = fetch_image(ctx.images.as_ref(), place, "imageUnavailable.png").await;
            assert_eq!(image, PlaceImage::Placeholder("imageUnavailable.png".into()));
        }
    }

    #[tokio::test]
    async fn saves_fetched_image() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let path = std::env::temp_dir().join("vtquest_info_test_burruss.jpg");

        run(&app, "Burruss Hall", Some(&path)).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), [0xFF, 0xD8, 0xFF]);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn unknown_place_reports_notice() {
        let (config, ctx) = (AppConfig::default(), test_support::context());
        let app = test_support::app(&config, &ctx);
        let err = run(&app, "Nowhere Hall", None).await.unwrap_err();
        assert!(err.starts_with("Unknown Place!"));
    }
}
