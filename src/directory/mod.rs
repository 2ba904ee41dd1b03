//! Campus place directory.
//!
//! The directory is loaded once from a structured key-value document
//! (place name → attribute mapping) and is read-only afterwards. Entries
//! are validated while parsing, so a loaded directory never holds a place
//! with unusable coordinates.

pub mod index;
pub mod place;

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::ports::DirectorySource;

pub use index::{AlphabeticIndex, Section};
pub use place::{Coordinates, Place};

use place::RawPlace;

/// Serialization format of a directory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// A JSON object keyed by place name.
    Json,
    /// A YAML mapping keyed by place name.
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a path or URL's extension; JSON unless it ends in `.yaml`/`.yml`.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let path = location.split(['?', '#']).next().unwrap_or(location).to_ascii_lowercase();
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

/// All known places, keyed by name, with a precomputed sorted name list.
#[derive(Debug, Clone, Default)]
pub struct PlaceDirectory {
    places: HashMap<String, Place>,
    names: Vec<String>,
}

impl PlaceDirectory {
    /// Fetches the document at `location` through `source` and parses it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreachable`] if the fetch fails, or
    /// [`Error::SourceMalformed`] if the document cannot be parsed.
    pub async fn load(source: &dyn DirectorySource, location: &str) -> Result<Self> {
        tracing::info!(%location, "loading campus directory");
        let text = source.fetch(location).await.map_err(|e| Error::SourceUnreachable {
            location: location.to_string(),
            reason: e.to_string(),
        })?;
        let directory = Self::from_document(&text, DocumentFormat::from_location(location))?;
        tracing::info!(places = directory.len(), "campus directory loaded");
        Ok(directory)
    }

    /// Parses a directory document.
    ///
    /// Either every entry is valid and a directory is returned, or the
    /// first invalid entry is reported and nothing is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceMalformed`] naming the offending place.
    pub fn from_document(text: &str, format: DocumentFormat) -> Result<Self> {
        let malformed = |reason: String| Error::SourceMalformed { reason };

        let raw: BTreeMap<String, serde_json::Value> = match format {
            DocumentFormat::Json => {
                serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(text).map_err(|e| malformed(e.to_string()))?
            }
        };

        let mut places = HashMap::with_capacity(raw.len());
        for (name, value) in raw {
            if name.trim().is_empty() {
                return Err(malformed("place with an empty name".to_string()));
            }
            let attributes: RawPlace =
                serde_json::from_value(value).map_err(|e| malformed(format!("{name}: {e}")))?;
            let place = attributes
                .into_place(name.clone())
                .map_err(|e| malformed(format!("{name}: location {e}")))?;
            places.insert(name, place);
        }

        Ok(Self::from_places(places))
    }

    fn from_places(places: HashMap<String, Place>) -> Self {
        let mut names: Vec<String> = places.keys().cloned().collect();
        names.sort_by(|a, b| index::name_order(a, b));
        Self { places, names }
    }

    /// Looks up a place by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaceNotFound`] if no place has that name.
    pub fn get(&self, name: &str) -> Result<&Place> {
        self.places.get(name).ok_or_else(|| Error::PlaceNotFound {
            name: name.to_string(),
        })
    }

    /// Place names in sorted order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Places in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.names.iter().filter_map(|name| self.places.get(name))
    }

    /// Number of places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the directory holds no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Place> for PlaceDirectory {
    /// Later places replace earlier ones with the same name.
    fn from_iter<T: IntoIterator<Item = Place>>(iter: T) -> Self {
        Self::from_places(iter.into_iter().map(|p| (p.name.clone(), p)).collect())
    }
}

/// A loaded directory together with its alphabetic index.
///
/// Screens can only be reached through a catalog, so nothing navigates
/// before the directory load has succeeded.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    directory: PlaceDirectory,
    index: AlphabeticIndex,
}

impl Catalog {
    /// Loads the directory and derives its index.
    ///
    /// # Errors
    ///
    /// Propagates the directory load failure.
    pub async fn load(source: &dyn DirectorySource, location: &str) -> Result<Self> {
        Ok(Self::new(PlaceDirectory::load(source, location).await?))
    }

    /// Wraps an already-loaded directory.
    #[must_use]
    pub fn new(directory: PlaceDirectory) -> Self {
        let index = AlphabeticIndex::from_directory(&directory);
        Self { directory, index }
    }

    /// The place directory.
    #[must_use]
    pub fn directory(&self) -> &PlaceDirectory {
        &self.directory
    }

    /// The alphabetic index over the directory.
    #[must_use]
    pub fn index(&self) -> &AlphabeticIndex {
        &self.index
    }
}
