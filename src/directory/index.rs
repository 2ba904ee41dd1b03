//! Letter-sectioned index over the directory's place names.
//!
//! The index backs a sectioned list view: one section per first letter,
//! one row per place name, plus a side index of section titles for
//! jumping straight to a letter.

use std::cmp::Ordering;

use super::PlaceDirectory;
use crate::directory::place::Place;
use crate::error::{Error, Result};

/// The section letter of a name: its uppercased first character.
#[must_use]
pub fn section_letter(name: &str) -> Option<char> {
    name.chars().next().and_then(|c| c.to_uppercase().next())
}

/// Orders names by section letter, then by plain string ordering.
///
/// For names whose first letters share case this is plain string ordering;
/// it also keeps every letter's names contiguous when case is mixed.
#[must_use]
pub fn name_order(a: &str, b: &str) -> Ordering {
    section_letter(a).cmp(&section_letter(b)).then_with(|| a.cmp(b))
}

/// One letter section of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Uppercase section letter.
    pub letter: char,
    /// Names starting with `letter`, in directory order.
    pub names: Vec<String>,
}

/// Place names grouped into letter sections, in letter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlphabeticIndex {
    sections: Vec<Section>,
}

impl AlphabeticIndex {
    /// Builds the index with a single pass over the names.
    ///
    /// The names are sorted with [`name_order`] first, so callers need not
    /// pre-sort them. Empty names have no letter and are skipped.
    #[must_use]
    pub fn build<S: AsRef<str>>(names: &[S]) -> Self {
        let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        sorted.sort_by(|a, b| name_order(a, b));

        let mut sections: Vec<Section> = Vec::new();
        for name in sorted {
            let Some(letter) = section_letter(name) else {
                tracing::debug!("skipping empty place name");
                continue;
            };
            match sections.last_mut() {
                Some(section) if section.letter == letter => section.names.push(name.to_string()),
                _ => sections.push(Section {
                    letter,
                    names: vec![name.to_string()],
                }),
            }
        }
        Self { sections }
    }

    /// Builds the index over every name in `directory`.
    #[must_use]
    pub fn from_directory(directory: &PlaceDirectory) -> Self {
        Self::build(directory.names())
    }

    /// Number of letter sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// All sections in letter order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Names in section `section`, or an empty slice when out of range.
    #[must_use]
    pub fn names_in_section(&self, section: usize) -> &[String] {
        self.sections.get(section).map_or(&[], |s| s.names.as_slice())
    }

    /// Letter heading section `section`.
    #[must_use]
    pub fn letter_for_section(&self, section: usize) -> Option<char> {
        self.sections.get(section).map(|s| s.letter)
    }

    /// Section titles for the side index.
    #[must_use]
    pub fn section_titles(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.letter.to_string()).collect()
    }

    /// Section whose letter matches `letter`, ignoring case.
    #[must_use]
    pub fn section_for_letter(&self, letter: char) -> Option<usize> {
        let wanted = letter.to_uppercase().next()?;
        self.sections.iter().position(|s| s.letter == wanted)
    }

    /// Name at (`section`, `row`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelectionOutOfRange`] when either index is out of range.
    pub fn name_at(&self, section: usize, row: usize) -> Result<&str> {
        self.names_in_section(section)
            .get(row)
            .map(String::as_str)
            .ok_or(Error::SelectionOutOfRange { section, row })
    }

    /// Section and row of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaceNotFound`] if the index holds no such name.
    pub fn locate(&self, name: &str) -> Result<(usize, usize)> {
        let not_found = || Error::PlaceNotFound {
            name: name.to_string(),
        };
        let section = section_letter(name)
            .and_then(|l| self.section_for_letter(l))
            .ok_or_else(not_found)?;
        let row = self.sections[section]
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(not_found)?;
        Ok((section, row))
    }

    /// Place at (`section`, `row`), looked up in `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelectionOutOfRange`] for a bad selection, or
    /// [`Error::PlaceNotFound`] if the index was built from other names.
    pub fn place_for_section_row<'d>(
        &self,
        directory: &'d PlaceDirectory,
        section: usize,
        row: usize,
    ) -> Result<&'d Place> {
        directory.get(self.name_at(section, row)?)
    }
}
