//! Core types shared by the scanner, the merger and the exporter.

use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;

use crate::scan::LANGUAGE_DIR_SUFFIX;

/// One on-disk `.strings` file for a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    /// Group directory as reached by the walk, excluding `<lang>.lproj`.
    /// Files are read from here.
    pub location: PathBuf,

    /// Group directory relative to the scan root, for the path column.
    /// Falls back to `location` when the group lies outside the root.
    pub dir: PathBuf,

    /// The language code (e.g. "en", "fr", "pt-BR").
    pub language: String,

    /// Base name of the file, e.g. `Localizable.strings`.
    pub filename: String,
}

/// The same logical `.strings` file across every language it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFile {
    /// Group directory as reached by the walk, excluding `<lang>.lproj`.
    pub location: PathBuf,

    /// Group directory relative to the scan root, for the path column.
    pub dir: PathBuf,

    /// Base name of the file, e.g. `Localizable.strings`.
    pub filename: String,

    /// Distinct languages in the order they were first seen.
    /// The first one is the base language.
    pub languages: Vec<String>,
}

impl MergedFile {
    /// A merged file read from `dir` itself.
    pub fn new(dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        let dir = dir.into();
        MergedFile {
            location: dir.clone(),
            dir,
            filename: filename.into(),
            languages: Vec::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = location.into();
        self
    }

    /// Records a language, ignoring ones already present.
    pub fn add_language(&mut self, language: &str) {
        if !self.languages.iter().any(|l| l == language) {
            self.languages.push(language.to_string());
        }
    }

    /// Where the file for `language` is read from.
    pub fn path_for(&self, language: &str) -> PathBuf {
        self.location
            .join(format!("{language}{LANGUAGE_DIR_SUFFIX}"))
            .join(&self.filename)
    }

    /// The path column: `/`-separated with a trailing `/`, empty at the root.
    pub fn display_path(&self) -> String {
        display_dir(&self.dir)
    }
}

fn display_dir(dir: &Path) -> String {
    dir.components()
        .map(|c| match c {
            Component::Prefix(prefix) => prefix.as_os_str().to_string_lossy().into_owned(),
            Component::RootDir => "/".to_string(),
            Component::CurDir => String::new(),
            Component::ParentDir | Component::Normal(_) => {
                format!("{}/", c.as_os_str().to_string_lossy())
            }
        })
        .collect()
}

/// A single translatable string, with one value per language it was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Object identifier, the join key across languages.
    pub id: String,

    /// The comment line preceding the entry in the language that defined it,
    /// markers included.
    pub comment: Option<String>,

    /// Map from language code to translated value.
    pub values: IndexMap<String, String>,
}

impl Entry {
    pub fn new(id: impl Into<String>, comment: Option<String>) -> Self {
        Entry {
            id: id.into(),
            comment,
            values: IndexMap::new(),
        }
    }

    pub fn value(&self, language: &str) -> Option<&str> {
        self.values.get(language).map(String::as_str)
    }
}

/// One CSV row: `path, file, object-id, comment` followed by a cell per language column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow<'a> {
    pub path: String,
    pub file: &'a str,
    pub object_id: &'a str,
    pub comment: &'a str,
    pub cells: Vec<&'a str>,
}

impl<'a> ExportRow<'a> {
    /// Lays out `entry` against the global language columns.
    /// Languages the entry has no value for become empty cells.
    pub fn new(file: &'a MergedFile, entry: &'a Entry, languages: &[String]) -> Self {
        ExportRow {
            path: file.display_path(),
            file: &file.filename,
            object_id: &entry.id,
            comment: entry.comment.as_deref().unwrap_or_default(),
            cells: languages
                .iter()
                .map(|lang| entry.value(lang).unwrap_or_default())
                .collect(),
        }
    }

    /// All fields in column order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = vec![self.path.as_str(), self.file, self.object_id, self.comment];
        fields.extend(self.cells.iter().copied());
        fields
    }
}
