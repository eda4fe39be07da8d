//! Discovery of `<lang>.lproj/<name>.strings` files under a root directory.

use std::path::Path;

use ignore::WalkBuilder;

use crate::{error::Error, types::ResourceFile};

/// File name suffix of resource files.
pub const RESOURCE_SUFFIX: &str = ".strings";

/// Directory name suffix marking a language directory.
pub const LANGUAGE_DIR_SUFFIX: &str = ".lproj";

impl ResourceFile {
    /// Interprets `path` (somewhere under `root`) as a resource file.
    ///
    /// Returns `None` unless the file name ends in `.strings` and its parent
    /// directory is named `<lang>.lproj`.
    pub fn from_path(root: &Path, path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?;
        if !filename.ends_with(RESOURCE_SUFFIX) {
            return None;
        }

        let language_dir = path.parent()?;
        let language = language_dir
            .file_name()?
            .to_str()?
            .strip_suffix(LANGUAGE_DIR_SUFFIX)?;
        if language.is_empty() {
            return None;
        }

        let group_dir = language_dir.parent()?;
        let dir = group_dir.strip_prefix(root).unwrap_or(group_dir);

        Some(ResourceFile {
            location: group_dir.to_path_buf(),
            dir: dir.to_path_buf(),
            language: language.to_string(),
            filename: filename.to_string(),
        })
    }
}

/// Recursively collects every resource file below `root`.
///
/// Entries are visited depth-first and sorted by file name within each
/// directory, so the result only depends on the tree's contents. Hidden and
/// ignored files are not filtered. Unreadable entries are skipped with a warning.
pub fn scan_resource_files<P: AsRef<Path>>(root: P) -> Result<Vec<ResourceFile>, Error> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::InvalidRoot(root.to_path_buf()));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };
        if dent.file_type().is_none_or(|t| t.is_dir()) {
            continue;
        }
        if let Some(file) = ResourceFile::from_path(root, dent.path()) {
            tracing::debug!(
                path = %dent.path().display(),
                language = %file.language,
                "found resource file"
            );
            files.push(file);
        }
    }

    Ok(files)
}
