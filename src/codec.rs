//! This module provides the `Codec` struct, which scans a directory tree for
//! per-language `.strings` files, groups them into merged files, folds every
//! language's entries together by object identifier, and exports the result as
//! a single CSV table with one column per language.

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::{
    error::Error,
    formats::{CsvExporter, StringsFormat},
    scan::scan_resource_files,
    traits::Parser,
    types::{Entry, MergedFile, ResourceFile},
};

/// Default name of the exported CSV file.
pub const DEFAULT_OUTPUT: &str = "localizations.csv";

/// Merged `.strings` files found under one root directory.
#[derive(Debug, Clone)]
pub struct Codec {
    /// The directory the files were scanned from.
    pub root: PathBuf,

    /// Merged files in the order their group was first seen.
    pub files: Vec<MergedFile>,
}

impl Codec {
    /// Scans `root` and groups the resource files found there.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref();
        let files = merge_resource_files(scan_resource_files(root)?);
        tracing::debug!(root = %root.display(), files = files.len(), "scanned resources");

        Ok(Codec {
            root: root.to_path_buf(),
            files,
        })
    }

    /// Every language across all files, in first-seen order.
    pub fn languages(&self) -> Vec<String> {
        collect_languages(&self.files)
    }

    /// All entries of `file`, with values from each of its languages.
    pub fn merged_entries(&self, file: &MergedFile) -> Result<Vec<Entry>, Error> {
        Ok(merge_contents(file)?.into_values().collect())
    }

    /// Writes the CSV table to `writer`. Returns the number of entry rows.
    pub fn export_to_writer<W: Write>(&self, writer: W) -> Result<usize, Error> {
        let mut exporter = CsvExporter::new(writer, self.languages())?;
        for file in &self.files {
            let entries = self.merged_entries(file)?;
            exporter.write_entries(file, &entries)?;
        }
        let rows = exporter.rows();
        exporter.finish()?.flush()?;
        Ok(rows)
    }

    /// Writes the CSV table to `path`.
    ///
    /// Rows go to a temporary file next to `path`, which replaces `path` only
    /// once every row is written. On error the destination is left untouched.
    /// The result keeps the permissions of the file it replaces, or gets the
    /// usual umask-derived ones when `path` is new.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, Error> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".strings2csv-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let tmp = builder.tempfile_in(dir)?;

        let rows = self.export_to_writer(BufWriter::new(tmp.as_file()))?;
        if let Ok(existing) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), existing.permissions())?;
        }
        tmp.persist(path)?;

        tracing::info!(
            output = %path.display(),
            files = self.files.len(),
            rows,
            "exported localizations"
        );
        Ok(rows)
    }
}

/// Groups resource files sharing a directory and file name.
///
/// Groups keep the order in which their first file was seen, and each group's
/// languages keep the order in which they were seen.
pub fn merge_resource_files<I>(files: I) -> Vec<MergedFile>
where
    I: IntoIterator<Item = ResourceFile>,
{
    let mut groups: IndexMap<(PathBuf, String), MergedFile> = IndexMap::new();
    for file in files {
        let ResourceFile {
            location,
            dir,
            language,
            filename,
        } = file;
        groups
            .entry((location.clone(), filename.clone()))
            .or_insert_with(|| MergedFile::new(dir, filename).with_location(location))
            .add_language(&language);
    }
    groups.into_values().collect()
}

/// Distinct languages across `files`, in first-seen order.
pub fn collect_languages(files: &[MergedFile]) -> Vec<String> {
    let mut languages: Vec<String> = Vec::new();
    for lang in files.iter().flat_map(|f| &f.languages) {
        if !languages.contains(lang) {
            languages.push(lang.clone());
        }
    }
    languages
}

/// Parses every language of `file` and folds the entries together.
///
/// The base (first) language is parsed first. Entries from later languages
/// add their value to an existing entry, keeping its comment, or are appended
/// when the identifier is new. A missing or unreadable language file is an error.
pub fn merge_contents(file: &MergedFile) -> Result<IndexMap<String, Entry>, Error> {
    let Some((base, others)) = file.languages.split_first() else {
        return Ok(IndexMap::new());
    };

    let mut merged = read_entries(file, base)?;
    for lang in others {
        for (id, entry) in read_entries(file, lang)? {
            match merged.get_mut(&id) {
                Some(existing) => {
                    if let Some(value) = entry.values.into_values().next() {
                        existing.values.insert(lang.clone(), value);
                    }
                }
                None => {
                    merged.insert(id, entry);
                }
            }
        }
    }

    tracing::debug!(
        file = %file.path_for(base).display(),
        languages = file.languages.len(),
        entries = merged.len(),
        "merged file contents"
    );
    Ok(merged)
}

fn read_entries(file: &MergedFile, language: &str) -> Result<IndexMap<String, Entry>, Error> {
    Ok(StringsFormat::read_from(file.path_for(language))?.into_entries(language))
}

/// Scans `root` and writes the CSV table to `output`.
pub fn export<P: AsRef<Path>, Q: AsRef<Path>>(root: P, output: Q) -> Result<usize, Error> {
    Codec::scan(root)?.export_to_file(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn resource(dir: &str, language: &str, filename: &str) -> ResourceFile {
        ResourceFile {
            location: PathBuf::from(dir),
            dir: PathBuf::from(dir),
            language: language.to_string(),
            filename: filename.to_string(),
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_merge_resource_files_groups_by_dir_and_name() {
        let merged = merge_resource_files(vec![
            resource("App", "en", "App.strings"),
            resource("App", "en", "Main.strings"),
            resource("App", "fr", "App.strings"),
            resource("Kit", "fr", "App.strings"),
            resource("App", "de", "Main.strings"),
            resource("App", "fr", "App.strings"),
        ]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].dir, PathBuf::from("App"));
        assert_eq!(merged[0].filename, "App.strings");
        assert_eq!(merged[0].languages, vec!["en", "fr"]);
        assert_eq!(merged[1].filename, "Main.strings");
        assert_eq!(merged[1].languages, vec!["en", "de"]);
        assert_eq!(merged[2].dir, PathBuf::from("Kit"));
        assert_eq!(merged[2].languages, vec!["fr"]);
    }

    #[test]
    fn test_collect_languages_first_seen_order() {
        let merged = merge_resource_files(vec![
            resource("A", "fr", "x.strings"),
            resource("A", "en", "x.strings"),
            resource("B", "en", "y.strings"),
            resource("B", "ja", "y.strings"),
        ]);
        assert_eq!(collect_languages(&merged), vec!["fr", "en", "ja"]);
        assert!(collect_languages(&[]).is_empty());
    }

    #[test]
    fn test_merge_contents_keeps_base_comment_and_adds_new_ids() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "App/en.lproj/App.strings",
            "/* Greeting */\n\"HELLO\" = \"Hi\";\n\"BYE\" = \"Bye\";\n",
        );
        write(
            dir.path(),
            "App/fr.lproj/App.strings",
            "/* Salutation */\n\"HELLO\" = \"Salut\";\n/* French only */\n\"EXTRA\" = \"En plus\";\n",
        );

        let mut file =
            MergedFile::new("App", "App.strings").with_location(dir.path().join("App"));
        file.add_language("en");
        file.add_language("fr");

        let merged = merge_contents(&file).unwrap();
        let ids: Vec<_> = merged.keys().cloned().collect();
        assert_eq!(ids, vec!["HELLO", "BYE", "EXTRA"]);

        let hello = &merged["HELLO"];
        assert_eq!(hello.comment.as_deref(), Some("/* Greeting */"));
        assert_eq!(hello.value("en"), Some("Hi"));
        assert_eq!(hello.value("fr"), Some("Salut"));

        assert_eq!(merged["BYE"].value("fr"), None);

        let extra = &merged["EXTRA"];
        assert_eq!(extra.comment.as_deref(), Some("/* French only */"));
        assert_eq!(extra.value("en"), None);
        assert_eq!(extra.value("fr"), Some("En plus"));
    }

    #[test]
    fn test_merge_contents_missing_language_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/en.lproj/App.strings", "\"HELLO\" = \"Hi\";\n");

        let mut file =
            MergedFile::new("App", "App.strings").with_location(dir.path().join("App"));
        file.add_language("en");
        file.add_language("fr");

        let err = merge_contents(&file).unwrap_err();
        assert!(matches!(err, Error::ResourceRead { .. }));
        assert!(err.to_string().contains("fr.lproj"));
    }

    #[test]
    fn test_export_to_writer() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/en.lproj/App.strings", "\"HELLO\" = \"Hi\";\n");
        write(dir.path(), "App/fr.lproj/App.strings", "\"HELLO\" = \"Salut\";\n");

        let codec = Codec::scan(dir.path()).unwrap();
        assert_eq!(codec.languages(), vec!["en", "fr"]);

        let mut out = Vec::new();
        let rows = codec.export_to_writer(&mut out).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "path,file,object-id,comment,en,fr\r\nApp/,App.strings,HELLO,,Hi,Salut\r\n"
        );
    }

    #[test]
    fn test_export_to_file_leaves_destination_on_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "App/en.lproj/App.strings", "\"HELLO\" = \"Hi\";\n");
        let output = dir.path().join("out.csv");
        fs::write(&output, "previous").unwrap();

        let mut codec = Codec::scan(dir.path()).unwrap();
        codec.files[0].add_language("fr");

        assert!(codec.export_to_file(&output).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|n| n != "App" && n != "out.csv")
            .collect();
        assert!(leftovers.is_empty(), "temporary files left: {leftovers:?}");
    }

    #[test]
    fn test_export_to_file_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.lproj/Root.strings", "\"A\" = \"a, b\";\n");
        let output = dir.path().join("out.csv");
        fs::write(&output, "previous").unwrap();

        let rows = export(dir.path(), &output).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "path,file,object-id,comment,en\r\n,Root.strings,A,,\"a, b\"\r\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_export_to_file_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.lproj/Root.strings", "\"A\" = \"a\";\n");
        let output = dir.path().join("out.csv");
        fs::write(&output, "previous").unwrap();
        fs::set_permissions(&output, fs::Permissions::from_mode(0o644)).unwrap();

        export(dir.path(), &output).unwrap();
        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);

        fs::set_permissions(&output, fs::Permissions::from_mode(0o640)).unwrap();
        export(dir.path(), &output).unwrap();
        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_export_to_file_new_output_uses_umask_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "en.lproj/Root.strings", "\"A\" = \"a\";\n");
        let reference = dir.path().join("reference.txt");
        fs::write(&reference, "").unwrap();
        let output = dir.path().join("out.csv");

        export(dir.path(), &output).unwrap();
        let expected = fs::metadata(&reference).unwrap().permissions().mode() & 0o777;
        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }
}
