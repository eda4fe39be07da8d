//! Traits for parsing localization resources.

use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing one localization resource file.
///
/// # Example
///
/// ```rust,no_run
/// use strings2csv::traits::Parser;
/// let format = strings2csv::formats::StringsFormat::read_from("en.lproj/App.strings")?;
/// println!("{} entries", format.pairs.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// A UTF-8 or UTF-16 byte order mark selects the encoding; without one
    /// the content is read as UTF-8, with invalid bytes replaced by U+FFFD.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::resource_read(path, e))?;
        let decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding_rs::UTF_8))
            .bom_override(true)
            .build(file);

        Self::from_reader(BufReader::new(decoder)).map_err(|e| match e {
            Error::Io(source) => Error::resource_read(path, source),
            other => other,
        })
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }
}
