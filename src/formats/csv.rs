//! CSV export of merged entries.
//!
//! One header row `path,file,object-id,comment,<lang>...`, then one row per entry.
//! Fields are quoted only when they contain a comma, a quote or a line break.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::{
    error::Error,
    types::{Entry, ExportRow, MergedFile},
};

/// The fixed leading columns of every row.
pub const FIXED_COLUMNS: [&str; 4] = ["path", "file", "object-id", "comment"];

/// Streams rows into a CSV writer against a fixed list of language columns.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    languages: Vec<String>,
    rows: usize,
}

impl<W: Write> CsvExporter<W> {
    /// Creates the exporter and writes the header row.
    pub fn new(writer: W, languages: Vec<String>) -> Result<Self, Error> {
        let mut writer = WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        let header = FIXED_COLUMNS
            .iter()
            .copied()
            .chain(languages.iter().map(String::as_str));
        writer.write_record(header)?;

        Ok(CsvExporter {
            writer,
            languages,
            rows: 0,
        })
    }

    /// Writes one row per entry of `file`, in the given order.
    pub fn write_entries<'a, I>(&mut self, file: &MergedFile, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        for entry in entries {
            let row = ExportRow::new(file, entry, &self.languages);
            self.writer.write_record(row.fields())?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Number of entry rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}
