pub mod csv;
pub mod strings;

// Reexporting the formats for easier access
pub use self::csv::CsvExporter;
pub use strings::Format as StringsFormat;
