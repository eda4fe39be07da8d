#![forbid(unsafe_code)]
//! Export Apple `.strings` localizations to a single CSV table.
//!
//! Walks a directory tree for `<lang>.lproj/<name>.strings` files, merges the
//! files that share a directory and name across languages, joins their entries
//! by object identifier and writes one row per entry with one column per language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strings2csv::Codec;
//!
//! let codec = Codec::scan(".")?;
//! println!("languages: {:?}", codec.languages());
//! codec.export_to_file("localizations.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Output
//!
//! ```text
//! path,file,object-id,comment,en,fr
//! App/,App.strings,HELLO,/* Greeting */,Hi,Salut
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod scan;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{
        Codec, DEFAULT_OUTPUT, collect_languages, export, merge_contents, merge_resource_files,
    },
    error::Error,
    scan::scan_resource_files,
    types::{Entry, ExportRow, MergedFile, ResourceFile},
};
