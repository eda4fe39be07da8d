//! All error types for the strings2csv crate.
//!
//! These are returned from all fallible operations (scanning, parsing, exporting).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read resource file `{}`: {source}", path.display())]
    ResourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a directory: `{}`", .0.display())]
    InvalidRoot(PathBuf),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to move output into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    /// Wraps an I/O failure on a resource file together with its path.
    pub fn resource_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ResourceRead {
            path: path.into(),
            source,
        }
    }
}
