use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the save slot and the high-score file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Nothing stored at the path yet.
    #[error("no file at {}", .0.display())]
    Missing(PathBuf),
    /// The file exists but could not be read or written.
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The contents do not match the expected record layout.
    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl PersistenceError {
    /// Map an I/O error, treating "not found" as a missing file.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            PersistenceError::Missing(path)
        } else {
            PersistenceError::Io { path, source }
        }
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        PersistenceError::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
