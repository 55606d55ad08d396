//! Error type shared by every fallible `LineEditor` operation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// Source file missing or unreadable (`load`).
    #[error("unable to read file at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Output target failed the writability check (`set_output_path`, `open`, `save`).
    #[error("unwritable file at {}", path.display())]
    Unwritable { path: PathBuf },
    /// The write itself failed after the target was accepted.
    #[error("failed to write file at {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output file path is not set")]
    NoOutputPath,
}

impl EditError {
    /// Path involved in the failure, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            EditError::Read { path, .. }
            | EditError::Unwritable { path }
            | EditError::Write { path, .. } => Some(path),
            EditError::NoOutputPath => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = EditError::Unwritable {
            path: PathBuf::from("/nope/.gitignore"),
        };
        assert_eq!(err.to_string(), "unwritable file at /nope/.gitignore");
        assert_eq!(err.path(), Some(std::path::Path::new("/nope/.gitignore")));
        assert!(EditError::NoOutputPath.path().is_none());
    }

    #[test]
    fn read_error_keeps_io_source() {
        use std::error::Error as _;
        let err = EditError::Read {
            path: PathBuf::from("missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }
}
