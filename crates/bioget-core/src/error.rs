//! Error types for bioget-core.

use thiserror::Error;

use crate::reference::ObjectKind;

/// Diagnostic codes surfaced to the user, one per failure class.
pub mod diagnostic {
    /// Malformed reference or referenced entity does not exist.
    pub const INVALID_OR_MISSING: i32 = 601;
    /// Image has no associated fileset.
    pub const NO_FILESET: i32 = 602;
    /// Image has more than one associated file.
    pub const MULTIPLE_FILES: i32 = 603;
    /// Unexpected validation failure during transfer.
    pub const RACE_VALIDATION: i32 = 67;
    /// Any other failure (I/O, transport, session).
    pub const GENERAL: i32 = 1;
}

/// Main error type for bioget operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed object reference or non-numeric id.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The referenced entity does not exist on the server.
    #[error("no {kind} with id {id}")]
    NotFound { kind: ObjectKind, id: i64 },

    /// A FileAnnotation exists but carries no attached file.
    #[error("FileAnnotation {annotation_id} has no attached file")]
    NoAttachedFile { annotation_id: i64 },

    /// The image has no associated fileset.
    #[error("image {image_id} has no associated fileset")]
    NoFileset { image_id: i64 },

    /// Ambiguous resolution: the image's fileset holds more than one file.
    #[error("image {image_id} has more than 1 associated file: {count}")]
    MultipleFiles { image_id: i64, count: usize },

    /// Server-side validation failure reported by the download transport.
    #[error("validation failure: {message}")]
    Validation { message: String },

    /// The object vanished between resolution and download.
    #[error("unexpected validation failure during transfer: {message}")]
    RaceValidation { message: String },

    /// Transport layer error.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Session configuration or establishment error.
    #[error("session error: {message}")]
    Session { message: String },
}

impl Error {
    /// Build an `InvalidInput` error from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput {
            message: message.into(),
        }
    }

    /// Diagnostic code reported when this error terminates a command.
    pub fn diagnostic_code(&self) -> i32 {
        match self {
            Error::InvalidInput { .. }
            | Error::NotFound { .. }
            | Error::NoAttachedFile { .. } => diagnostic::INVALID_OR_MISSING,
            Error::NoFileset { .. } => diagnostic::NO_FILESET,
            Error::MultipleFiles { .. } => diagnostic::MULTIPLE_FILES,
            Error::RaceValidation { .. } => diagnostic::RACE_VALIDATION,
            Error::Io(_)
            | Error::Validation { .. }
            | Error::Transport { .. }
            | Error::Session { .. } => diagnostic::GENERAL,
        }
    }

    /// Returns true if this error was produced during resolution.
    ///
    /// Resolution errors happen before any bytes are written to the
    /// destination, so they can never leave partial output behind.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. }
                | Error::NotFound { .. }
                | Error::NoAttachedFile { .. }
                | Error::NoFileset { .. }
                | Error::MultipleFiles { .. }
        )
    }
}

/// Convenience result type for bioget operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_not_found() {
        let err = Error::NotFound {
            kind: ObjectKind::OriginalFile,
            id: 2,
        };
        assert_eq!(err.to_string(), "no OriginalFile with id 2");
    }

    #[test]
    fn error_display_multiple_files() {
        let err = Error::MultipleFiles {
            image_id: 5,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "image 5 has more than 1 associated file: 3"
        );
    }

    #[test]
    fn error_display_race_validation() {
        let err = Error::RaceValidation {
            message: "file 9 no longer exists".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected validation failure during transfer: file 9 no longer exists"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn diagnostic_codes() {
        assert_eq!(Error::invalid_input("bad").diagnostic_code(), 601);
        assert_eq!(
            Error::NotFound {
                kind: ObjectKind::Image,
                id: 5
            }
            .diagnostic_code(),
            601
        );
        assert_eq!(
            Error::NoAttachedFile { annotation_id: 20 }.diagnostic_code(),
            601
        );
        assert_eq!(Error::NoFileset { image_id: 5 }.diagnostic_code(), 602);
        assert_eq!(
            Error::MultipleFiles {
                image_id: 5,
                count: 2
            }
            .diagnostic_code(),
            603
        );
        assert_eq!(
            Error::RaceValidation {
                message: "gone".into()
            }
            .diagnostic_code(),
            67
        );
        assert_eq!(
            Error::Transport {
                message: "lost".into()
            }
            .diagnostic_code(),
            1
        );
    }

    #[test]
    fn resolution_errors() {
        assert!(Error::invalid_input("bad").is_resolution_error());
        assert!(Error::NoFileset { image_id: 5 }.is_resolution_error());
        assert!(Error::MultipleFiles {
            image_id: 5,
            count: 2
        }
        .is_resolution_error());

        // These happen at or after download time
        assert!(!Error::RaceValidation {
            message: "gone".into()
        }
        .is_resolution_error());
        assert!(!Error::Transport {
            message: "lost".into()
        }
        .is_resolution_error());
    }
}
