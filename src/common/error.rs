//! Error types for gridbase.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in gridbase.
///
/// Page files are named after their logical identity, so errors carry the
/// backing file name rather than a separate table/index pair.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from reading, writing, or deleting a page file.
    ///
    /// This wraps `std::io::Error` from file operations other than a plain
    /// missing file on read, which maps to [`Error::PageNotFound`].
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file for a requested page does not exist.
    #[error("page file {0} not found")]
    PageNotFound(String),

    /// A backing file exists but its contents cannot be decoded.
    #[error("page file {file} is corrupt: {reason}")]
    CorruptPage { file: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PageNotFound("orders_Page3".to_string());
        assert_eq!(format!("{}", err), "page file orders_Page3 not found");

        let err = Error::CorruptPage {
            file: "grid_Page0_1".to_string(),
            reason: "checksum mismatch".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "page file grid_Page0_1 is corrupt: checksum mismatch"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_io_error_source_is_preserved() {
        use std::error::Error as _;

        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "disk fell over");
        let err: Error = io_err.into();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_type_alias() {
        // This function returns our Result type
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
