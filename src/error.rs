//! Error types for the gaze selection library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Wrong number of landmarks supplied for an eye contour
    #[error("Invalid eye contour: expected {expected} points, found {found}")]
    InvalidContour {
        /// Number of points an eye contour requires
        expected: usize,
        /// Number of points actually supplied
        found: usize,
    },

    /// Malformed configuration, rejected at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A landmark record could not be decoded
    #[error("Landmark format error: {0}")]
    LandmarkFormat(String),

    /// Landmark capture thread failed
    #[error("Capture error: {0}")]
    Capture(String),

    /// Pointer backend operation failed
    #[error("Cursor control error: {0}")]
    CursorControl(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
