//! Error types for the resumedoc library.

use std::io;
use thiserror::Error;

/// Result type alias for resumedoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a DOCX package.
///
/// Malformed marker text is never an error: unrecognized lines degrade to
/// plain paragraphs, so the variants here all describe failures of the
/// document-construction step itself. A failed render produces no partial
/// output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing package parts.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error serializing a WordprocessingML part.
    #[error("XML serialization error: {0}")]
    Xml(String),

    /// Error assembling the OPC zip container.
    #[error("DOCX packaging error: {0}")]
    Package(#[from] zip::result::ZipError),

    /// Error during rendering (JSON inspection output, invalid run data).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Xml("unexpected end of element".to_string());
        assert_eq!(
            err.to_string(),
            "XML serialization error: unexpected end of element"
        );

        let err = Error::Render("bad run".to_string());
        assert_eq!(err.to_string(), "Rendering error: bad run");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
