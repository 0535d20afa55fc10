//! Error types for obj-reproject

use std::fmt;
use std::io;

/// Result type for obj-reproject operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reprojecting a mesh
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// A vertex field is not a valid number
    Parse { token: String },

    /// Unrecognized reference system or failed projection
    Conversion(String),

    /// Invalid run configuration
    Config(String),

    /// Failure while processing a specific line of the source file
    Line {
        number: usize,
        content: String,
        source: Box<Error>,
    },
}

impl Error {
    /// Attaches a 1-based line number and the raw line to this error
    pub fn at_line(self, number: usize, content: &str) -> Self {
        Error::Line {
            number,
            content: content.to_string(),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse { token } => write!(f, "Parse error: '{}' is not a number", token),
            Error::Conversion(msg) => write!(f, "Conversion error: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Line { number, content, source } => {
                write!(f, "line {}: {} ({:?})", number, source, content)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Line { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Conversion("unknown CRS".to_string());
        assert_eq!(err.to_string(), "Conversion error: unknown CRS");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_parse_error_names_token() {
        let err = Error::Parse { token: "foo".to_string() };
        assert!(err.to_string().contains("'foo'"));
    }

    #[test]
    fn test_line_context() {
        let err = Error::Parse { token: "foo".to_string() }.at_line(7, "v 1.0 foo 3.0");
        let msg = err.to_string();
        assert!(msg.starts_with("line 7:"));
        assert!(msg.contains("v 1.0 foo 3.0"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
