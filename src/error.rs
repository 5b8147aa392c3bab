//! Error types for connection URI parsing and rendering.

use std::fmt;
use std::time::Duration;

/// Errors that can occur when resolving connection settings from a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is not syntactically a URI
    InvalidUri {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Scheme is neither `amqp` nor `amqps`
    UnsupportedScheme {
        /// The scheme that was found, if any
        found: Option<String>,
    },
    /// Path has more than one segment
    MultiSegmentPath {
        /// The offending path, as written in the URI
        path: String,
    },
    /// A recognized query parameter carries an unusable value
    InvalidQueryParam {
        /// Parameter name
        name: String,
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl ParseError {
    pub(crate) fn new(input: &str, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            kind,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse connection URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::InvalidUri { reason } => write!(f, "not a valid URI: {reason}"),
            ParseErrorKind::UnsupportedScheme { found } => match found {
                Some(s) => write!(f, "expected scheme 'amqp' or 'amqps', found '{s}'"),
                None => write!(f, "missing scheme; URI must start with 'amqp://' or 'amqps://'"),
            },
            ParseErrorKind::MultiSegmentPath { path } => write!(
                f,
                "path '{path}' has more than one segment; encode '/' in the vhost as %2F"
            ),
            ParseErrorKind::InvalidQueryParam {
                name,
                value,
                reason,
            } => {
                write!(f, "invalid value '{value}' for parameter '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors for rendering a settings record as a connection URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Host cannot be written into a URI authority as is
    InvalidHost {
        /// The offending host
        host: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Timeout has no exact `connection_timeout` form
    InvalidTimeout {
        /// The offending timeout
        timeout: Duration,
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHost { host, reason } => {
                write!(f, "cannot render host '{host}' into a URI: {reason}")
            }
            Self::InvalidTimeout { timeout, reason } => {
                write!(f, "cannot render timeout {timeout:?} into a URI: {reason}")
            }
        }
    }
}

impl std::error::Error for RenderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_input_and_reason() {
        let err = ParseError::new(
            "amqp://ho st",
            ParseErrorKind::InvalidUri {
                reason: "contains a character not allowed in URIs",
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("'amqp://ho st'"));
        assert!(msg.contains("not allowed"));
    }

    #[test]
    fn display_missing_scheme() {
        let err = ParseError::new("localhost", ParseErrorKind::UnsupportedScheme { found: None });
        assert!(err.to_string().contains("missing scheme"));
    }

    #[test]
    fn display_multi_segment_suggests_encoding() {
        let err = ParseError::new(
            "amqp://h/foo/bar",
            ParseErrorKind::MultiSegmentPath {
                path: "/foo/bar".to_string(),
            },
        );
        assert!(err.to_string().contains("%2F"));
    }

    #[test]
    fn render_error_names_the_field() {
        let err = RenderError::InvalidHost {
            host: String::new(),
            reason: "an empty host cannot be written in a URI",
        };
        assert!(err.to_string().contains("host ''"));

        let err = RenderError::InvalidTimeout {
            timeout: Duration::from_micros(1500),
            reason: "not a whole number of milliseconds",
        };
        assert!(err.to_string().contains("1.5ms"));
    }
}
