//! General error types for the reader and writer

use crate::coords::Coords;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Global result type used throughout the reader and writer
pub type JsonResult<T> = Result<T, Error>;

/// Enumeration of the various different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The JSON reader (automaton) stage
    Reader,
    /// The JSON writer stage
    Writer,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Reader => write!(f, "reader"),
            Stage::Writer => write!(f, "writer"),
        }
    }
}

/// A global enumeration of error details
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Details {
    /// The automaton hit an invalid `(state, input class)` transition on the `found` byte
    #[error("invalid input {}", describe_byte(.found))]
    MalformedInput { found: u8 },
    /// An unrecognised `\<byte>` escape inside a string
    #[error("invalid escape code {}", describe_byte(.0))]
    InvalidEscapeSequence(u8),
    /// `finish()` was called without a completed top-level map or array
    #[error("no JSON top-level object or array found")]
    IncompleteDocument,
    /// Input or `finish()` came before `start()`, after a failed parse, or after a finish
    #[error("reader not started")]
    NotStarted,
    /// A file could not be opened
    #[error("unable to open input file")]
    InvalidFile,
    /// Containers were nested deeper than the reader allows
    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
    /// The state or value stack underflowed
    #[error("invalid reader state")]
    CorruptState,
    /// The underlying source or sink failed
    #[error("stream failure: {0}")]
    StreamFailure(String),
}

impl Details {
    /// Whether this error is a flavour of malformed input
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            Details::MalformedInput { .. } | Details::InvalidEscapeSequence(_)
        )
    }
}

/// The general error structure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{stage} error: {details}{}{}", location(.coords), context(.near))]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The details for the error
    pub details: Details,
    /// Optional input coordinates
    pub coords: Option<Coords>,
    /// Optional snippet of the input leading up to the failure
    pub near: Option<String>,
}

impl Error {
    /// The 1-based input line associated with the error, if known
    pub fn line(&self) -> Option<usize> {
        self.coords.map(|c| c.line)
    }
}

/// ASCII bytes render as quoted chars, anything else (such as part of a multi-byte UTF-8
/// sequence) as `\xNN`
fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii() {
        format!("{:?}", *byte as char)
    } else {
        format!("\\x{:02x}", byte)
    }
}

fn location(coords: &Option<Coords>) -> String {
    match coords {
        Some(c) => format!(" at line {}, column {}", c.line, c.column),
        None => String::new(),
    }
}

fn context(near: &Option<String>) -> String {
    match near {
        Some(n) => format!(", near \"{}\"", n),
        None => String::new(),
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            stage: Stage::Writer,
            details: Details::StreamFailure(err.to_string()),
            coords: None,
            near: None,
        }
    }
}

#[macro_export]
macro_rules! reader_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Reader,
            details: $details,
            coords: Some($coords),
            near: None,
        })
    };
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Reader,
            details: $details,
            coords: None,
            near: None,
        })
    };
}

#[macro_export]
macro_rules! writer_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Writer,
            details: $details,
            coords: None,
            near: None,
        })
    };
}

#[cfg(test)]
mod tests {
    use super::{Details, Error, JsonResult};
    use crate::coords::Coords;

    #[test]
    fn errors_should_render_line_and_context() {
        let mut coords = Coords::default();
        coords.advance(b'\n');
        let mut err: JsonResult<()> = reader_error!(Details::MalformedInput { found: b'x' }, coords);
        if let Err(e) = err.as_mut() {
            e.near = Some("{\"a\":x".to_string());
        }
        let rendered = err.unwrap_err().to_string();
        assert_eq!(
            rendered,
            "reader error: invalid input 'x' at line 2, column 0, near \"{\"a\":x\""
        );
    }

    #[test]
    fn escape_errors_are_malformed_input() {
        assert!(Details::InvalidEscapeSequence(b'q').is_malformed_input());
        assert!(!Details::IncompleteDocument.is_malformed_input());
    }

    #[test]
    fn non_ascii_bytes_should_render_as_hex() {
        assert_eq!(
            Details::MalformedInput { found: 0xc3 }.to_string(),
            "invalid input \\xc3"
        );
        assert_eq!(Details::MalformedInput { found: b'}' }.to_string(), "invalid input '}'");
        assert_eq!(
            Details::InvalidEscapeSequence(b'q').to_string(),
            "invalid escape code 'q'"
        );
    }

    #[test]
    fn io_errors_should_convert_to_stream_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "sink closed");
        let err: Error = io.into();
        assert_eq!(err.details, Details::StreamFailure("sink closed".to_string()));
        assert!(err.line().is_none());
    }
}
