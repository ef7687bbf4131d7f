//! Error and result types for the interpreter.

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::value::Value;

/// An evaluation outcome: the resulting value, or the error that aborted it.
pub type EvalResult = Result<Value, Error>;

/// Any failure the interpreter can surface to the host.
///
/// The first four variants are the language's error taxonomy; each carries
/// the most specific source line known at its origin (−1 when unknown).
/// `Io` is transport failure on the output sink, kept separate so a host
/// can distinguish it from program errors.
#[derive(Debug)]
pub enum Error {
    /// Lexing or parsing failure.
    Parse { message: String, line: i32 },
    /// An identifier resolved to no built-in, user function, or variable.
    NotFound { name: String, line: i32 },
    /// Arity mismatch, wrong operand kind, or a domain violation.
    Argument { message: String, line: i32 },
    /// A value payload accessor was called on the wrong tag.
    InternalType { message: String, line: i32 },
    /// The output sink failed to accept bytes.
    Io(io::Error),
}

impl Error {
    pub fn parse(message: impl Into<String>, line: i32) -> Self {
        Error::Parse {
            message: message.into(),
            line,
        }
    }

    pub fn not_found(name: impl Into<String>, line: i32) -> Self {
        Error::NotFound {
            name: name.into(),
            line,
        }
    }

    pub fn argument(message: impl Into<String>, line: i32) -> Self {
        Error::Argument {
            message: message.into(),
            line,
        }
    }

    pub fn internal_type(message: impl Into<String>, line: i32) -> Self {
        Error::InternalType {
            message: message.into(),
            line,
        }
    }

    /// Source line the error is attached to, or −1 when unknown.
    pub fn line(&self) -> i32 {
        match self {
            Error::Parse { line, .. }
            | Error::NotFound { line, .. }
            | Error::Argument { line, .. }
            | Error::InternalType { line, .. } => *line,
            Error::Io(_) => -1,
        }
    }
}

fn write_line_suffix(f: &mut Formatter<'_>, line: i32) -> fmt::Result {
    if line >= 1 {
        write!(f, " (line {line})")
    } else {
        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { message, line } => {
                write!(f, "parse error: {message}")?;
                write_line_suffix(f, *line)
            }
            Error::NotFound { name, line } => {
                write!(f, "'{name}' does not exist in this namespace")?;
                write_line_suffix(f, *line)
            }
            Error::Argument { message, line } => {
                write!(f, "{message}")?;
                write_line_suffix(f, *line)
            }
            Error::InternalType { message, line } => {
                write!(f, "type error: {message}")?;
                write_line_suffix(f, *line)
            }
            Error::Io(err) => write!(f, "output error: {err}"),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_identifier() {
        let err = Error::not_found("foo", 4);
        assert_eq!(err.to_string(), "'foo' does not exist in this namespace (line 4)");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn unknown_line_is_omitted_from_display() {
        let err = Error::argument("cannot divide by zero", -1);
        assert_eq!(err.to_string(), "cannot divide by zero");
        assert_eq!(err.line(), -1);
    }

    #[test]
    fn io_errors_convert_via_from() {
        let err: Error = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.line(), -1);
    }
}
