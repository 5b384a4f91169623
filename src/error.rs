//! Error types for the reader and evaluator.

use std::fmt;

/// Categories of failure surfaced by `read` and `eval`.
///
/// Every failure renders as a single descriptive message; recovery is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed or unterminated input text
    Parse {
        input: String,
        offset: usize,
        message: String,
    },
    /// Atom with no binding in the environment
    UnresolvedSymbol(String),
    /// Primitive or function called with the wrong number of arguments
    Arity {
        name: String,
        expected: usize,
        given: usize,
    },
    /// Malformed special form or bad primitive argument shape
    Structure(String),
}

impl Error {
    /// Create a parse error carrying the offending text and cursor offset.
    pub fn parse(input: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            input: input.into(),
            offset,
            message: message.into(),
        }
    }

    /// Create an unresolved-symbol error.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Error::UnresolvedSymbol(name.into())
    }

    /// Create an arity error naming the primitive or function.
    pub fn arity(name: impl Into<String>, expected: usize, given: usize) -> Self {
        Error::Arity {
            name: name.into(),
            expected,
            given,
        }
    }

    /// Create a structural error.
    pub fn structure(message: impl Into<String>) -> Self {
        Error::Structure(message.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse {
                input,
                offset,
                message,
            } => {
                write!(f, "Error parsing \"{input}\" at {offset}: {message}")
            }
            Error::UnresolvedSymbol(name) => write!(f, "Unable to resolve atom '{name}'"),
            Error::Arity {
                name,
                expected,
                given,
            } => {
                write!(f, "'{name}' requires {expected} args, {given} given")
            }
            Error::Structure(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}
