//! General error types for the parser and the document tree

use std::fmt::{Display, Formatter};

use crate::coords::Coords;
use crate::value::Kind;

/// Global result type used throughout the crate
pub type JsonResult<T> = Result<T, Error>;

/// Enumeration of the different stages that can produce an error
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stage {
    /// Raised whilst scanning input text and building a tree
    Parser,
    /// Raised whilst reading or mutating an existing tree
    Value,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parser => write!(f, "syntax"),
            Stage::Value => write!(f, "value"),
        }
    }
}

/// A global enumeration of error codes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Details {
    #[error("invalid syntax (did you expect '{0}'?)")]
    ExpectedLiteral(&'static str),
    #[error("invalid number format: '{0}'")]
    InvalidNumber(String),
    #[error("numbers can only be values")]
    NumberNotAllowed,
    #[error("literals can only be values")]
    UnexpectedLiteral,
    #[error("unexpected string")]
    UnexpectedString,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unexpected symbol '{0}'")]
    UnexpectedSymbol(char),
    #[error("unexpected delimiter '{0}'")]
    UnexpectedDelimiter(char),
    #[error("unbalanced closing delimiter")]
    UnbalancedClosingDelimiter,
    #[error("expected a {expected} but found a {found}")]
    TypeMismatch { expected: &'static str, found: Kind },
    #[error("instance must be an object, found a {0}")]
    NotAnObject(Kind),
    #[error("instance must be an array, found a {0}")]
    NotAnArray(Kind),
    #[error("key '{0}' not found")]
    KeyNotFound(String),
    #[error("index {index} is out of range for an array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("an entry with key '{0}' already exists")]
    DuplicateKey(String),
}

/// The general error structure
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The originating stage for the error
    pub stage: Stage,
    /// The global error code for the error
    pub details: Details,
    /// Input coordinates, present for all syntax errors
    pub coords: Option<Coords>,
}

impl Error {
    /// Whether this error was raised because of malformed input text
    pub fn is_syntax_error(&self) -> bool {
        matches!(self.stage, Stage::Parser)
    }

    /// The absolute character offset of the offending input, if any
    pub fn position(&self) -> Option<usize> {
        self.coords.map(|c| c.absolute)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.coords {
            Some(coords) => write!(f, "{} error: {} at {}", self.stage, self.details, coords),
            None => write!(f, "{} error: {}", self.stage, self.details),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.details)
    }
}

#[macro_export]
macro_rules! parser_error {
    ($details: expr, $coords: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Parser,
            details: $details,
            coords: Some($coords),
        })
    };
}

#[macro_export]
macro_rules! value_error {
    ($details: expr) => {
        Err($crate::errors::Error {
            stage: $crate::errors::Stage::Value,
            details: $details,
            coords: None,
        })
    };
}
