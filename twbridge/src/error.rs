//! All error types for the twbridge crate.
//!
//! The two export rejections are expected outcomes for individual strings:
//! callers report them and move on to the next string. The remaining variants
//! come from reading and writing project files.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unrecognized \"%\" directive `{directive}` in string: {string}")]
    UnrecognizedDirective { directive: String, string: String },

    #[error("string contains a \"$\" symbol: {string}")]
    AmbiguousDollarSign { string: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    /// Whether this error rejects a single string rather than the whole run.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::UnrecognizedDirective { .. } | Error::AmbiguousDollarSign { .. }
        )
    }
}
