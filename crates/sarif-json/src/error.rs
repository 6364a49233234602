//! Error types for value access, parsing and SARIF construction.

use crate::value::ValueKind;
use thiserror::Error;

/// Errors that can occur while reading, parsing or building JSON documents.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    /// A typed accessor was called on a value of a different kind.
    /// `expected` is the tag name of the required kind (or `IsNumeric`).
    #[error("json value of kind {expected} required, found {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: ValueKind,
    },

    /// The input text was not a well-formed document.
    /// `offset` is the byte offset into the text handed to the parser.
    #[error("JSON parse error at byte {offset}: {message}")]
    Parse { offset: usize, message: String },

    /// A SARIF region that is neither valid nor the `(0, 0)` "no region" marker.
    #[error("Invalid region specified. Start Line : {line} Start Column : {column}")]
    InvalidRegion { line: i32, column: i32 },

    /// A textual SARIF field that is not a base-10 integer.
    #[error("Invalid {field} specified: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// Convenience alias used throughout sarif-json.
pub type Result<T> = std::result::Result<T, JsonError>;
