//! # sarif-json
//!
//! A small JSON document engine and the SARIF log builder that sits on top of it.
//!
//! Documents are trees of [`Value`]s. Objects keep their members in insertion
//! order, so what you build is exactly what [`serialize`] prints, which is what
//! lets the SARIF builder reproduce PREfast's golden output byte for byte.
//!
//! ## Quick start
//!
//! ```rust
//! use sarif_json::{deserialize, serialize};
//!
//! let doc = deserialize(r#"{"version":"1.0.0","runs":[1,2]}"#);
//! assert_eq!(doc["version"].to_str().unwrap(), "1.0.0");
//! assert_eq!(doc["runs"][1].to_int().unwrap(), 2);
//!
//! // Pretty-printed with one member per line
//! assert_eq!(
//!     serialize(&doc),
//!     "{\n\"version\":\"1.0.0\",\n\"runs\":[\n  1,2\n]\n}"
//! );
//!
//! // Malformed input reads as Null
//! assert!(deserialize("[1,2,}").is_null());
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` tagged union and typed accessors
//! - [`object`] / [`array`]: insertion-ordered containers
//! - [`serializer`]: value tree → JSON text
//! - [`deserializer`]: JSON text → value tree
//! - [`escape`]: string escaping and unescaping rules
//! - [`interop`]: conversions to and from `serde_json::Value`
//! - [`sarif`]: SARIF 1.0.0-beta.5 builders and the PREfast `convert` pipeline
//! - [`defect`]: PREfast defect records consumed by `convert`
//! - [`error`]: Error types for accessor and parse failures

pub mod array;
pub mod defect;
pub mod deserializer;
pub mod error;
pub mod escape;
pub mod interop;
pub mod object;
pub mod sarif;
pub mod serializer;
pub mod value;

pub use array::Array;
pub use defect::{Defect, KeyEvent, Sfa};
pub use deserializer::{deserialize, find_matching_close, try_deserialize};
pub use error::{JsonError, Result};
pub use escape::{add_escape_characters, decode_string, find_quote, unescape};
pub use object::Object;
pub use sarif::convert;
pub use serializer::serialize;
pub use value::{Value, ValueKind};
