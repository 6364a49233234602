//! PREfast defect records, the input of [`crate::sarif::convert`].
//!
//! Field names follow the PREfast defect report (`DEFECTCODE` becomes
//! `defectCode`, `FUNCLINE` becomes `funcLine`, ...). Line and column stay
//! textual, as the report stores them, and are validated while the SARIF
//! region is built.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One reported defect.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Defect {
    /// Where the defect was reported.
    pub sfa: Sfa,
    /// Execution path leading to the defect, in order.
    pub path: Vec<Sfa>,
    pub defect_code: String,
    pub description: String,
    pub function: String,
    /// Decorated (mangled) name of `function`.
    pub decorated: String,
    pub func_line: String,
    pub probability: String,
    pub rank: String,
    /// `CATEGORY` children, keyed by PREfast tag name.
    pub category: BTreeMap<String, String>,
    /// `ADDITIONALINFO` children, keyed by PREfast tag name.
    pub additional_info: BTreeMap<String, String>,
}

/// A source file anchor ("SFA"): a file position, optionally annotated with a
/// key event when it is part of a defect path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sfa {
    /// Directory part, usually with a trailing backslash.
    pub file_path: String,
    pub file_name: String,
    pub line: String,
    pub column: String,
    pub key_event: Option<KeyEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyEvent {
    pub id: String,
    pub kind: String,
    pub importance: String,
    pub message: String,
}
