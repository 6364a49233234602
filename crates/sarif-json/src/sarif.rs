//! SARIF `1.0.0-beta.5` log construction on top of the [`Value`] model.
//!
//! Each builder owns an [`Object`] and fills it through the Object/Array API,
//! so member order in the output follows the order of the setter calls.
//! Appending builders (`add_*`) go through [`Object::get_array_element`] and
//! [`Object::get_object_element`] and therefore return `Result`.
//!
//! [`convert`] turns a list of PREfast [`Defect`]s into a complete log:
//!
//! ```
//! use sarif_json::defect::{Defect, Sfa};
//! use sarif_json::sarif::convert;
//!
//! let defect = Defect {
//!     sfa: Sfa {
//!         file_path: "c:\\src\\".into(),
//!         file_name: "main.cpp".into(),
//!         line: "12".into(),
//!         column: "4".into(),
//!         key_event: None,
//!     },
//!     defect_code: "6001".into(),
//!     description: "Using uninitialized memory 'x'.".into(),
//!     ..Defect::default()
//! };
//!
//! let log = convert(&[defect]).unwrap();
//! let result = &log["runs"][0]["results"][0];
//! assert_eq!(result["ruleId"].to_str().unwrap(), "6001");
//! assert_eq!(
//!     result["locations"][0]["resultFile"]["uri"].to_str().unwrap(),
//!     "file:///c:/src/main.cpp"
//! );
//! ```

use crate::defect::{Defect, Sfa};
use crate::error::{JsonError, Result};
use crate::object::Object;
use crate::value::Value;
use std::borrow::Cow;

pub const SARIF_VERSION: &str = "1.0.0-beta.5";
pub const SARIF_SCHEMA: &str = "http://json.schemastore.org/sarif-1.0.0-beta.5";

pub const TOOL_NAME: &str = "PREfast";
pub const TOOL_FULL_NAME: &str = "PREfast Code Analysis";
pub const TOOL_VERSION: &str = "14.0.0";

/// `file:///` URI for a local path, with backslashes turned into slashes.
pub fn make_uri(path: &str) -> String {
    format!("file:///{path}").replace('\\', "/")
}

/// URI of the file an SFA points into.
pub fn defect_uri(sfa: &Sfa) -> String {
    make_uri(&format!("{}{}", sfa.file_path, sfa.file_name))
}

/// SARIF property name for a PREfast category or additional-info tag.
pub fn map_property_tag(tag: &str) -> Option<&'static str> {
    match tag {
        "RULECATEGORY" => Some("ruleCategory"),
        _ => None,
    }
}

/// Parse a textual region field like `strtol`: surrounding whitespace is
/// ignored and an empty field reads as 0.
fn parse_field(field: &'static str, text: &str) -> Result<i32> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| JsonError::InvalidField {
        field,
        value: text.to_string(),
    })
}

fn add_property(values: &mut Object, key: &str, value: &str) -> Result<()> {
    values.get_object_element("properties")?.insert(key, value);
    Ok(())
}

/// A text region inside a file.
#[derive(Debug, Clone, Default)]
pub struct Region {
    start_line: i32,
    start_column: i32,
    values: Object,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start_line(&mut self, line: i32) {
        self.start_line = line;
        self.values.insert("startLine", line);
    }

    pub fn set_start_column(&mut self, column: i32) {
        self.start_column = column;
        self.values.insert("startColumn", column);
    }

    pub fn set_end_line(&mut self, line: i32) {
        self.values.insert("endLine", line);
    }

    pub fn set_end_column(&mut self, column: i32) {
        self.values.insert("endColumn", column);
    }

    pub fn set_char_offset(&mut self, offset: i32) {
        self.values.insert("charOffset", offset);
    }

    pub fn set_byte_offset(&mut self, offset: i32) {
        self.values.insert("byteOffset", offset);
    }

    pub fn set_length(&mut self, length: i32) {
        self.values.insert("length", length);
    }

    pub fn parse_start_line(&mut self, text: &str) -> Result<()> {
        self.set_start_line(parse_field("Start Line", text)?);
        Ok(())
    }

    pub fn parse_start_column(&mut self, text: &str) -> Result<()> {
        self.set_start_column(parse_field("Start Column", text)?);
        Ok(())
    }

    pub fn parse_end_line(&mut self, text: &str) -> Result<()> {
        self.set_end_line(parse_field("End Line", text)?);
        Ok(())
    }

    pub fn parse_end_column(&mut self, text: &str) -> Result<()> {
        self.set_end_column(parse_field("End Column", text)?);
        Ok(())
    }

    pub fn parse_char_offset(&mut self, text: &str) -> Result<()> {
        self.set_char_offset(parse_field("Char Offset", text)?);
        Ok(())
    }

    pub fn parse_byte_offset(&mut self, text: &str) -> Result<()> {
        self.set_byte_offset(parse_field("Byte Offset", text)?);
        Ok(())
    }

    pub fn parse_length(&mut self, text: &str) -> Result<()> {
        self.set_length(parse_field("Length", text)?);
        Ok(())
    }

    /// Whether the region should be emitted.
    ///
    /// PREfast reports internal errors at line 0, column 0; that pair means
    /// "no region" and yields `Ok(false)`. Any other non-positive line or
    /// negative column is an error.
    pub fn is_valid(&self) -> Result<bool> {
        match (self.start_line, self.start_column) {
            (line, column) if line > 0 && column >= 0 => Ok(true),
            (0, 0) => Ok(false),
            (line, column) => Err(JsonError::InvalidRegion { line, column }),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// A file reference with an optional region.
#[derive(Debug, Clone, Default)]
pub struct PhysicalLocation {
    values: Object,
}

impl PhysicalLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_uri(&mut self, uri: &str) {
        self.values.insert("uri", uri);
    }

    pub fn set_mime_type(&mut self, mime_type: &str) {
        self.values.insert("mimeType", mime_type);
    }

    pub fn set_region(&mut self, region: Region) {
        self.values.insert("region", region.into_value());
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LogicalLocation {
    values: Object,
}

impl LogicalLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.values.insert("name", name);
    }

    pub fn set_kind(&mut self, kind: &str) {
        self.values.insert("kind", kind);
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Where a result was found, physically and logically.
#[derive(Debug, Clone, Default)]
pub struct Location {
    values: Object,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result_file(&mut self, file: PhysicalLocation) {
        self.values.insert("resultFile", file.into_value());
    }

    pub fn set_fully_qualified_logical_name(&mut self, name: &str) {
        self.values.insert("fullyQualifiedLogicalName", name);
    }

    /// Key into the run's `logicalLocations` dictionary.
    pub fn set_logical_location_key(&mut self, key: &str) {
        self.values.insert("logicalLocationKey", key);
    }

    pub fn add_property(&mut self, key: &str, value: &str) -> Result<()> {
        add_property(&mut self.values, key, value)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// One step of a code flow.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedCodeLocation {
    values: Object,
}

impl AnnotatedCodeLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_physical_location(&mut self, location: PhysicalLocation) {
        self.values.insert("physicalLocation", location.into_value());
    }

    pub fn set_message(&mut self, message: &str) {
        self.values.insert("message", message);
    }

    pub fn add_property(&mut self, key: &str, value: &str) -> Result<()> {
        add_property(&mut self.values, key, value)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeFlow {
    values: Object,
}

impl CodeFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_annotated_code_location(&mut self, location: AnnotatedCodeLocation) -> Result<()> {
        self.values
            .get_array_element("locations")?
            .push(location.into_value());
        Ok(())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// A single analysis finding.
#[derive(Debug, Clone, Default)]
pub struct SarifResult {
    values: Object,
}

impl SarifResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rule_id(&mut self, id: &str) {
        self.values.insert("ruleId", id);
    }

    pub fn set_message(&mut self, message: &str) {
        self.values.insert("message", message);
    }

    pub fn add_location(&mut self, location: Location) -> Result<()> {
        self.values
            .get_array_element("locations")?
            .push(location.into_value());
        Ok(())
    }

    pub fn add_property(&mut self, key: &str, value: &str) -> Result<()> {
        add_property(&mut self.values, key, value)
    }

    pub fn add_code_flow(&mut self, flow: CodeFlow) -> Result<()> {
        self.values
            .get_array_element("codeFlows")?
            .push(flow.into_value());
        Ok(())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tool {
    values: Object,
}

impl Tool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.values.insert("name", name);
    }

    pub fn set_full_name(&mut self, full_name: &str) {
        self.values.insert("fullName", full_name);
    }

    pub fn set_version(&mut self, version: &str) {
        self.values.insert("version", version);
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// One invocation of an analysis tool and everything it reported.
#[derive(Debug, Clone, Default)]
pub struct Run {
    values: Object,
}

impl Run {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.values.insert("tool", tool.into_value());
    }

    pub fn add_result(&mut self, result: SarifResult) -> Result<()> {
        self.values
            .get_array_element("results")?
            .push(result.into_value());
        Ok(())
    }

    /// Register `location` under `key`; a later registration under the same
    /// key replaces the earlier one in place.
    pub fn add_logical_location(&mut self, key: &str, location: LogicalLocation) -> Result<()> {
        self.values
            .get_object_element("logicalLocations")?
            .insert(key, location.into_value());
        Ok(())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// The root of a SARIF document.
#[derive(Debug, Clone, Default)]
pub struct SarifLog {
    values: Object,
}

impl SarifLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_version(&mut self, version: &str) {
        self.values.insert("version", version);
    }

    pub fn set_schema(&mut self, schema: &str) {
        self.values.insert("$schema", schema);
    }

    pub fn add_run(&mut self, run: Run) -> Result<()> {
        self.values.get_array_element("runs")?.push(run.into_value());
        Ok(())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Build a SARIF log with a single PREfast run holding one result per defect.
pub fn convert(defects: &[Defect]) -> Result<Value> {
    tracing::debug!(defects = defects.len(), "building SARIF log");

    let mut log = SarifLog::new();
    log.set_version(SARIF_VERSION);
    log.set_schema(SARIF_SCHEMA);

    let mut tool = Tool::new();
    tool.set_name(TOOL_NAME);
    tool.set_full_name(TOOL_FULL_NAME);
    tool.set_version(TOOL_VERSION);

    let mut run = Run::new();
    run.set_tool(tool);

    for defect in defects {
        let result = convert_defect(defect, &mut run)?;
        run.add_result(result)?;
    }
    log.add_run(run)?;

    Ok(log.into_value())
}

fn convert_defect(defect: &Defect, run: &mut Run) -> Result<SarifResult> {
    tracing::trace!(code = %defect.defect_code, function = %defect.function, "converting defect");

    let mut result_file = PhysicalLocation::new();
    result_file.set_uri(&defect_uri(&defect.sfa));
    if let Some(region) = sfa_region(&defect.sfa)? {
        result_file.set_region(region);
    }

    let mut location = Location::new();
    location.set_result_file(result_file);
    location.set_fully_qualified_logical_name(&defect.function);

    let mut logical = LogicalLocation::new();
    logical.set_name(&defect.function);
    logical.set_kind("method");
    location.set_logical_location_key(&defect.decorated);
    run.add_logical_location(&defect.decorated, logical)?;

    location.add_property("decorated", &defect.decorated)?;
    location.add_property("funcline", &defect.func_line)?;

    let mut result = SarifResult::new();
    result.set_rule_id(&defect.defect_code);
    result.set_message(&defect.description);
    result.add_location(location)?;

    if !defect.probability.is_empty() {
        result.add_property("probability", &defect.probability)?;
    }
    if !defect.rank.is_empty() {
        result.add_property("rank", &defect.rank)?;
    }
    for (tag, value) in defect.category.iter().chain(&defect.additional_info) {
        result.add_property(&property_name(tag), value)?;
    }

    if !defect.path.is_empty() {
        let mut flow = CodeFlow::new();
        for sfa in &defect.path {
            flow.add_annotated_code_location(annotate(sfa)?)?;
        }
        result.add_code_flow(flow)?;
    }

    Ok(result)
}

/// Region of an SFA, or `None` for the `(0, 0)` "no region" marker.
fn sfa_region(sfa: &Sfa) -> Result<Option<Region>> {
    let mut region = Region::new();
    region.parse_start_column(&sfa.column)?;
    region.parse_start_line(&sfa.line)?;
    Ok(region.is_valid()?.then_some(region))
}

fn annotate(sfa: &Sfa) -> Result<AnnotatedCodeLocation> {
    let mut file = PhysicalLocation::new();
    file.set_uri(&defect_uri(sfa));
    if let Some(region) = sfa_region(sfa)? {
        file.set_region(region);
    }

    let mut annotation = AnnotatedCodeLocation::new();
    annotation.set_physical_location(file);
    if let Some(event) = &sfa.key_event {
        annotation.add_property("id", &event.id)?;
        annotation.add_property("kind", &event.kind)?;
        annotation.add_property("importance", &event.importance)?;
        annotation.set_message(&event.message);
    }
    Ok(annotation)
}

fn property_name(tag: &str) -> Cow<'_, str> {
    match map_property_tag(tag) {
        Some(name) => Cow::Borrowed(name),
        None => {
            tracing::warn!(tag = %tag, "no SARIF mapping for PREfast property tag, keeping it verbatim");
            Cow::Borrowed(tag)
        }
    }
}
