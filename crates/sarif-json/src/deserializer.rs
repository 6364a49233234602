//! JSON text → value tree.
//!
//! A recursive-descent parser that validates bracket nesting with an explicit
//! stack of [`Nesting`] markers threaded through every call:
//!
//! - The document must be an object or an array; surrounding whitespace is
//!   ignored.
//! - A nested container is first delimited by [`find_matching_close`]-style
//!   bracket matching (quote aware), then parsed recursively on its own slice.
//! - Strings decode escapes (including the two-digit `\u` form) and are
//!   trimmed, see [`crate::decode_string`].
//! - Anything else is a literal: `true`/`false`/`null` (case-insensitive), a
//!   number with `.` or an exponent (Double), or an integer (Int, widened to
//!   Double when it overflows 32 bits).
//!
//! Two entry points expose the failure contract:
//!
//! - [`try_deserialize`] reports malformed input as [`JsonError::Parse`].
//! - [`deserialize`] keeps the converter's historical behavior and yields a
//!   Null value instead, so "the text was `null`" and "the text was broken"
//!   look the same to the caller.

use crate::array::Array;
use crate::error::{JsonError, Result};
use crate::escape::{decode_string, find_quote, is_space, trim, trim_start, unescape};
use crate::object::Object;
use crate::value::Value;

/// Deepest container nesting accepted before the parser gives up.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Kind of container currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Nesting {
    Object,
    Array,
}

impl Nesting {
    fn opened_by(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Nesting::Object),
            b'[' => Some(Nesting::Array),
            _ => None,
        }
    }

    fn closed_by(byte: u8) -> Option<Self> {
        match byte {
            b'}' => Some(Nesting::Object),
            b']' => Some(Nesting::Array),
            _ => None,
        }
    }

    fn closer(self) -> u8 {
        match self {
            Nesting::Object => b'}',
            Nesting::Array => b']',
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Nesting::Object => "object",
            Nesting::Array => "array",
        }
    }
}

/// Parse a document, reporting the first structural or lexical problem.
pub fn try_deserialize(text: &str) -> Result<Value> {
    Parser::new(text).parse_container(text)
}

/// Parse a document, yielding Null when the text is malformed.
///
/// ```
/// use sarif_json::{deserialize, ValueKind};
///
/// let doc = deserialize(r#"{"a":1,"b":[1,2,3]}"#);
/// assert_eq!(doc["a"].to_int().unwrap(), 1);
/// assert_eq!(doc["b"].to_array().unwrap().len(), 3);
///
/// assert_eq!(deserialize("[1,2,}").kind(), ValueKind::Null);
/// ```
pub fn deserialize(text: &str) -> Value {
    try_deserialize(text).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "malformed JSON document, yielding null");
        Value::Null
    })
}

/// Byte index of the bracket closing the one at `text[0]`.
///
/// `None` when `text` does not start with `[` or `{`, when a closer does not
/// match the innermost open bracket (`{]}`, `[}]`), or when the brackets never
/// balance. Brackets inside string literals are ignored.
pub fn find_matching_close(text: &str) -> Option<usize> {
    let nesting = Nesting::opened_by(*text.as_bytes().first()?)?;
    let mut parser = Parser::new(text);
    parser.stack.push(nesting);
    parser.end_of_array_or_object(text)
}

struct Parser<'a> {
    source: &'a str,
    stack: Vec<Nesting>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: Vec::new(),
        }
    }

    /// Build a parse error located at the start of `at`, which must be a
    /// slice of the source text.
    fn error(&self, at: &str, message: impl Into<String>) -> JsonError {
        let offset = (at.as_ptr() as usize).saturating_sub(self.source.as_ptr() as usize);
        JsonError::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Parse a complete `{...}` or `[...]` slice.
    fn parse_container(&mut self, text: &'a str) -> Result<Value> {
        let text = trim(text);
        let bytes = text.as_bytes();
        let nesting = match bytes.first().copied().and_then(Nesting::opened_by) {
            Some(nesting) => nesting,
            None => return Err(self.error(text, "expected '{' or '['")),
        };
        if bytes.len() < 2 || bytes[bytes.len() - 1] != nesting.closer() {
            return Err(self.error(text, format!("unterminated {}", nesting.describe())));
        }
        if self.stack.len() >= MAX_NESTING_DEPTH {
            return Err(self.error(text, "nesting too deep"));
        }

        self.stack.push(nesting);
        let body = &text[1..text.len() - 1];
        let value = match nesting {
            Nesting::Object => self.parse_object_body(body)?,
            Nesting::Array => self.parse_array_body(body)?,
        };
        match self.stack.pop() {
            Some(top) if top == nesting => Ok(value),
            _ => Err(self.error(text, "unbalanced brackets")),
        }
    }

    /// Scan forward from just after the opening bracket at `text[0]`, whose
    /// marker the caller has already pushed. Returns the index of the closer
    /// that brings the stack back to its size on entry.
    fn end_of_array_or_object(&mut self, text: &str) -> Option<usize> {
        let entry_depth = self.stack.len();
        let mut in_quote = false;
        let mut escaped = false;

        for (i, &b) in text.as_bytes().iter().enumerate().skip(1) {
            if in_quote {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_quote = false;
                }
                continue;
            }
            if b == b'"' {
                in_quote = true;
            } else if let Some(nesting) = Nesting::opened_by(b) {
                self.stack.push(nesting);
            } else if let Some(nesting) = Nesting::closed_by(b) {
                if self.stack.last() != Some(&nesting) {
                    return None;
                }
                let depth = self.stack.len();
                self.stack.pop();
                if depth == entry_depth {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Parse one value from the front of `text`, returning it with the
    /// unconsumed remainder.
    fn parse_value(&mut self, text: &'a str) -> Result<(Value, &'a str)> {
        let text = trim(text);
        let Some(&first) = text.as_bytes().first() else {
            return Ok((Value::Null, text));
        };

        if let Some(nesting) = Nesting::opened_by(first) {
            self.stack.push(nesting);
            let end = self.end_of_array_or_object(text).ok_or_else(|| {
                self.error(
                    text,
                    format!("mismatched or unbalanced {} brackets", nesting.describe()),
                )
            })?;
            let value = self.parse_container(&text[..=end])?;
            return Ok((value, &text[end + 1..]));
        }

        if first == b'"' {
            let end = find_quote(text, 1).ok_or_else(|| self.error(text, "unterminated string"))?;
            let value = Value::String(decode_string(&text[1..end]));
            return Ok((value, &text[end + 1..]));
        }

        self.parse_literal(text)
    }

    /// Accumulate a bare literal up to the next top-level `,` and classify it.
    fn parse_literal(&mut self, text: &'a str) -> Result<(Value, &'a str)> {
        let mut token = String::new();
        let mut has_dot = false;
        let mut has_e = false;
        let mut found_digit = false;
        let mut end = text.len();

        for (i, c) in text.char_indices() {
            match c {
                '.' => {
                    if !found_digit {
                        return Err(self.error(&text[i..], "a digit must precede '.'"));
                    }
                    has_dot = true;
                }
                // `e` inside "true"/"false" is not an exponent marker
                'e' | 'E' if !is_keyword_prefix(&token) => {
                    if !found_digit {
                        return Err(self.error(&text[i..], "a digit must precede the exponent"));
                    }
                    if has_e {
                        return Err(self.error(&text[i..], "repeated exponent"));
                    }
                    has_e = true;
                }
                ']' | '}' => {
                    let closes = if c == ']' {
                        Nesting::Array
                    } else {
                        Nesting::Object
                    };
                    if self.stack.last() != Some(&closes) {
                        return Err(self.error(&text[i..], format!("unexpected '{c}'")));
                    }
                    self.stack.pop();
                }
                ',' => {
                    end = i;
                    break;
                }
                '[' | '{' => {
                    return Err(self.error(&text[i..], format!("unexpected '{c}' in literal")));
                }
                _ => {}
            }
            if !is_space(c) {
                if c.is_ascii_digit() {
                    found_digit = true;
                }
                token.push(c);
            }
        }

        let value = classify_literal(&token, has_dot || has_e)
            .ok_or_else(|| self.error(text, format!("invalid literal {token:?}")))?;
        Ok((value, &text[end..]))
    }

    fn parse_object_body(&mut self, body: &'a str) -> Result<Value> {
        let mut obj = Object::new();
        let mut rest = body;

        loop {
            rest = trim_start(rest);
            if rest.is_empty() {
                break;
            }
            let open = find_quote(rest, 0).ok_or_else(|| self.error(rest, "expected a quoted key"))?;
            let close =
                find_quote(rest, open + 1).ok_or_else(|| self.error(&rest[open..], "unterminated key"))?;
            let colon = rest[close..]
                .find(':')
                .map(|p| p + close)
                .ok_or_else(|| self.error(&rest[close..], "expected ':' after key"))?;

            let key = &rest[open + 1..close];
            if key.is_empty() {
                return Err(self.error(&rest[open..], "empty key"));
            }

            let (value, remainder) = self.parse_value(&rest[colon + 1..])?;
            obj.insert(unescape(key), value);
            rest = remainder;
        }

        Ok(Value::Object(obj))
    }

    fn parse_array_body(&mut self, body: &'a str) -> Result<Value> {
        let mut arr = Array::new();
        let mut rest = body;

        loop {
            rest = trim_start(rest);
            if rest.is_empty() {
                break;
            }
            let (value, remainder) = self.parse_value(rest)?;
            arr.push(value);

            let remainder = trim_start(remainder);
            match remainder.as_bytes().first() {
                None => break,
                Some(b',') => rest = &remainder[1..],
                Some(_) => {
                    return Err(self.error(remainder, "expected ',' between array elements"));
                }
            }
        }

        Ok(Value::Array(arr))
    }
}

fn is_keyword_prefix(token: &str) -> bool {
    token.eq_ignore_ascii_case("tru") || token.eq_ignore_ascii_case("fals")
}

/// Classify an accumulated literal. `numeric_hint` is set when a `.` or an
/// exponent marker was seen; such tokens must convert to a Double in full.
fn classify_literal(token: &str, numeric_hint: bool) -> Option<Value> {
    if token.eq_ignore_ascii_case("true") {
        return Some(Value::Bool(true));
    }
    if token.eq_ignore_ascii_case("false") {
        return Some(Value::Bool(false));
    }
    if numeric_hint {
        return parse_finite(token).map(Value::Double);
    }
    if token.eq_ignore_ascii_case("null") {
        return Some(Value::Null);
    }

    // Integers are 32-bit; anything wider is kept as a Double.
    match token.parse::<i32>() {
        Ok(i) => Some(Value::Int(i)),
        Err(err)
            if matches!(
                err.kind(),
                std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow
            ) =>
        {
            parse_finite(token).map(Value::Double)
        }
        Err(_) => None,
    }
}

fn parse_finite(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|d| d.is_finite())
}
