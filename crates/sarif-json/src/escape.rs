//! String escaping for the serializer and unescaping for the parser.
//!
//! Two behaviors match the PREfast converter rather than RFC 8259:
//!
//! - `\u` escapes read only the last two of their four hex digits, so
//!   `\u0041` decodes to `A` but code points above `0xFF` cannot be expressed.
//! - Decoded string values are trimmed of surrounding whitespace, even when
//!   that whitespace was escaped content ([`decode_string`]).

/// Legacy line marker PREfast embeds in descriptions. A line feed followed by
/// this marker is emitted as a single `\n`.
pub const PREFAST_NEWLINE: &str = "PREFAST_NEWLINE\n";

/// Whitespace as classified by C `isspace`: space, `\t`, `\n`, `\v`, `\f`, `\r`.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

pub(crate) fn trim_start(s: &str) -> &str {
    s.trim_start_matches(is_space)
}

/// Escape control characters, backslash, double quote and solidus.
///
/// ```
/// use sarif_json::add_escape_characters;
/// assert_eq!(add_escape_characters("a\t\"b\"/c"), r#"a\t\"b\"\/c"#);
/// assert_eq!(add_escape_characters("one\nPREFAST_NEWLINE\ntwo"), r"one\ntwo");
/// ```
pub fn add_escape_characters(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    write_escaped(text, &mut out);
    out
}

pub(crate) fn write_escaped(text: &str, out: &mut String) {
    let mut rest = text;
    while let Some(ch) = rest.chars().next() {
        rest = &rest[ch.len_utf8()..];
        if ch == '\n' {
            if let Some(after) = rest.strip_prefix(PREFAST_NEWLINE) {
                rest = after;
            }
        }
        match ch {
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0B' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '/' => out.push_str("\\/"),
            _ => out.push(ch),
        }
    }
}

/// Decode escape sequences without trimming. Unknown escapes are dropped and a
/// trailing lone backslash is kept as-is.
pub fn unescape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '\\' || i + 1 >= chars.len() {
            out.push(c);
            i += 1;
            continue;
        }
        let mut skip = 2;
        match chars[i + 1] {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0C'),
            'u' => {
                skip = 6;
                out.push(two_digit_escape(&chars, i));
            }
            _ => {}
        }
        i += skip;
    }
    out
}

/// Value of a `\uXXXX` escape starting at `start`, read from the last two
/// hex digits only. Non-hex input stops the scan early, like `strtoul`.
fn two_digit_escape(chars: &[char], start: usize) -> char {
    let from = (start + 4).min(chars.len());
    let to = (start + 6).min(chars.len());
    let byte = chars[from..to]
        .iter()
        .map_while(|c| c.to_digit(16))
        .fold(0u32, |acc, d| acc * 16 + d);
    char::from_u32(byte).unwrap_or('\0')
}

/// Decode a string literal body: [`unescape`] followed by the unconditional
/// whitespace trim applied to every string value.
///
/// ```
/// use sarif_json::decode_string;
/// assert_eq!(decode_string(r"  line1\nline2\t"), "line1\nline2");
/// ```
pub fn decode_string(text: &str) -> String {
    let decoded = unescape(text);
    trim(&decoded).to_string()
}

/// Byte index of the first `"` at or after `from` that is not escaped by an
/// unconsumed backslash.
pub fn find_quote(text: &str, from: usize) -> Option<usize> {
    let mut escaped = false;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(from) {
        if b == b'\\' && !escaped {
            escaped = true;
            continue;
        }
        if b == b'"' && !escaped {
            return Some(i);
        }
        escaped = false;
    }
    None
}
