//! Value tree → pretty-printed JSON text.
//!
//! The layout matches the golden SARIF files produced by the PREfast
//! converter byte for byte:
//!
//! - Every object member starts on its own line; arrays break once after `[`
//!   and keep their elements on that line, comma separated.
//! - A container opened at depth `d` indents its contents by `d - 1` steps of
//!   two spaces, so members of the root object sit in column zero.
//! - Keys follow insertion order, never hash or sorted order.
//! - Int prints like `%d`; Float and Double print fixed-point with six
//!   fractional digits like `%f`. Non-finite numbers print as `null`.
//!
//! ```
//! use sarif_json::{serialize, Array, Object, Value};
//!
//! let mut obj = Object::new();
//! obj.insert("a", 1);
//! let mut b = Array::new();
//! b.push("x");
//! b.push(true);
//! obj.insert("b", b);
//!
//! assert_eq!(serialize(&Value::from(obj)), "{\n\"a\":1,\n\"b\":[\n  \"x\",true\n]\n}");
//! ```
//!
//! Depth travels as an argument through the recursion, so concurrent and
//! nested calls never share indentation state.

use crate::escape::write_escaped;
use crate::value::Value;

/// Serialize a value tree to JSON text.
pub fn serialize(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, 0, &mut out);
    out
}

/// Emit `value`, which sits inside `depth` enclosing containers.
fn write_value(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(obj) => {
            let inner = depth + 1;
            out.push('{');
            for (i, (key, member)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_line_break(inner, out);
                out.push('"');
                write_escaped(key, out);
                out.push_str("\":");
                write_value(member, inner, out);
            }
            push_line_break(depth, out);
            out.push('}');
        }
        Value::Array(arr) => {
            let inner = depth + 1;
            out.push('[');
            push_line_break(inner, out);
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(element, inner, out);
            }
            push_line_break(depth, out);
            out.push(']');
        }
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&format_fixed(f64::from(*f))),
        Value::Double(d) => out.push_str(&format_fixed(*d)),
        Value::String(s) => {
            out.push('"');
            write_escaped(s, out);
            out.push('"');
        }
    }
}

/// Newline followed by the indentation for `depth`: two spaces per level
/// beyond the first.
fn push_line_break(depth: usize, out: &mut String) {
    out.push('\n');
    for _ in 1..depth {
        out.push_str("  ");
    }
}

/// `%f` formatting: fixed-point, six fractional digits, `.` as the separator.
fn format_fixed(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    format!("{:.6}", n)
}
