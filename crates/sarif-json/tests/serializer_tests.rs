use sarif_json::{serialize, Array, Object, Value};

/// Serialized output must always be valid JSON carrying the same data.
fn assert_serde_agrees(value: &Value) {
    let text = serialize(value);
    let parsed: serde_json::Value = serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("serialize produced invalid JSON ({e}):\n{text}"));
    assert_eq!(parsed, serde_json::Value::from(value), "text:\n{text}");
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn flat_object_puts_each_member_on_its_own_line() {
    let mut obj = Object::new();
    obj.insert("a", 1);
    obj.insert("b", "x");
    assert_eq!(serialize(&obj.into()), "{\n\"a\":1,\n\"b\":\"x\"\n}");
}

#[test]
fn empty_containers() {
    assert_eq!(serialize(&Object::new().into()), "{\n}");
    assert_eq!(serialize(&Array::new().into()), "[\n\n]");
}

#[test]
fn array_elements_share_one_line() {
    let value = Value::from(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    assert_eq!(serialize(&value), "[\n1,2,3\n]");
}

#[test]
fn nested_object_is_indented_by_depth() {
    let mut inner = Object::new();
    inner.insert("x", 1);
    inner.insert("y", 2);
    let mut outer = Object::new();
    outer.insert("inner", inner);
    outer.insert("after", true);

    assert_eq!(
        serialize(&outer.into()),
        "{\n\"inner\":{\n  \"x\":1,\n  \"y\":2\n},\n\"after\":true\n}"
    );
}

#[test]
fn deeper_nesting_adds_two_spaces_per_level() {
    let mut c = Object::new();
    c.insert("c", 3);
    let mut b = Object::new();
    b.insert("b", c);
    let mut a = Object::new();
    a.insert("a", b);

    assert_eq!(
        serialize(&a.into()),
        "{\n\"a\":{\n  \"b\":{\n    \"c\":3\n  }\n}\n}"
    );
}

#[test]
fn objects_inside_arrays() {
    let mut first = Object::new();
    first.insert("id", 1);
    let mut second = Object::new();
    second.insert("id", 2);
    let mut root = Object::new();
    root.insert("runs", vec![Value::from(first), Value::from(second)]);

    assert_eq!(
        serialize(&root.into()),
        "{\n\"runs\":[\n  {\n    \"id\":1\n  },{\n    \"id\":2\n  }\n]\n}"
    );
}

#[test]
fn key_order_is_insertion_order() {
    let obj: Object = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
    let text = serialize(&obj.into());
    let z = text.find("\"z\"").unwrap();
    let a = text.find("\"a\"").unwrap();
    let m = text.find("\"m\"").unwrap();
    assert!(z < a && a < m, "{text}");
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn scalars_at_root() {
    assert_eq!(serialize(&Value::Null), "null");
    assert_eq!(serialize(&Value::from(true)), "true");
    assert_eq!(serialize(&Value::from(false)), "false");
    assert_eq!(serialize(&Value::from(-42)), "-42");
}

#[test]
fn floating_kinds_print_six_fraction_digits() {
    assert_eq!(serialize(&Value::from(1.5f64)), "1.500000");
    assert_eq!(serialize(&Value::from(0.25f32)), "0.250000");
    assert_eq!(serialize(&Value::from(-3.0f64)), "-3.000000");
    assert_eq!(serialize(&Value::from(1e-9f64)), "0.000000");
}

#[test]
fn non_finite_numbers_print_as_null() {
    assert_eq!(serialize(&Value::from(f64::NAN)), "null");
    assert_eq!(serialize(&Value::from(f64::INFINITY)), "null");
    assert_eq!(serialize(&Value::from(f32::NEG_INFINITY)), "null");
}

#[test]
fn strings_are_escaped() {
    assert_eq!(
        serialize(&Value::from("tab\there \"quoted\" a/b c:\\d")),
        r#""tab\there \"quoted\" a\/b c:\\d""#
    );
}

#[test]
fn keys_are_escaped() {
    let mut obj = Object::new();
    obj.insert("$schema/uri", 1);
    assert_eq!(serialize(&obj.into()), "{\n\"$schema\\/uri\":1\n}");
}

#[test]
fn prefast_newline_marker_collapses() {
    let value = Value::from("first\nPREFAST_NEWLINE\nsecond");
    assert_eq!(serialize(&value), r#""first\nsecond""#);
}

// ============================================================================
// serde_json agreement
// ============================================================================

#[test]
fn output_parses_with_serde_json() {
    let mut props = Object::new();
    props.insert("rank", "4");
    props.insert("empty", Object::new());

    let mut root = Object::new();
    root.insert("version", "1.0.0-beta.5");
    root.insert("count", 3);
    root.insert("ratio", 0.5f64);
    root.insert("ok", true);
    root.insert("nothing", Value::Null);
    root.insert("list", vec![Value::from("a"), Value::Int(1), Value::Null]);
    root.insert("nested", vec![Value::from(Array::new()), Value::from(props.clone())]);
    root.insert("properties", props);

    assert_serde_agrees(&root.into());
}

#[test]
fn output_with_awkward_strings_parses_with_serde_json() {
    let mut root = Object::new();
    root.insert("path", "c:\\src\\main.cpp");
    root.insert("uri", "file:///c:/src/main.cpp");
    root.insert("message", "line one\nline two\r\n\t\"end\"");
    root.insert("brackets", "[{]}");
    assert_serde_agrees(&root.into());
}
