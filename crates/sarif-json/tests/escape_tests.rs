use sarif_json::escape::PREFAST_NEWLINE;
use sarif_json::{add_escape_characters, decode_string, find_quote, unescape};

// ============================================================================
// Escaping
// ============================================================================

#[test]
fn control_characters_use_short_escapes() {
    assert_eq!(
        add_escape_characters("\x07\x08\x0C\n\r\t\x0B"),
        r"\a\b\f\n\r\t\v"
    );
}

#[test]
fn quote_backslash_and_solidus_are_escaped() {
    assert_eq!(add_escape_characters(r#"a"b\c/d"#), r#"a\"b\\c\/d"#);
}

#[test]
fn plain_text_is_untouched() {
    assert_eq!(add_escape_characters("Using uninitialized memory 'x'."), "Using uninitialized memory 'x'.");
    assert_eq!(add_escape_characters("caf\u{e9} \u{4f60}"), "caf\u{e9} \u{4f60}");
    assert_eq!(add_escape_characters(""), "");
}

#[test]
fn prefast_newline_marker_is_dropped_after_line_feed() {
    let text = format!("one\n{PREFAST_NEWLINE}two\n{PREFAST_NEWLINE}");
    assert_eq!(add_escape_characters(&text), r"one\ntwo\n");
}

#[test]
fn marker_without_preceding_line_feed_is_kept() {
    assert_eq!(
        add_escape_characters("PREFAST_NEWLINE\nx"),
        r"PREFAST_NEWLINE\nx"
    );
}

// ============================================================================
// Unescaping
// ============================================================================

#[test]
fn escape_then_unescape_restores_text() {
    let original = "tab\there\nnew \"quoted\" back\\slash a/b\r\x08\x0C";
    assert_eq!(unescape(&add_escape_characters(original)), original);
}

#[test]
fn escape_then_unescape_drops_only_the_marker() {
    let original = format!("first\n{PREFAST_NEWLINE}second");
    assert_eq!(unescape(&add_escape_characters(&original)), "first\nsecond");
}

#[test]
fn unknown_escapes_are_dropped() {
    assert_eq!(unescape(r"a\qb"), "ab");
    // \a and \v are emitted by the escaper but not decoded
    assert_eq!(unescape(r"x\ay\vz"), "xyz");
}

#[test]
fn trailing_backslash_is_kept() {
    assert_eq!(unescape("abc\\"), "abc\\");
}

#[test]
fn unescape_does_not_trim() {
    assert_eq!(unescape(r"  a\t "), "  a\t ");
}

#[test]
fn short_unicode_escape_at_end_of_text() {
    let text = format!("x{}u00", '\\');
    assert_eq!(unescape(&text), "x\0");
}

#[test]
fn decode_string_trims_after_unescaping() {
    assert_eq!(decode_string(r"\t value \n"), "value");
    assert_eq!(decode_string("   "), "");
    assert_eq!(decode_string(r"inner\tkept"), "inner\tkept");
}

// ============================================================================
// Quote Search
// ============================================================================

#[test]
fn find_quote_skips_escaped_quotes() {
    assert_eq!(find_quote(r#"ab\"c"d"#, 0), Some(5));
    assert_eq!(find_quote(r#""x""#, 1), Some(2));
}

#[test]
fn find_quote_handles_escaped_backslash_before_quote() {
    // `\\` is a complete escape, so the following quote terminates
    assert_eq!(find_quote(r#"a\\"b"#, 0), Some(3));
}

#[test]
fn find_quote_without_match() {
    assert_eq!(find_quote("no quotes", 0), None);
    assert_eq!(find_quote(r#"only \" escaped"#, 0), None);
    assert_eq!(find_quote(r#""x"#, 1), None);
}
