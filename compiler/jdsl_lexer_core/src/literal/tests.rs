#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn cooked(text: &str) -> String {
    unescape(text).unwrap_or_else(|err| panic!("unescape {text:?}: {err}"))
}

// === Numbers ===

#[test]
fn parse_integers_and_floats() {
    assert_eq!(parse_number("0"), Ok(0.0));
    assert_eq!(parse_number("-12"), Ok(-12.0));
    assert_eq!(parse_number("3.25"), Ok(3.25));
    assert_eq!(parse_number("2E-3"), Ok(0.002));
    assert_eq!(parse_number("1."), Ok(1.0));
    assert_eq!(parse_number("-.5"), Ok(-0.5));
}

#[test]
fn parse_nearest_double() {
    assert_eq!(parse_number("-1e+75"), Ok(-1e75));
    assert_eq!(parse_number("0.1"), Ok(0.1));
}

#[test]
fn parse_rejects_garbage() {
    assert_eq!(
        parse_number("1-2"),
        Err(ScanError::new(
            0,
            ScanErrorKind::InvalidNumber("1-2".to_string())
        ))
    );
}

// === Strings ===

#[test]
fn plain_strings_pass_through() {
    assert_eq!(cooked(r#""""#), "");
    assert_eq!(cooked(r#""abc""#), "abc");
    assert_eq!(cooked("\"héllo ✓\""), "héllo ✓");
}

#[test]
fn simple_escapes() {
    assert_eq!(
        cooked(r#""\"\\\/\'\a\b\f\n\r\t\v""#),
        "\"\\/'\u{07}\u{08}\u{0C}\n\r\t\u{0B}"
    );
}

#[test]
fn hex_and_unicode_escapes() {
    assert_eq!(cooked(r#""\x41\x7e""#), "A~");
    assert_eq!(cooked(r#""\u00e9\u2713""#), "é✓");
    assert_eq!(cooked(r#""\U0001F600""#), "😀");
}

#[test]
fn surrogate_pairs_combine() {
    assert_eq!(cooked(r#""\ud83d\ude00!""#), "😀!");
}

#[test]
fn lone_surrogate_is_invalid() {
    let err = unescape(r#""\ud83d""#).unwrap_err();
    assert_eq!(
        err.kind,
        ScanErrorKind::InvalidEscape("\\ud83d".to_string())
    );
}

#[test]
fn unknown_escape_is_invalid() {
    let err = unescape(r#""ab\q""#).unwrap_err();
    assert_eq!(err.offset, 3);
    assert_eq!(err.kind, ScanErrorKind::InvalidEscape("\\q".to_string()));
}

#[test]
fn non_ascii_hex_escape_is_invalid() {
    let err = unescape(r#""\xff""#).unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::InvalidEscape("\\xff".to_string()));
}

#[test]
fn short_hex_escape_is_invalid() {
    let err = unescape(r#""\u12""#).unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::InvalidEscape("\\u12".to_string()));
}

#[test]
fn raw_control_character_is_rejected() {
    let err = unescape("\"a\nb\"").unwrap_err();
    assert_eq!(err, ScanError::new(2, ScanErrorKind::ControlCharacter(b'\n')));
}

#[test]
fn missing_quotes() {
    assert_eq!(
        unescape("abc").unwrap_err().kind,
        ScanErrorKind::UnterminatedString
    );
}

proptest! {
    #[test]
    fn escaping_printable_text_round_trips(s in "[ -~é✓]{0,16}") {
        let quoted = format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""));
        prop_assert_eq!(unescape(&quoted).unwrap(), s);
    }
}
