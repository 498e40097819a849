#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::parse;
use jdsl_decode::decode_all;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn lower_all_statements(source: &str) -> Vec<Value> {
    parse(source)
        .unwrap()
        .iter()
        .map(|node| node.lower().unwrap())
        .collect()
}

#[test]
fn lowering_matches_decoding() {
    let source = r#"
        [null, false, true, 0, 1.0, -1e+75, "\"abc\"", [], {}, id, add(1,2), lambda(x,x)(),]
        {"k": 1, "k": 2, getkey(): "value"}
        bind(x, "é\n")
    "#;
    assert_eq!(lower_all_statements(source), decode_all(source).unwrap());
}

#[test]
fn delimited_span_and_trailing_comma() {
    let list: Delimited<Node> = Delimited {
        open: Pos(3),
        items: vec![Node::Null(Span::new(4, 8))],
        commas: vec![Pos(8)],
        close: Pos(9),
    };
    assert_eq!(list.span(), Span::new(3, 10));
    assert_eq!(list.trailing_comma(), Some(Pos(8)));

    let empty: Delimited<Node> = Delimited {
        open: Pos(0),
        items: vec![],
        commas: vec![],
        close: Pos(1),
    };
    assert_eq!(empty.trailing_comma(), None);
}

#[test]
fn kind_names() {
    let kinds: Vec<&str> = parse(r#"null true 1 "s" [] {} f"#)
        .unwrap()
        .iter()
        .map(Node::kind_name)
        .collect();
    assert_eq!(
        kinds,
        vec!["null", "bool", "number", "string", "array", "object", "operator"]
    );
}

#[test]
fn span_slices_source() {
    let source = r#"  {"a": f(1)(2)}  "#;
    let node = &parse(source).unwrap()[0];
    assert_eq!(node.span().slice(source), Some(r#"{"a": f(1)(2)}"#));
    let Node::Object(object) = node else {
        panic!("expected object");
    };
    assert_eq!(
        object.items[0].value.span().slice(source),
        Some("f(1)(2)")
    );
}

proptest! {
    /// Whatever the decoder accepts, parsing then lowering agrees with it.
    #[test]
    fn parse_then_lower_agrees_with_decode(source in r#"[\[\]{}(),: a-c0-9"]{0,24}"#) {
        if let Ok(decoded) = decode_all(&source) {
            let lowered: Vec<Value> = parse(&source)
                .unwrap()
                .iter()
                .map(|node| node.lower().unwrap())
                .collect();
            prop_assert_eq!(lowered, decoded);
        }
    }
}
