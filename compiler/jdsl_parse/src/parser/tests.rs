#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::parse;
use jdsl_decode::decode_all;
use jdsl_value::ErrorCategory;
use pretty_assertions::assert_eq;

fn parse_one(source: &str) -> Node {
    let mut nodes = parse(source).unwrap_or_else(|err| panic!("{source:?}: {err}"));
    assert_eq!(nodes.len(), 1, "{source:?}");
    nodes.remove(0)
}

fn number(text: &str, start: usize) -> Node {
    Node::Number(Literal {
        text: text.to_owned(),
        span: Span::new(start, start + text.len()),
    })
}

fn ident(name: &str, start: usize) -> Ident {
    Ident {
        name: name.to_owned(),
        span: Span::new(start, start + name.len()),
    }
}

#[test]
fn operator_positions() {
    let source = "reduce([1,2,3], sum)";
    let want = Node::Op(Operator {
        id: ident("reduce", 0),
        invocations: vec![Delimited {
            open: Pos(6),
            items: vec![
                Node::Array(Delimited {
                    open: Pos(7),
                    items: vec![number("1", 8), number("2", 10), number("3", 12)],
                    commas: vec![Pos(9), Pos(11)],
                    close: Pos(13),
                }),
                Node::Op(Operator {
                    id: ident("sum", 16),
                    invocations: vec![],
                }),
            ],
            commas: vec![Pos(14)],
            close: Pos(19),
        }],
    });
    let node = parse_one(source);
    assert_eq!(node, want);
    assert_eq!(node.span(), Span::new(0, 20));
}

#[test]
fn literal_nodes_keep_raw_text() {
    assert_eq!(parse_one("null"), Node::Null(Span::new(0, 4)));
    assert_eq!(
        parse_one(" false"),
        Node::Bool(Bool {
            value: false,
            span: Span::new(1, 6),
        })
    );
    assert_eq!(parse_one("-1e+75"), number("-1e+75", 0));
    assert_eq!(
        parse_one(r#""a\nb""#),
        Node::String(Literal {
            text: r#""a\nb""#.to_owned(),
            span: Span::new(0, 6),
        })
    );
}

#[test]
fn trailing_comma_positions() {
    let Node::Array(array) = parse_one("[1, 2,]") else {
        panic!("expected array");
    };
    assert_eq!(array.commas, vec![Pos(2), Pos(5)]);
    assert_eq!(array.trailing_comma(), Some(Pos(5)));

    let Node::Array(array) = parse_one("[1, 2]") else {
        panic!("expected array");
    };
    assert_eq!(array.trailing_comma(), None);

    let Node::Op(op) = parse_one("f(x,)()") else {
        panic!("expected operator");
    };
    assert_eq!(op.invocations[0].trailing_comma(), Some(Pos(3)));
    assert_eq!(op.invocations[1].trailing_comma(), None);
    assert_eq!(op.invocations[1].span(), Span::new(5, 7));
}

#[test]
fn object_members() {
    let Node::Object(object) = parse_one(r#"{"a": 1, k(): [] }"#) else {
        panic!("expected object");
    };
    assert_eq!(object.open, Pos(0));
    assert_eq!(object.close, Pos(17));
    assert_eq!(object.items.len(), 2);
    assert_eq!(object.items[0].colon, Pos(4));
    assert_eq!(object.items[1].key.kind_name(), "operator");
    assert_eq!(object.items[1].span(), Span::new(9, 16));
}

#[test]
fn empty_containers() {
    let Node::Array(array) = parse_one("[]") else {
        panic!("expected array");
    };
    assert!(array.items.is_empty());
    assert_eq!(array.span(), Span::new(0, 2));

    let Node::Op(op) = parse_one("op()") else {
        panic!("expected operator");
    };
    assert_eq!(op.invocations.len(), 1);
    assert!(op.invocations[0].items.is_empty());
}

#[test]
fn statements() {
    let nodes = parse("bind(x, 1)\nx").unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].span(), Span::new(11, 12));
    assert_eq!(parse("").unwrap(), vec![]);
}

#[test]
fn syntax_errors_match_the_decoder() {
    for source in ["[1 2]", r#"{"a" 1}"#, "]", "{", "[1,", "f(", r#"{"k": [f(1 2)]}"#, "[,]"] {
        let parsed = parse(source).unwrap_err();
        let decoded = decode_all(source).unwrap_err();
        assert_eq!(parsed.to_string(), decoded.to_string(), "{source:?}");
        assert_eq!(parsed.category(), decoded.category(), "{source:?}");
    }
}

#[test]
fn string_escapes_are_checked_when_lowering() {
    let node = parse_one(r#"["ab\q"]"#);
    let err = node.lower().unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lex);
    assert_eq!(err.pos, Pos(4));
    assert_eq!(err.context, vec!["at string", "in array"]);
}

#[test]
fn nesting_limit() {
    let config = DecodeConfig {
        max_depth: 2,
        ..DecodeConfig::default()
    };
    let mut parser = Parser::with_config(&b"[[[]]]"[..], config);
    let err = parser.parse_next().unwrap_err();
    assert!(matches!(err.kind, DecodeErrorKind::NestingLimit(2)));
    assert!(parser.parse_next().unwrap().is_none());
}
