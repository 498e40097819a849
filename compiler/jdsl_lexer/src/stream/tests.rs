#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{tokenize, Pos, ScanErrorKind, TokenKind};
use pretty_assertions::assert_eq;

fn stream(source: &str) -> TokenStream<std::vec::IntoIter<Result<Token, LexError>>> {
    let tokens: Vec<Result<Token, LexError>> =
        tokenize(source).unwrap().into_iter().map(Ok).collect();
    TokenStream::new(tokens.into_iter())
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn peek_does_not_consume() {
    let mut s = stream("a ( 1 )");
    assert_eq!(
        kinds(s.peek(2).unwrap()),
        vec![TokenKind::Ident, TokenKind::LeftParen]
    );
    assert_eq!(s.read_one().unwrap().text, "a");
    assert_eq!(s.read_one().unwrap().kind, TokenKind::LeftParen);
}

#[test]
fn peek_short_reads_at_end() {
    let mut s = stream("[ ]");
    assert_eq!(s.peek(5).unwrap().len(), 2);
    assert_eq!(s.peek(0).unwrap().len(), 0);
}

#[test]
fn discard_reports_count() {
    let mut s = stream("1 2 3");
    assert_eq!(s.discard(2).unwrap(), 2);
    assert_eq!(s.read_one().unwrap().text, "3");
    assert_eq!(s.discard(4).unwrap(), 0);
    assert!(s.is_at_end().unwrap());
}

#[test]
fn read_one_at_end_is_eof() {
    let mut s = stream("");
    assert!(matches!(s.read_one(), Err(StreamError::UnexpectedEof)));
    assert!(s.peek_one().unwrap().is_none());
}

#[test]
fn lex_error_surfaces_once() {
    let items = vec![
        Ok(Token {
            kind: TokenKind::Number,
            pos: Pos(0),
            text: "1".to_string(),
        }),
        Err(LexError::scan(Pos(2), ScanErrorKind::UnexpectedCharacter('='))),
    ];
    let mut s = TokenStream::new(items.into_iter());
    assert!(matches!(s.peek(2), Err(LexError::Scan { pos: Pos(2), .. })));
    // the token read before the error is still buffered
    assert_eq!(s.read_one().unwrap().text, "1");
    assert!(s.is_at_end().unwrap());
}
