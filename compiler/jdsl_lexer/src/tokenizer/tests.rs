#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::TokenKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io;

/// Reader that hands out at most `step` bytes per call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(out.len()).min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Reader that fails after the given prefix.
struct Failing<'a> {
    data: &'a [u8],
}

impl Read for Failing<'_> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        }
        let n = out.len().min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, &str, usize)> {
    tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str(), t.pos.0))
        .collect()
}

#[test]
fn tokenize_source() {
    let tokens = tokenize(r#"{"a": [1, -2.5e3]} f(x)"#).unwrap();
    assert_eq!(
        kinds_and_text(&tokens),
        vec![
            (TokenKind::LeftBrace, "{", 0),
            (TokenKind::String, "\"a\"", 1),
            (TokenKind::Colon, ":", 4),
            (TokenKind::LeftBracket, "[", 6),
            (TokenKind::Number, "1", 7),
            (TokenKind::Comma, ",", 8),
            (TokenKind::Number, "-2.5e3", 10),
            (TokenKind::RightBracket, "]", 16),
            (TokenKind::RightBrace, "}", 17),
            (TokenKind::Ident, "f", 19),
            (TokenKind::LeftParen, "(", 20),
            (TokenKind::Ident, "x", 21),
            (TokenKind::RightParen, ")", 22),
        ]
    );
}

#[test]
fn empty_input_has_no_tokens() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize(" \n\t ").unwrap().is_empty());
}

#[test]
fn token_end_position() {
    let tokens = tokenize("  abc").unwrap();
    assert_eq!(tokens[0].end(), Pos(5));
}

#[test]
fn long_token_spans_many_chunks() {
    let long = format!("\"{}\" 12345678901234567890", "x".repeat(100));
    let reader = Trickle {
        data: long.as_bytes(),
        step: 3,
    };
    let config = TokenizerConfig { chunk_size: 2 };
    let tokens: Vec<Token> = Tokenizer::with_config(reader, config)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text.len(), 102);
    assert_eq!(tokens[1].text, "12345678901234567890");
    assert_eq!(tokens[1].pos, Pos(103));
}

#[test]
fn error_position_is_absolute() {
    let reader = Trickle {
        data: b"[1, 2, =]",
        step: 1,
    };
    let mut tokenizer = Tokenizer::with_config(reader, TokenizerConfig { chunk_size: 1 });
    let err = loop {
        match tokenizer.next_token() {
            Ok(Some(_)) => {}
            Ok(None) => panic!("expected error"),
            Err(err) => break err,
        }
    };
    assert_eq!(err.pos(), Pos(7));
    assert!(matches!(
        err,
        LexError::Scan {
            kind: ScanErrorKind::UnexpectedCharacter('='),
            ..
        }
    ));
    // fused after the error
    assert!(tokenizer.next_token().unwrap().is_none());
}

#[test]
fn unterminated_string_is_truncation() {
    let err = tokenize("[\"abc").unwrap_err();
    assert!(err.is_truncation());
    assert_eq!(err.pos(), Pos(1));
}

#[test]
fn invalid_utf8_inside_string() {
    let mut tokenizer = Tokenizer::new(&b"\"a\xffb\""[..]);
    let err = tokenizer.next_token().unwrap_err();
    assert!(matches!(
        err,
        LexError::Scan {
            pos: Pos(2),
            kind: ScanErrorKind::InvalidUtf8(0xFF)
        }
    ));
}

#[test]
fn reader_failure_is_io_error() {
    let mut tokenizer = Tokenizer::new(Failing { data: b"[1, 2" });
    let mut seen = Vec::new();
    let err = loop {
        match tokenizer.next_token() {
            Ok(Some(tok)) => seen.push(tok.kind),
            Ok(None) => panic!("expected error"),
            Err(err) => break err,
        }
    };
    assert_eq!(
        seen,
        vec![TokenKind::LeftBracket, TokenKind::Number, TokenKind::Comma]
    );
    assert!(matches!(err, LexError::Io { .. }));
}

proptest! {
    /// Feeding input one small chunk at a time yields exactly the tokens
    /// produced from the whole input.
    #[test]
    fn chunking_does_not_change_tokens(
        source in "[ \\[\\](){},:a-z0-9.\"-]{0,40}",
        step in 1usize..7,
        chunk in 1usize..9,
    ) {
        let whole: Vec<_> = Tokenizer::new(source.as_bytes())
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();
        let reader = Trickle { data: source.as_bytes(), step };
        let chunked: Vec<_> = Tokenizer::with_config(reader, TokenizerConfig { chunk_size: chunk })
            .map(|r| r.map_err(|e| e.to_string()))
            .collect();
        prop_assert_eq!(whole, chunked);
    }
}
