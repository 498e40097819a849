//! Recursive-descent decoder over the lookahead token stream.

use std::io::Read;

use jdsl_lexer::{Pos, StreamError, Token, TokenKind, TokenStream, Tokenizer, TokenizerConfig};
use jdsl_lexer_core::literal;
use jdsl_stack::ensure_sufficient_stack;
use jdsl_value::{ObjectValue, Value};
use tracing::trace;

use crate::error::{DecodeError, DecodeErrorKind};

/// Decoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum nesting of arrays, objects, and operators.
    pub max_depth: usize,
    pub tokenizer: TokenizerConfig,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_depth: 512,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

/// Streaming decoder producing one top-level value per call.
///
/// Also an iterator over `Result<Value, DecodeError>`; iteration stops
/// after the first error.
pub struct Decoder<R> {
    tokens: TokenStream<Tokenizer<R>>,
    max_depth: usize,
    depth: usize,
    /// End of the last consumed token, reported when input runs out.
    last_end: Pos,
    failed: bool,
}

impl<'a> Decoder<&'a [u8]> {
    pub fn from_source(source: &'a str) -> Self {
        Decoder::new(source.as_bytes())
    }
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecodeConfig::default())
    }

    pub fn with_config(reader: R, config: DecodeConfig) -> Self {
        Decoder {
            tokens: TokenStream::new(Tokenizer::with_config(reader, config.tokenizer)),
            max_depth: config.max_depth,
            depth: 0,
            last_end: Pos(0),
            failed: false,
        }
    }

    /// Decode the next top-level value.
    ///
    /// `Ok(None)` means the input ended cleanly between values. Ending
    /// inside a value is [`DecodeErrorKind::Truncated`].
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn decode(&mut self) -> Result<Option<Value>, DecodeError> {
        if self.failed || self.tokens.is_at_end()? {
            return Ok(None);
        }
        let result = self.decode_value();
        if result.is_err() {
            self.failed = true;
        }
        result.map(Some)
    }

    // Token plumbing

    /// Kind and position of the next token, `None` at end of input.
    fn peek(&mut self) -> Result<Option<(TokenKind, Pos)>, DecodeError> {
        Ok(self.tokens.peek_one()?.map(|t| (t.kind, t.pos)))
    }

    /// Like `peek`, but running out of input is an error.
    fn peek_required(&mut self) -> Result<(TokenKind, Pos), DecodeError> {
        self.peek()?
            .ok_or_else(|| DecodeError::truncated(self.last_end))
    }

    fn bump(&mut self) -> Result<Token, DecodeError> {
        match self.tokens.read_one() {
            Ok(token) => {
                self.last_end = token.end();
                Ok(token)
            }
            Err(StreamError::Lex(err)) => Err(err.into()),
            Err(StreamError::UnexpectedEof) => Err(DecodeError::truncated(self.last_end)),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, DecodeError> {
        let token = self.bump()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(DecodeError::unexpected(kind, token.kind, token.pos))
        }
    }

    // Grammar

    fn decode_value(&mut self) -> Result<Value, DecodeError> {
        let (kind, pos) = self.peek_required()?;
        match kind {
            TokenKind::LeftBracket => self.nested(pos, Self::decode_array),
            TokenKind::LeftBrace => self.nested(pos, Self::decode_object),
            TokenKind::Ident => self.nested(pos, Self::decode_operator),
            TokenKind::Null => self.bump().map(|_| Value::Null),
            TokenKind::False => self.bump().map(|_| Value::Bool(false)),
            TokenKind::True => self.bump().map(|_| Value::Bool(true)),
            TokenKind::Number => {
                let token = self.bump()?;
                literal::parse_number(&token.text)
                    .map(Value::Number)
                    .map_err(|err| {
                        DecodeError::new(DecodeErrorKind::Lex(err.kind), token.pos)
                    })
            }
            TokenKind::String => {
                let token = self.bump()?;
                literal::unescape(&token.text).map(Value::string).map_err(|err| {
                    DecodeError::new(
                        DecodeErrorKind::Lex(err.kind),
                        token.pos.offset_by(err.offset),
                    )
                    .context("at string")
                })
            }
            TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::RightBrace
            | TokenKind::RightBracket => {
                Err(DecodeError::new(DecodeErrorKind::UnexpectedStart(kind), pos))
            }
        }
    }

    /// Run a recursive production one level deeper.
    fn nested(
        &mut self,
        pos: Pos,
        production: fn(&mut Self) -> Result<Value, DecodeError>,
    ) -> Result<Value, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::new(
                DecodeErrorKind::NestingLimit(self.max_depth),
                pos,
            ));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| production(self));
        self.depth -= 1;
        result
    }

    fn decode_array(&mut self) -> Result<Value, DecodeError> {
        self.expect(TokenKind::LeftBracket)?;
        let mut items = Vec::new();
        self.decode_list(TokenKind::RightBracket, |d| {
            items.push(d.decode_value()?);
            Ok(())
        })
        .map_err(|e| e.context("in array"))?;
        self.expect(TokenKind::RightBracket)
            .map_err(|e| e.context("at end of array"))?;
        Ok(Value::array(items))
    }

    fn decode_object(&mut self) -> Result<Value, DecodeError> {
        self.expect(TokenKind::LeftBrace)?;
        let mut object = ObjectValue::new();
        self.decode_list(TokenKind::RightBrace, |d| d.decode_member(&mut object))
            .map_err(|e| e.context("in object"))?;
        self.expect(TokenKind::RightBrace)
            .map_err(|e| e.context("at end of object"))?;
        Ok(Value::object(object))
    }

    fn decode_member(&mut self, object: &mut ObjectValue) -> Result<(), DecodeError> {
        let key = self
            .decode_value()
            .map_err(|e| e.context("at member key"))?;
        self.expect(TokenKind::Colon)
            .map_err(|e| e.context("in object member"))?;
        let value = self
            .decode_value()
            .map_err(|e| e.context("at member value"))?;
        object.insert(key, value);
        Ok(())
    }

    fn decode_operator(&mut self) -> Result<Value, DecodeError> {
        let id = self.expect(TokenKind::Ident)?;
        let mut invocations = Vec::new();
        while let Some((TokenKind::LeftParen, _)) = self.peek()? {
            self.bump()?;
            let mut args = Vec::new();
            self.decode_list(TokenKind::RightParen, |d| {
                args.push(d.decode_value()?);
                Ok(())
            })
            .map_err(|e| e.context("at operator arguments"))?;
            self.expect(TokenKind::RightParen)
                .map_err(|e| e.context("at end of operator"))?;
            invocations.push(args);
        }
        trace!(id = %id.text, invocations = invocations.len(), "decoded operator");
        Ok(Value::op(id.text, invocations))
    }

    /// Decode a comma-separated list up to, but not including, `close`.
    /// A single trailing comma is allowed.
    fn decode_list(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError> {
        let mut first = true;
        loop {
            let (kind, pos) = self.peek_required()?;
            if kind == close {
                return Ok(());
            }
            if !first {
                if kind != TokenKind::Comma {
                    return Err(DecodeError::unexpected(TokenKind::Comma, kind, pos));
                }
                self.bump()?;
                if self.peek_required()?.0 == close {
                    return Ok(());
                }
            }
            item(self)?;
            first = false;
        }
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode().transpose()
    }
}
