//! Recursive-descent parser producing [`Node`] trees.

use std::io::Read;

use jdsl_decode::{DecodeConfig, DecodeError, DecodeErrorKind};
use jdsl_lexer::{Pos, StreamError, Token, TokenKind, TokenStream, Tokenizer};
use jdsl_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::ast::{Bool, Delimited, Ident, Literal, Member, Node, Operator};
use crate::span::Span;

/// Context notes for one kind of delimited list.
struct ListContext {
    body: &'static str,
    close: &'static str,
}

const ARRAY: ListContext = ListContext {
    body: "in array",
    close: "at end of array",
};
const OBJECT: ListContext = ListContext {
    body: "in object",
    close: "at end of object",
};
const ARGUMENTS: ListContext = ListContext {
    body: "at operator arguments",
    close: "at end of operator",
};

/// Streaming parser producing one top-level node per call.
pub struct Parser<R> {
    tokens: TokenStream<Tokenizer<R>>,
    max_depth: usize,
    depth: usize,
    last_end: Pos,
    failed: bool,
}

impl<'a> Parser<&'a [u8]> {
    pub fn from_source(source: &'a str) -> Self {
        Parser::new(source.as_bytes())
    }
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecodeConfig::default())
    }

    pub fn with_config(reader: R, config: DecodeConfig) -> Self {
        Parser {
            tokens: TokenStream::new(Tokenizer::with_config(reader, config.tokenizer)),
            max_depth: config.max_depth,
            depth: 0,
            last_end: Pos(0),
            failed: false,
        }
    }

    /// Parse the next top-level node, `None` at a clean end of input.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_next(&mut self) -> Result<Option<Node>, DecodeError> {
        if self.failed || self.tokens.is_at_end()? {
            return Ok(None);
        }
        let result = self.parse_value();
        if result.is_err() {
            self.failed = true;
        }
        result.map(Some)
    }

    fn peek_required(&mut self) -> Result<(TokenKind, Pos), DecodeError> {
        match self.tokens.peek(1)? {
            [token, ..] => Ok((token.kind, token.pos)),
            [] => Err(DecodeError::truncated(self.last_end)),
        }
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

    /// Consume a punctuation token already seen by `peek_required`.
    fn skip(&mut self, pos: Pos) -> Result<(), DecodeError> {
        self.tokens.discard(1)?;
        self.last_end = pos.offset_by(1);
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, DecodeError> {
        let token = self.bump()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(DecodeError::unexpected(kind, token.kind, token.pos))
        }
    }

    fn parse_value(&mut self) -> Result<Node, DecodeError> {
        let (kind, pos) = self.peek_required()?;
        match kind {
            TokenKind::LeftBracket => self.nested(pos, |p| {
                p.parse_list(
                    TokenKind::LeftBracket,
                    TokenKind::RightBracket,
                    &ARRAY,
                    Self::parse_value,
                )
                .map(Node::Array)
            }),
            TokenKind::LeftBrace => self.nested(pos, |p| {
                p.parse_list(
                    TokenKind::LeftBrace,
                    TokenKind::RightBrace,
                    &OBJECT,
                    Self::parse_member,
                )
                .map(Node::Object)
            }),
            TokenKind::Ident => self.nested(pos, Self::parse_operator),
            TokenKind::Null | TokenKind::False | TokenKind::True => {
                let token = self.bump()?;
                let span = Span::between(token.pos, token.end());
                Ok(match token.kind {
                    TokenKind::Null => Node::Null(span),
                    kind => Node::Bool(Bool {
                        value: kind == TokenKind::True,
                        span,
                    }),
                })
            }
            TokenKind::Number | TokenKind::String => {
                let token = self.bump()?;
                let lit = Literal {
                    span: Span::between(token.pos, token.end()),
                    text: token.text,
                };
                Ok(if kind == TokenKind::Number {
                    Node::Number(lit)
                } else {
                    Node::String(lit)
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

    fn nested(
        &mut self,
        pos: Pos,
        production: impl FnOnce(&mut Self) -> Result<Node, DecodeError>,
    ) -> Result<Node, DecodeError> {
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

    fn parse_member(&mut self) -> Result<Member, DecodeError> {
        let key = self
            .parse_value()
            .map_err(|e| e.context("at member key"))?;
        let colon = self
            .expect(TokenKind::Colon)
            .map_err(|e| e.context("in object member"))?
            .pos;
        let value = self
            .parse_value()
            .map_err(|e| e.context("at member value"))?;
        Ok(Member { key, colon, value })
    }

    fn parse_operator(&mut self) -> Result<Node, DecodeError> {
        let token = self.expect(TokenKind::Ident)?;
        let id = Ident {
            span: Span::between(token.pos, token.end()),
            name: token.text,
        };
        let mut invocations = Vec::new();
        while let Some(TokenKind::LeftParen) = self.tokens.peek_one()?.map(|t| t.kind) {
            invocations.push(self.parse_list(
                TokenKind::LeftParen,
                TokenKind::RightParen,
                &ARGUMENTS,
                Self::parse_value,
            )?);
        }
        trace!(id = %id.name, invocations = invocations.len(), "parsed operator");
        Ok(Node::Op(Operator { id, invocations }))
    }

    /// Parse `open item (, item)* ,? close`, recording every position.
    fn parse_list<T>(
        &mut self,
        open: TokenKind,
        close: TokenKind,
        context: &ListContext,
        mut item: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Delimited<T>, DecodeError> {
        let open_pos = self.expect(open)?.pos;
        let mut items = Vec::new();
        let mut commas = Vec::new();
        loop {
            let (kind, pos) = self.peek_required().map_err(|e| e.context(context.body))?;
            if kind == close {
                break;
            }
            if !items.is_empty() {
                if kind != TokenKind::Comma {
                    return Err(
                        DecodeError::unexpected(TokenKind::Comma, kind, pos).context(context.body)
                    );
                }
                self.skip(pos)?;
                commas.push(pos);
                let (next, _) = self.peek_required().map_err(|e| e.context(context.body))?;
                if next == close {
                    break;
                }
            }
            items.push(item(self).map_err(|e| e.context(context.body))?);
        }
        let close_pos = self
            .expect(close)
            .map_err(|e| e.context(context.close))?
            .pos;
        Ok(Delimited {
            open: open_pos,
            items,
            commas,
            close: close_pos,
        })
    }
}

impl<R: Read> Iterator for Parser<R> {
    type Item = Result<Node, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_next().transpose()
    }
}

#[cfg(test)]
mod tests;
