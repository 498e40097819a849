//! Non-evaluating parser for jdsl source.
//!
//! Where the decoder produces [`Value`](jdsl_value::Value)s ready for
//! evaluation, this crate keeps the source shape: every node carries its
//! byte span, every bracket, colon, and comma its position, and literals
//! their raw text. Formatters, highlighters, and linters build on this.
//!
//! The grammar and the syntax errors are the decoder's; a tree that
//! parses lowers ([`Node::lower`]) to exactly what the decoder produces,
//! except that malformed string escapes and numbers are only reported by
//! lowering.

mod ast;
mod parser;
mod span;
pub mod visitor;

pub use ast::{Arguments, Array, Bool, Delimited, Ident, Literal, Member, Node, Object, Operator};
pub use jdsl_decode::{DecodeConfig, DecodeError, DecodeErrorKind, Pos};
pub use parser::Parser;
pub use span::Span;

/// Parse every statement in `source`.
pub fn parse(source: &str) -> Result<Vec<Node>, DecodeError> {
    Parser::from_source(source).collect()
}
