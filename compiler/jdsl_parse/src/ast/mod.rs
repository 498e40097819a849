//! Parse tree nodes.

use jdsl_decode::{DecodeError, DecodeErrorKind};
use jdsl_lexer::Pos;
use jdsl_lexer_core::literal;
use jdsl_stack::ensure_sufficient_stack;
use jdsl_value::{ObjectValue, Value};

use crate::span::Span;

/// A value as written in the source.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Null(Span),
    Bool(Bool),
    /// Number literal, unparsed.
    Number(Literal),
    /// String literal with its quotes and escapes.
    String(Literal),
    Array(Array),
    Object(Object),
    Op(Operator),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bool {
    pub value: bool,
    pub span: Span,
}

/// Raw token text of a number or string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub text: String,
    pub span: Span,
}

/// A bracketed, comma-separated list.
#[derive(Clone, Debug, PartialEq)]
pub struct Delimited<T> {
    pub open: Pos,
    pub items: Vec<T>,
    /// Every separating comma, including a trailing one.
    pub commas: Vec<Pos>,
    pub close: Pos,
}

impl<T> Delimited<T> {
    pub fn span(&self) -> Span {
        Span::new(self.open.0, self.close.0 + 1)
    }

    /// Position of the comma after the last item, if there is one.
    pub fn trailing_comma(&self) -> Option<Pos> {
        if !self.items.is_empty() && self.commas.len() == self.items.len() {
            self.commas.last().copied()
        } else {
            None
        }
    }
}

pub type Array = Delimited<Node>;
pub type Object = Delimited<Member>;
/// One parenthesized invocation of an operator.
pub type Arguments = Delimited<Node>;

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub key: Node,
    pub colon: Pos,
    pub value: Node,
}

impl Member {
    pub fn span(&self) -> Span {
        self.key.span().merge(self.value.span())
    }

    fn lower(&self) -> Result<(Value, Value), DecodeError> {
        let key = self.key.lower().map_err(|e| e.context("at member key"))?;
        let value = self
            .value
            .lower()
            .map_err(|e| e.context("at member value"))?;
        Ok((key, value))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

/// An identifier with its invocations, `f` or `f(a)(b)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Operator {
    pub id: Ident,
    pub invocations: Vec<Arguments>,
}

impl Operator {
    pub fn span(&self) -> Span {
        match self.invocations.last() {
            Some(last) => self.id.span.merge(last.span()),
            None => self.id.span,
        }
    }
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Null(span) => *span,
            Node::Bool(b) => b.span,
            Node::Number(lit) | Node::String(lit) => lit.span,
            Node::Array(array) => array.span(),
            Node::Object(object) => object.span(),
            Node::Op(op) => op.span(),
        }
    }

    /// Short description of the node kind, for tooling output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null(_) => "null",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
            Node::Op(_) => "operator",
        }
    }

    /// Convert to the value the decoder would produce for the same text.
    ///
    /// Fails on malformed number or string literals, which the parser
    /// keeps raw.
    pub fn lower(&self) -> Result<Value, DecodeError> {
        match self {
            Node::Null(_) => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(b.value)),
            Node::Number(lit) => literal::parse_number(&lit.text)
                .map(Value::Number)
                .map_err(|err| DecodeError::new(DecodeErrorKind::Lex(err.kind), lit.span.start_pos())),
            Node::String(lit) => literal::unescape(&lit.text).map(Value::string).map_err(|err| {
                DecodeError::new(
                    DecodeErrorKind::Lex(err.kind),
                    lit.span.start_pos().offset_by(err.offset),
                )
                .context("at string")
            }),
            Node::Array(array) => ensure_sufficient_stack(|| {
                let items = lower_all(&array.items).map_err(|e| e.context("in array"))?;
                Ok(Value::array(items))
            }),
            Node::Object(object) => ensure_sufficient_stack(|| {
                let mut out = ObjectValue::with_capacity(object.items.len());
                for member in &object.items {
                    let (key, value) = member.lower().map_err(|e| e.context("in object"))?;
                    out.insert(key, value);
                }
                Ok(Value::object(out))
            }),
            Node::Op(op) => ensure_sufficient_stack(|| {
                let invocations = op
                    .invocations
                    .iter()
                    .map(|args| lower_all(&args.items))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| e.context("at operator arguments"))?;
                Ok(Value::op(op.id.name.as_str(), invocations))
            }),
        }
    }
}

fn lower_all(nodes: &[Node]) -> Result<Vec<Value>, DecodeError> {
    nodes.iter().map(Node::lower).collect()
}

#[cfg(test)]
mod tests;
