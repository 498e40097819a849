//! Inspection commands: `decode`, `parse`, and `lex`.

use std::io::{self, Write};

use jdsl_decode::Decoder;
use jdsl_lexer::Tokenizer;
use jdsl_parse::visitor::{walk_node, Visitor};
use jdsl_parse::{Node, Parser};

use super::{open_source, print_value, read_source, CommandError};
use crate::options::Options;

/// Decode a file without evaluating it, one statement per line.
pub fn decode_file(path: &str, options: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    let reader = open_source(path)?;
    for value in Decoder::with_config(reader, options.eval.decode) {
        print_value(out, &value?, options)?;
    }
    Ok(())
}

/// Parse a file and print an indented outline of its nodes with spans.
pub fn parse_file(path: &str, options: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    let source = read_source(path)?;
    let mut outline = Outline {
        out,
        source: &source,
        depth: 0,
        error: None,
    };
    for node in Parser::with_config(source.as_bytes(), options.eval.decode) {
        outline.visit_node(&node?);
        if let Some(err) = outline.error.take() {
            return Err(err.into());
        }
    }
    Ok(())
}

/// Tokenize a file and print one token per line.
pub fn lex_file(path: &str, options: &Options, out: &mut dyn Write) -> Result<(), CommandError> {
    let reader = open_source(path)?;
    let mut count = 0usize;
    for token in Tokenizer::with_config(reader, options.eval.decode.tokenizer) {
        let token = token?;
        writeln!(
            out,
            "{:>6}..{:<6} {:<12} {}",
            token.pos.0,
            token.end().0,
            token.kind.name(),
            token.text
        )?;
        count += 1;
    }
    writeln!(out, "{count} tokens")?;
    Ok(())
}

struct Outline<'a, W: Write + ?Sized> {
    out: &'a mut W,
    source: &'a str,
    depth: usize,
    /// First write failure; later writes are skipped.
    error: Option<io::Error>,
}

impl<W: Write + ?Sized> Outline<'_, W> {
    fn line(&mut self, node: &Node) {
        if self.error.is_some() {
            return;
        }
        let span = node.span();
        let detail = match node {
            Node::Op(op) => format!("{} ({} invocations)", op.id.name, op.invocations.len()),
            Node::Array(array) => format!("{} items", array.items.len()),
            Node::Object(object) => format!("{} members", object.items.len()),
            Node::Null(_) | Node::Bool(_) | Node::Number(_) | Node::String(_) => {
                span.slice(self.source).unwrap_or_default().to_owned()
            }
        };
        let written = writeln!(
            self.out,
            "{:indent$}{} {span} {detail}",
            "",
            node.kind_name(),
            indent = self.depth * 2
        );
        self.error = written.err();
    }
}

impl<'ast, W: Write + ?Sized> Visitor<'ast> for Outline<'_, W> {
    fn visit_node(&mut self, node: &'ast Node) {
        self.line(node);
        self.depth += 1;
        walk_node(self, node);
        self.depth -= 1;
    }
}
