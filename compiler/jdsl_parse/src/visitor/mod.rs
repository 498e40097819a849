//! Parse tree traversal.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! visits the children. Override a method to act on a node and call the
//! walk function to keep descending.
//!
//! ```text
//! struct Idents(Vec<String>);
//!
//! impl<'ast> Visitor<'ast> for Idents {
//!     fn visit_ident(&mut self, ident: &'ast Ident) {
//!         self.0.push(ident.name.clone());
//!     }
//! }
//! ```

use crate::ast::{Arguments, Ident, Member, Node, Operator};

pub trait Visitor<'ast> {
    fn visit_node(&mut self, node: &'ast Node) {
        walk_node(self, node);
    }

    fn visit_member(&mut self, member: &'ast Member) {
        walk_member(self, member);
    }

    fn visit_operator(&mut self, op: &'ast Operator) {
        walk_operator(self, op);
    }

    fn visit_arguments(&mut self, args: &'ast Arguments) {
        walk_arguments(self, args);
    }

    fn visit_ident(&mut self, ident: &'ast Ident) {
        let _ = ident;
    }
}

pub fn walk_node<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, node: &'ast Node) {
    match node {
        Node::Null(_) | Node::Bool(_) | Node::Number(_) | Node::String(_) => {}
        Node::Array(array) => {
            for item in &array.items {
                visitor.visit_node(item);
            }
        }
        Node::Object(object) => {
            for member in &object.items {
                visitor.visit_member(member);
            }
        }
        Node::Op(op) => visitor.visit_operator(op),
    }
}

pub fn walk_member<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, member: &'ast Member) {
    visitor.visit_node(&member.key);
    visitor.visit_node(&member.value);
}

pub fn walk_operator<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, op: &'ast Operator) {
    visitor.visit_ident(&op.id);
    for args in &op.invocations {
        visitor.visit_arguments(args);
    }
}

pub fn walk_arguments<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, args: &'ast Arguments) {
    for arg in &args.items {
        visitor.visit_node(arg);
    }
}

#[cfg(test)]
mod tests;
