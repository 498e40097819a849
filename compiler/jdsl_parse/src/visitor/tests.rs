#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::parse;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Collect {
    idents: Vec<String>,
    kinds: Vec<&'static str>,
    invocations: usize,
}

impl<'ast> Visitor<'ast> for Collect {
    fn visit_node(&mut self, node: &'ast Node) {
        self.kinds.push(node.kind_name());
        walk_node(self, node);
    }

    fn visit_arguments(&mut self, args: &'ast Arguments) {
        self.invocations += 1;
        walk_arguments(self, args);
    }

    fn visit_ident(&mut self, ident: &'ast Ident) {
        self.idents.push(ident.name.clone());
    }
}

#[test]
fn visits_in_source_order() {
    let nodes = parse(r#"{"k": f(x, [1, null])(g)} true"#).unwrap();
    let mut collect = Collect::default();
    for node in &nodes {
        collect.visit_node(node);
    }
    assert_eq!(collect.idents, vec!["f", "x", "g"]);
    assert_eq!(
        collect.kinds,
        vec![
            "object", "string", "operator", "operator", "array", "number", "null", "operator",
            "bool",
        ]
    );
    assert_eq!(collect.invocations, 2);
}

#[test]
fn default_visitor_walks_everything() {
    struct Nothing;
    impl Visitor<'_> for Nothing {}

    let nodes = parse("[a(b(c)), {d: e}]").unwrap();
    Nothing.visit_node(&nodes[0]);
}

#[test]
fn overriding_without_walk_prunes() {
    #[derive(Default)]
    struct TopLevel(Vec<String>);
    impl<'ast> Visitor<'ast> for TopLevel {
        fn visit_operator(&mut self, op: &'ast Operator) {
            self.0.push(op.id.name.clone());
        }
    }

    let nodes = parse("[f(g(h)), k]").unwrap();
    let mut top = TopLevel::default();
    top.visit_node(&nodes[0]);
    assert_eq!(top.0, vec!["f", "k"]);
}
