//! Shared helpers for integration tests: a canned parser and range helpers
//! that derive byte offsets from the test source text itself.

#![allow(dead_code)]

use std::collections::HashMap;

use codemap::syntax::{AstNode, NodeKind, SourceParser, SourceTree};
use codemap::{TextRange, TextSize};

/// Byte offset of the `n`-th occurrence (0-based) of `needle` in `text`.
pub fn find_nth(text: &str, needle: &str, n: usize) -> usize {
    let mut search_from = 0;
    let mut seen = 0;
    while let Some(pos) = text[search_from..].find(needle) {
        let abs = search_from + pos;
        if seen == n {
            return abs;
        }
        seen += 1;
        search_from = abs + needle.len();
    }
    panic!("occurrence {n} of {needle:?} not found in test source");
}

pub fn range_of_nth(text: &str, needle: &str, n: usize) -> TextRange {
    TextRange::at(
        TextSize::from(find_nth(text, needle, n) as u32),
        TextSize::from(needle.len() as u32),
    )
}

pub fn range_of(text: &str, needle: &str) -> TextRange {
    range_of_nth(text, needle, 0)
}

/// A leaf token over the first occurrence of `needle`.
pub fn tok(text: &str, needle: &str, kind: NodeKind) -> AstNode {
    AstNode::token(kind, range_of(text, needle), needle)
}

/// A leaf token over the `n`-th occurrence of `needle`.
pub fn tok_nth(text: &str, needle: &str, n: usize, kind: NodeKind) -> AstNode {
    AstNode::token(kind, range_of_nth(text, needle, n), needle)
}

/// An interior node spanning the whole source.
pub fn covering(text: &str, kind: NodeKind) -> AstNode {
    AstNode::new(
        kind,
        TextRange::at(TextSize::from(0), TextSize::from(text.len() as u32)),
    )
}

/// A parser that replays canned trees, keyed by source text — the same
/// contents always parse to the same tree, like a real parser.
#[derive(Default)]
pub struct FakeParser {
    trees: HashMap<String, SourceTree>,
}

impl FakeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn(&mut self, text: &str, tree: SourceTree) {
        self.trees.insert(text.to_string(), tree);
    }

    pub fn with_source(mut self, text: &str, tree: SourceTree) -> Self {
        self.learn(text, tree);
        self
    }
}

impl SourceParser for FakeParser {
    fn parse(&self, _uri: &str, text: &str) -> SourceTree {
        self.trees.get(text).cloned().unwrap_or_else(|| {
            SourceTree::new(AstNode::new(
                NodeKind::SourceFile,
                TextRange::at(TextSize::from(0), TextSize::from(text.len() as u32)),
            ))
        })
    }
}

// ---------------------------------------------------------------------
// Canned workspace used by the integration tests
// ---------------------------------------------------------------------

pub const DEFS_V1: &str = "<?php
namespace App;
class Vehicle {
    function start() {}
    function __call($args) {}
}
function helper() {}
";

/// `DEFS_V1` with `helper()` deleted.
pub const DEFS_V2: &str = "<?php
namespace App;
class Vehicle {
    function start() {}
    function __call($args) {}
}
";

pub const CARS: &str = "<?php
namespace App;
class Car extends Vehicle {
    function go() {
        $this->start();
        helper();
    }
}
";

pub const BROKEN: &str = "<?php
namespace App;
function probe() {
    missing();
}
";

fn vehicle_class(t: &str) -> AstNode {
    AstNode::new(NodeKind::ClassDecl, range_of(t, "class Vehicle"))
        .with_child(tok(t, "Vehicle", NodeKind::Name))
        .with_child(
            AstNode::new(NodeKind::MethodDecl, range_of(t, "function start"))
                .with_child(tok(t, "start", NodeKind::Name)),
        )
        .with_child(
            AstNode::new(NodeKind::MethodDecl, range_of(t, "function __call"))
                .with_child(tok(t, "__call", NodeKind::Name))
                .with_child(tok(t, "args", NodeKind::Parameter)),
        )
}

fn namespace_app(t: &str) -> AstNode {
    AstNode::new(NodeKind::NamespaceDef, range_of(t, "namespace App;"))
        .with_child(tok(t, "App", NodeKind::Name))
}

pub fn defs_v1_tree() -> SourceTree {
    let t = DEFS_V1;
    SourceTree::new(
        covering(t, NodeKind::SourceFile)
            .with_child(namespace_app(t))
            .with_child(vehicle_class(t))
            .with_child(
                AstNode::new(NodeKind::FunctionDecl, range_of(t, "function helper"))
                    .with_child(tok(t, "helper", NodeKind::Name)),
            ),
    )
}

pub fn defs_v2_tree() -> SourceTree {
    let t = DEFS_V2;
    SourceTree::new(
        covering(t, NodeKind::SourceFile)
            .with_child(namespace_app(t))
            .with_child(vehicle_class(t)),
    )
}

pub fn cars_tree() -> SourceTree {
    let t = CARS;
    SourceTree::new(
        covering(t, NodeKind::SourceFile)
            .with_child(namespace_app(t))
            .with_child(
                AstNode::new(NodeKind::ClassDecl, range_of(t, "class Car"))
                    .with_child(tok(t, "Car", NodeKind::Name))
                    .with_child(
                        AstNode::new(NodeKind::BaseClause, range_of(t, "extends Vehicle"))
                            .with_child(tok(t, "Vehicle", NodeKind::Name)),
                    )
                    .with_child(
                        AstNode::new(NodeKind::MethodDecl, range_of(t, "function go"))
                            .with_child(tok(t, "go", NodeKind::Name))
                            .with_child(
                                AstNode::new(NodeKind::MemberCall, range_of(t, "$this->start()"))
                                    .with_child(tok(t, "this", NodeKind::Variable))
                                    .with_child(tok(t, "start", NodeKind::MemberName)),
                            )
                            .with_child(
                                AstNode::new(NodeKind::Call, range_of(t, "helper()"))
                                    .with_child(tok(t, "helper", NodeKind::Name)),
                            ),
                    ),
            ),
    )
}

pub fn broken_tree() -> SourceTree {
    use codemap::syntax::ParseDiagnostic;
    let t = BROKEN;
    SourceTree::new(
        covering(t, NodeKind::SourceFile)
            .with_child(namespace_app(t))
            .with_child(
                AstNode::new(NodeKind::FunctionDecl, range_of(t, "function probe"))
                    .with_child(tok(t, "probe", NodeKind::Name))
                    .with_child(
                        AstNode::new(NodeKind::Call, range_of(t, "missing()"))
                            .with_child(tok(t, "missing", NodeKind::Name)),
                    ),
            ),
    )
    .with_diagnostics(vec![ParseDiagnostic {
        message: "unexpected token".to_string(),
        range: range_of(t, "missing"),
    }])
}

/// A parser that knows every canned source above.
pub fn standard_parser() -> FakeParser {
    FakeParser::new()
        .with_source(DEFS_V1, defs_v1_tree())
        .with_source(DEFS_V2, defs_v2_tree())
        .with_source(CARS, cars_tree())
        .with_source(BROKEN, broken_tree())
}
