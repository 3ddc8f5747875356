//! Parsed trees and the parser seam.

use text_size::TextRange;

use super::AstNode;

/// A diagnostic reported by the external parser.
///
/// These are forwarded verbatim to the file row; the core never interprets
/// them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseDiagnostic {
    pub message: String,
    pub range: TextRange,
}

/// The result of parsing one file.
#[derive(Clone, Debug)]
pub struct SourceTree {
    pub root: AstNode,
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl SourceTree {
    pub fn new(root: AstNode) -> Self {
        Self {
            root,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<ParseDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// The seam where a real parser plugs in.
///
/// `Send + Sync` because a reindex batch parses files in parallel.
pub trait SourceParser: Send + Sync {
    fn parse(&self, uri: &str, text: &str) -> SourceTree;
}
