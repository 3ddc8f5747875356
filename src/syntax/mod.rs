//! The syntax-tree interface consumed by the collector.
//!
//! Parsing itself lives outside this crate: any parser that produces an
//! [`AstNode`] tree plugs in behind the [`SourceParser`] trait. The core only
//! relies on the contract spelled out here — a kind discriminator, a byte
//! range, ordered children, and token text on leaf nodes.

mod node;
mod tree;

pub use node::{AstNode, NodeKind};
pub use tree::{ParseDiagnostic, SourceParser, SourceTree};
