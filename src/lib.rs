//! # codemap-base
//!
//! Core library for PHP symbol indexing, reference resolution, and
//! incremental code intelligence.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → query layer (goto-def, usages, hover, search, diagnostics)
//!   ↓
//! index    → incremental controller (hashing, reindex batches)
//!   ↓
//! resolve  → two-phase resolution + hierarchy walks
//!   ↓
//! collect  → AST walker with scope stack + name expansion
//!   ↓
//! db       → files / symbols / references and their indices
//!   ↓
//! syntax   → the consumed parser interface
//!   ↓
//! base     → primitives (ids, spans, line index)
//! ```
//!
//! Parsing and the wire protocol live outside this crate: a parser plugs in
//! behind [`syntax::SourceParser`], and a protocol server sits on top of
//! [`ide::WorkspaceHost`].

/// Foundation types: ids, spans, line/column conversion
pub mod base;

/// The syntax-tree interface consumed by the collector
pub mod syntax;

/// The durable model: files, symbols, references
pub mod db;

/// Single-pass per-file collection
pub mod collect;

/// Two-phase reference resolution and hierarchy walks
pub mod resolve;

/// Incremental reindexing
pub mod index;

/// Query layer for protocol handlers
pub mod ide;

/// Workspace management
pub mod project;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, ReferenceId, SymbolId, TextRange, TextSize};
pub use db::{Database, Reference, Symbol, SymbolKind};
pub use ide::WorkspaceHost;
pub use index::{IndexError, IndexSummary, Indexer};
pub use resolve::ResolveOptions;
pub use syntax::{AstNode, NodeKind, SourceParser, SourceTree};
