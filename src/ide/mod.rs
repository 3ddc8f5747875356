//! IDE features — high-level APIs for protocol handlers.
//!
//! This module provides the interface between the index and a protocol
//! server. Each function corresponds to one request shape.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: take the database and plain positions in, return
//!    rows out — no protocol types anywhere.
//! 2. **Composable**: everything is built on the store's own indices.
//!
//! The recommended entry point for shared use is [`WorkspaceHost`], which
//! provides the single-mutator / concurrent-readers locking regime:
//!
//! ```ignore
//! use codemap::ide::WorkspaceHost;
//!
//! let host = WorkspaceHost::new(Box::new(parser));
//! host.file_changed("test.php", "<?php class Foo {}")?;
//!
//! let symbols = host.read(|db| ide::document_symbols(db, "test.php").len());
//! ```

mod diagnostics;
mod goto;
mod host;
mod hover;
mod references;
mod symbols;

pub use diagnostics::{FileDiagnostic, file_diagnostics};
pub use goto::{definition_of, goto_definition, reference_at, symbol_at};
pub use host::WorkspaceHost;
pub use hover::{HoverResult, hover};
pub use references::{find_references, reference_counts};
pub use symbols::{document_symbols, workspace_symbols};
