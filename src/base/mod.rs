//! Foundation types for the codemap core.
//!
//! This module provides the fundamental types used throughout the index:
//! - [`FileId`], [`SymbolId`], [`ReferenceId`] - arena identifiers
//! - [`TextRange`], [`TextSize`] - source positions
//! - [`LineCol`], [`LineIndex`] - line/column conversion
//!
//! This module has NO dependencies on other codemap modules.

mod ids;
mod span;

pub use ids::{FileId, ReferenceId, SymbolId};
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
