//! Hover information.

use text_size::TextRange;

use crate::base::LineCol;
use crate::db::Database;

use super::goto::{definition_of, reference_at};

/// Hover contents for the reference under the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// A PHP-fenced description of the target symbol.
    pub contents: String,
    /// The range of the reference the hover belongs to.
    pub range: TextRange,
}

/// Hover for the reference under the cursor; `None` over plain text or
/// unresolved references.
pub fn hover(db: &Database, uri: &str, pos: LineCol) -> Option<HoverResult> {
    let reference = reference_at(db, uri, pos)?;
    let symbol = definition_of(db, reference)?;
    Some(HoverResult {
        contents: symbol.description(),
        range: reference.range,
    })
}
