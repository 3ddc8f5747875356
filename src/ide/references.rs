//! Find-usages and per-symbol reference counts.

use crate::base::{LineCol, SymbolId};
use crate::db::{Database, Reference};

use super::goto::{reference_at, symbol_at};

/// All references to the symbol under the cursor.
///
/// The cursor may rest on the declaration itself or on any reference to it;
/// both lead to the same usage set.
pub fn find_references<'db>(db: &'db Database, uri: &str, pos: LineCol) -> Vec<&'db Reference> {
    let symbol = symbol_at(db, uri, pos)
        .map(|s| s.id)
        .or_else(|| reference_at(db, uri, pos).and_then(|r| r.target));
    symbol.map(|id| db.usages_of(id)).unwrap_or_default()
}

/// Usage counts for every symbol in a file, in declaration order.
///
/// The code-lens feed: "<n> references" annotations over each declaration.
pub fn reference_counts(db: &Database, uri: &str) -> Vec<(SymbolId, usize)> {
    let Some(file) = db.file_by_uri(uri) else {
        return Vec::new();
    };
    db.symbols_in_file(file.id)
        .into_iter()
        .map(|s| (s.id, db.usages_of(s.id).len()))
        .collect()
}
