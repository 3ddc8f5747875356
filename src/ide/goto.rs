//! Position queries and goto-definition.

use crate::base::LineCol;
use crate::db::{Database, Reference, Symbol};

/// The innermost symbol whose range contains the given position.
pub fn symbol_at<'db>(db: &'db Database, uri: &str, pos: LineCol) -> Option<&'db Symbol> {
    let file = db.file_by_uri(uri)?;
    let offset = file.line_index.offset(pos)?;
    db.symbols_in_file(file.id)
        .into_iter()
        .filter(|s| s.range.contains_inclusive(offset))
        .min_by_key(|s| s.range.len())
}

/// The innermost reference whose range contains the given position.
pub fn reference_at<'db>(db: &'db Database, uri: &str, pos: LineCol) -> Option<&'db Reference> {
    let file = db.file_by_uri(uri)?;
    let offset = file.line_index.offset(pos)?;
    db.references_in_file(file.id)
        .into_iter()
        .filter(|r| r.range.contains_inclusive(offset))
        .min_by_key(|r| r.range.len())
}

/// Follow a reference to its target symbol.
pub fn definition_of<'db>(db: &'db Database, reference: &Reference) -> Option<&'db Symbol> {
    db.symbol(reference.target?)
}

/// The definition targeted by the reference under the cursor.
pub fn goto_definition<'db>(db: &'db Database, uri: &str, pos: LineCol) -> Option<&'db Symbol> {
    let reference = reference_at(db, uri, pos)?;
    definition_of(db, reference)
}
