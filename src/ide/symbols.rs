//! Symbol listings and workspace-wide search.

use crate::db::{Database, Symbol};

/// All symbols declared in a file, in position order.
pub fn document_symbols<'db>(db: &'db Database, uri: &str) -> Vec<&'db Symbol> {
    let Some(file) = db.file_by_uri(uri) else {
        return Vec::new();
    };
    let mut symbols = db.symbols_in_file(file.id);
    symbols.sort_by_key(|s| s.range.start());
    symbols
}

/// Case-insensitive substring search over symbol names, ordered by FQN.
pub fn workspace_symbols<'db>(db: &'db Database, query: &str) -> Vec<&'db Symbol> {
    let needle = query.to_lowercase();
    let mut matches: Vec<&Symbol> = db
        .all_symbols()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| a.fqn.cmp(&b.fqn));
    matches
}
