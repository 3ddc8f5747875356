//! Database snapshots.
//!
//! One structured mechanism for the whole store: the database serializes as
//! a single JSON document. Ids are plain integers in the snapshot, so a
//! round-trip preserves every cross-row link exactly.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use super::Database;

/// A snapshot save/load failure.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Database {
    /// Write a snapshot of the whole database to `path`.
    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_vec(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a database snapshot from `path`.
    pub fn load(path: &Path) -> Result<Database, PersistError> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use smol_str::SmolStr;
    use text_size::{TextRange, TextSize};

    use crate::base::LineIndex;
    use crate::db::{ContentHash, Database, ReferenceOrigin, SymbolKind, fqn};

    #[test]
    fn test_snapshot_round_trip() {
        let mut db = Database::new();
        let file = db.create_file(
            "a.php",
            ContentHash::of("<?php class Foo {}"),
            LineIndex::new("<?php class Foo {}"),
            Vec::new(),
        );
        let sym = db.add_symbol(
            file,
            None,
            SymbolKind::Class,
            SmolStr::new("Foo"),
            fqn::class_fqn("\\", "Foo"),
            TextRange::at(TextSize::from(12), TextSize::from(3)),
        );
        let r = db.add_reference(
            file,
            TextRange::at(TextSize::from(30), TextSize::from(3)),
            SmolStr::new("\\foo"),
            ReferenceOrigin::Use,
        );
        db.set_reference_target(r, Some(sym));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codemap.json");
        db.save(&path).unwrap();

        let loaded = Database::load(&path).unwrap();
        assert_eq!(loaded.file_count(), 1);
        assert_eq!(loaded.symbol_by_fqn("\\foo").unwrap().id, sym);
        assert_eq!(loaded.usages_of(sym).len(), 1);
        assert_eq!(loaded.unresolved_count(), 0);
    }
}
