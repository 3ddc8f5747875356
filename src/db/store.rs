//! The store: files, symbols, references, and the indices over them.
//!
//! Symbols and references live in tombstoned arenas addressed by their ids;
//! ids are assigned monotonically and never reused, so a stale id can only
//! ever miss, never alias a newer row. All cross-row links (`parent`,
//! `target`, `extends`) are ids, not pointers.
//!
//! The store itself is not internally locked: one mutator at a time, readers
//! see either the pre- or post-mutation state. [`crate::ide::WorkspaceHost`]
//! provides that regime for shared use.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{FileId, LineIndex, ReferenceId, SymbolId};
use crate::syntax::ParseDiagnostic;

use super::file::{ContentHash, FileRecord};
use super::reference::{Reference, ReferenceOrigin};
use super::symbol::{Symbol, SymbolKind};

/// The symbol/reference database for one workspace.
#[derive(Debug, Default)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Database {
    /// URI → file id.
    files: IndexMap<SmolStr, FileId>,
    /// File id → row.
    file_rows: IndexMap<FileId, FileRecord>,
    /// Symbol arena. `None` slots are deleted rows.
    symbols: Vec<Option<Symbol>>,
    /// Reference arena. `None` slots are deleted rows.
    references: Vec<Option<Reference>>,
    /// FQN → live symbol ids, in insertion order. The first entry wins
    /// lookups; this is also what unifies re-opened namespaces across files.
    symbols_by_fqn: FxHashMap<SmolStr, Vec<SymbolId>>,
    symbols_by_file: FxHashMap<FileId, Vec<SymbolId>>,
    refs_by_file: FxHashMap<FileId, Vec<ReferenceId>>,
    refs_by_fqn: FxHashMap<SmolStr, Vec<ReferenceId>>,
    /// Target symbol → referencing rows (the "find usages" index).
    back_refs: FxHashMap<SymbolId, Vec<ReferenceId>>,
    /// References with no target. Resolution drains this; invalidation
    /// refills it.
    unresolved: FxHashSet<ReferenceId>,
    next_file: u32,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Look up the id for a URI.
    pub fn file_id(&self, uri: &str) -> Option<FileId> {
        self.files.get(uri).copied()
    }

    /// Get a file row by id.
    pub fn file(&self, id: FileId) -> Option<&FileRecord> {
        self.file_rows.get(&id)
    }

    /// Get a file row by URI.
    pub fn file_by_uri(&self, uri: &str) -> Option<&FileRecord> {
        self.file_id(uri).and_then(|id| self.file(id))
    }

    /// The stored content hash for a URI, if the file is indexed.
    pub fn file_hash(&self, uri: &str) -> Option<&ContentHash> {
        self.file_by_uri(uri).map(|f| &f.hash)
    }

    /// Iterate over all file rows.
    pub fn file_records(&self) -> impl Iterator<Item = &FileRecord> {
        self.file_rows.values()
    }

    /// Number of indexed files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Insert a fresh row for `uri`, replacing (and cascading away) any
    /// existing row for the same URI.
    pub fn create_file(
        &mut self,
        uri: &str,
        hash: ContentHash,
        line_index: LineIndex,
        diagnostics: Vec<ParseDiagnostic>,
    ) -> FileId {
        self.remove_file(uri);

        let id = FileId::new(self.next_file);
        self.next_file += 1;

        let uri = SmolStr::new(uri);
        self.files.insert(uri.clone(), id);
        self.file_rows.insert(
            id,
            FileRecord {
                id,
                uri,
                hash,
                line_index,
                diagnostics,
            },
        );
        id
    }

    /// Delete a file row together with everything it owns.
    ///
    /// Symbols owned by the file and references originating in it are
    /// deleted; every remaining reference elsewhere whose target was one of
    /// the deleted symbols reverts to unresolved. Returns `false` if the URI
    /// was not indexed.
    pub fn remove_file(&mut self, uri: &str) -> bool {
        let Some(id) = self.files.swap_remove(uri) else {
            return false;
        };
        self.file_rows.swap_remove(&id);

        // Drop symbols first, unlinking back-references into them.
        for sym_id in self.symbols_by_file.remove(&id).unwrap_or_default() {
            let Some(sym) = self.symbols[sym_id.index() as usize].take() else {
                continue;
            };
            if let Some(ids) = self.symbols_by_fqn.get_mut(&sym.fqn) {
                ids.retain(|&s| s != sym_id);
                if ids.is_empty() {
                    self.symbols_by_fqn.remove(&sym.fqn);
                }
            }
            for ref_id in self.back_refs.remove(&sym_id).unwrap_or_default() {
                let Some(r) = self.references[ref_id.index() as usize].as_mut() else {
                    continue;
                };
                if r.file == id {
                    // Deleted below along with the rest of the file.
                    continue;
                }
                r.target = None;
                self.unresolved.insert(ref_id);
            }
        }

        // Then drop the file's own references.
        for ref_id in self.refs_by_file.remove(&id).unwrap_or_default() {
            let Some(r) = self.references[ref_id.index() as usize].take() else {
                continue;
            };
            if let Some(ids) = self.refs_by_fqn.get_mut(&r.target_fqn) {
                ids.retain(|&x| x != ref_id);
                if ids.is_empty() {
                    self.refs_by_fqn.remove(&r.target_fqn);
                }
            }
            if let Some(target) = r.target {
                if let Some(ids) = self.back_refs.get_mut(&target) {
                    ids.retain(|&x| x != ref_id);
                }
            }
            self.unresolved.remove(&ref_id);
        }

        true
    }

    // ------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------

    /// Insert a symbol row and return its id.
    pub fn add_symbol(
        &mut self,
        file: FileId,
        parent: Option<SymbolId>,
        kind: SymbolKind,
        name: SmolStr,
        fqn: SmolStr,
        range: TextRange,
    ) -> SymbolId {
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(Some(Symbol {
            id,
            parent,
            kind,
            name,
            fqn: fqn.clone(),
            file,
            range,
            extends: None,
            interfaces: Vec::new(),
            children: Vec::new(),
        }));

        if let Some(parent) = parent {
            if let Some(p) = self.symbols[parent.index() as usize].as_mut() {
                p.children.push(id);
            }
        }
        self.symbols_by_fqn.entry(fqn).or_default().push(id);
        self.symbols_by_file.entry(file).or_default().push(id);
        id
    }

    /// Attach the hierarchy-clause references of a class or interface.
    pub fn set_hierarchy(
        &mut self,
        id: SymbolId,
        extends: Option<ReferenceId>,
        interfaces: Vec<ReferenceId>,
    ) {
        if let Some(sym) = self.symbols[id.index() as usize].as_mut() {
            sym.extends = extends;
            sym.interfaces = interfaces;
        }
    }

    /// Get a symbol row by id. Deleted rows yield `None`.
    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index() as usize)?.as_ref()
    }

    /// Look up a symbol by canonical FQN (first live row wins).
    pub fn symbol_by_fqn(&self, fqn: &str) -> Option<&Symbol> {
        let id = *self.symbols_by_fqn.get(fqn)?.first()?;
        self.symbol(id)
    }

    /// All live symbols owned by a file, in collection order.
    pub fn symbols_in_file(&self, file: FileId) -> Vec<&Symbol> {
        self.symbols_by_file
            .get(&file)
            .map(|ids| ids.iter().filter_map(|&id| self.symbol(id)).collect())
            .unwrap_or_default()
    }

    /// Iterate over all live symbols.
    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter_map(|s| s.as_ref())
    }

    /// Number of live symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_some()).count()
    }

    // ------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------

    /// Insert an unresolved reference row and return its id.
    pub fn add_reference(
        &mut self,
        file: FileId,
        range: TextRange,
        target_fqn: SmolStr,
        origin: ReferenceOrigin,
    ) -> ReferenceId {
        let id = ReferenceId::new(self.references.len() as u32);
        self.references.push(Some(Reference {
            id,
            file,
            range,
            target_fqn: target_fqn.clone(),
            target: None,
            origin,
        }));
        self.refs_by_file.entry(file).or_default().push(id);
        self.refs_by_fqn.entry(target_fqn).or_default().push(id);
        self.unresolved.insert(id);
        id
    }

    /// Get a reference row by id. Deleted rows yield `None`.
    pub fn reference(&self, id: ReferenceId) -> Option<&Reference> {
        self.references.get(id.index() as usize)?.as_ref()
    }

    /// All live references originating in a file, in collection order.
    pub fn references_in_file(&self, file: FileId) -> Vec<&Reference> {
        self.refs_by_file
            .get(&file)
            .map(|ids| ids.iter().filter_map(|&id| self.reference(id)).collect())
            .unwrap_or_default()
    }

    /// Set or clear a reference's target, maintaining the back-reference
    /// index and the unresolved set.
    pub fn set_reference_target(&mut self, id: ReferenceId, target: Option<SymbolId>) {
        let Some(r) = self.references.get_mut(id.index() as usize).and_then(Option::as_mut) else {
            return;
        };
        let old = std::mem::replace(&mut r.target, target);

        if let Some(old) = old {
            if let Some(ids) = self.back_refs.get_mut(&old) {
                ids.retain(|&x| x != id);
            }
        }
        match target {
            Some(sym) => {
                self.back_refs.entry(sym).or_default().push(id);
                self.unresolved.remove(&id);
            }
            None => {
                self.unresolved.insert(id);
            }
        }
    }

    /// All live references targeting a symbol, ordered by file then position.
    pub fn usages_of(&self, id: SymbolId) -> Vec<&Reference> {
        let mut refs: Vec<&Reference> = self
            .back_refs
            .get(&id)
            .map(|ids| ids.iter().filter_map(|&r| self.reference(r)).collect())
            .unwrap_or_default();
        refs.sort_by_key(|r| (r.file, r.range.start()));
        refs
    }

    /// Ids of all currently-unresolved references, in id order.
    pub fn unresolved_ids(&self) -> Vec<ReferenceId> {
        let mut ids: Vec<ReferenceId> = self.unresolved.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Iterate over all live references.
    pub fn all_references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter_map(|r| r.as_ref())
    }

    /// Number of live references.
    pub fn reference_count(&self) -> usize {
        self.references.iter().filter(|r| r.is_some()).count()
    }

    /// Number of unresolved references.
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}
