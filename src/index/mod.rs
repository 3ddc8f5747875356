//! The incremental controller.
//!
//! Orchestrates a reindex batch: hash-based change detection, cascading
//! invalidation of replaced files, per-file collection (parallel), and one
//! resolution pass over the whole batch. Application is atomic per file —
//! a file's old rows are removed and its new rows inserted in one step, so
//! an aborted batch leaves the store consistent at file granularity.

use rayon::prelude::*;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::base::LineIndex;
use crate::collect::{CollectOutput, collect};
use crate::db::{ContentHash, Database};
use crate::resolve::{ResolveOptions, resolve_all};
use crate::syntax::{ParseDiagnostic, SourceParser};

/// A failure while driving a reindex batch.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The batch was cancelled at a file boundary. Already-applied files
    /// remain indexed; their references stay unresolved until the next pass.
    #[error("reindex batch cancelled")]
    Cancelled,
    /// A workspace file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Counts reported by one reindex batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub files_removed: usize,
    /// Live totals after the batch.
    pub symbols: usize,
    pub references: usize,
    /// References resolved by this batch's resolution pass.
    pub resolved: usize,
    /// References still unresolved after the pass.
    pub unresolved: usize,
}

/// One reindex session over a database.
///
/// A single mutator at a time: the indexer borrows the database mutably for
/// the whole batch. Per-file collection is pure and fans out across threads;
/// all store writes happen serially, and the shared resolution pass runs
/// strictly after the last file was applied.
pub struct Indexer<'a> {
    db: &'a mut Database,
    parser: &'a dyn SourceParser,
    options: ResolveOptions,
    cancel: CancellationToken,
}

impl<'a> Indexer<'a> {
    pub fn new(db: &'a mut Database, parser: &'a dyn SourceParser) -> Self {
        Self {
            db,
            parser,
            options: ResolveOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Cancel the batch cooperatively through `token`; checked at file
    /// boundaries.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Reindex a set of changed/new files and removals, then resolve.
    pub fn reindex(
        &mut self,
        changed: &[(String, String)],
        removed: &[String],
    ) -> Result<IndexSummary, IndexError> {
        let mut summary = IndexSummary::default();

        for uri in removed {
            if self.cancel.is_cancelled() {
                return Err(IndexError::Cancelled);
            }
            if self.db.remove_file(uri) {
                summary.files_removed += 1;
                debug!(%uri, "removed file");
            }
        }

        // Hash fast path: unchanged contents are skipped without parsing.
        let mut work: Vec<(&str, &str, ContentHash)> = Vec::new();
        for (uri, text) in changed {
            let hash = ContentHash::of(text);
            if self.db.file_hash(uri) == Some(&hash) {
                summary.files_skipped += 1;
                debug!(%uri, "contents unchanged, skipping");
                continue;
            }
            work.push((uri.as_str(), text.as_str(), hash));
        }

        // Parse and collect in parallel; outputs are pure per-file data.
        let parser = self.parser;
        let cancel = self.cancel.clone();
        let outputs: Vec<Option<CollectedFile<'_>>> = work
            .par_iter()
            .map(|&(uri, text, hash)| {
                if cancel.is_cancelled() {
                    return None;
                }
                let tree = parser.parse(uri, text);
                let output = collect(&tree);
                Some(CollectedFile {
                    uri,
                    hash,
                    line_index: LineIndex::new(text),
                    diagnostics: tree.diagnostics,
                    output,
                })
            })
            .collect();

        // Apply serially, one file at a time.
        for item in outputs {
            let Some(file) = item else {
                return Err(IndexError::Cancelled);
            };
            if self.cancel.is_cancelled() {
                return Err(IndexError::Cancelled);
            }
            self.apply(file);
            summary.files_indexed += 1;
        }

        // Cross-file resolution needs the full symbol set, so the pass runs
        // once per batch, not per file.
        let stats = resolve_all(self.db, &self.options);
        summary.symbols = self.db.symbol_count();
        summary.references = self.db.reference_count();
        summary.resolved = stats.resolved;
        summary.unresolved = stats.unresolved;

        info!(
            indexed = summary.files_indexed,
            skipped = summary.files_skipped,
            removed = summary.files_removed,
            symbols = summary.symbols,
            references = summary.references,
            unresolved = summary.unresolved,
            "reindex batch finished"
        );
        Ok(summary)
    }

    /// Re-collect one changed document. Still runs a full resolution pass,
    /// since the edit may affect cross-file references into this file.
    pub fn file_changed(&mut self, uri: &str, text: &str) -> Result<IndexSummary, IndexError> {
        self.reindex(&[(uri.to_string(), text.to_string())], &[])
    }

    /// Remove one file, then re-resolve what its symbols were holding up.
    pub fn remove_file(&mut self, uri: &str) -> Result<IndexSummary, IndexError> {
        self.reindex(&[], &[uri.to_string()])
    }

    fn apply(&mut self, file: CollectedFile<'_>) {
        let CollectedFile {
            uri,
            hash,
            line_index,
            diagnostics,
            output,
        } = file;

        let file_id = self.db.create_file(uri, hash, line_index, diagnostics);

        // Symbols come out of the collector in pre-order, so a parent's
        // global id is always known before its children need it.
        let mut symbol_ids = Vec::with_capacity(output.symbols.len());
        for ps in &output.symbols {
            let parent = ps.parent.map(|i| symbol_ids[i]);
            let id = self.db.add_symbol(
                file_id,
                parent,
                ps.kind,
                ps.name.clone(),
                ps.fqn.clone(),
                ps.range,
            );
            symbol_ids.push(id);
        }

        let mut ref_ids = Vec::with_capacity(output.references.len());
        for pr in &output.references {
            ref_ids.push(
                self.db
                    .add_reference(file_id, pr.range, pr.target_fqn.clone(), pr.origin),
            );
        }

        for (i, ps) in output.symbols.iter().enumerate() {
            if ps.extends.is_some() || !ps.interfaces.is_empty() {
                self.db.set_hierarchy(
                    symbol_ids[i],
                    ps.extends.map(|r| ref_ids[r]),
                    ps.interfaces.iter().map(|&r| ref_ids[r]).collect(),
                );
            }
        }

        debug!(
            %uri,
            symbols = output.symbols.len(),
            references = output.references.len(),
            "applied file"
        );
    }
}

struct CollectedFile<'a> {
    uri: &'a str,
    hash: ContentHash,
    line_index: LineIndex,
    diagnostics: Vec<ParseDiagnostic>,
    output: CollectOutput,
}
