//! Shared ownership of a database for concurrent use.

use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::index::{IndexError, IndexSummary, Indexer};
use crate::resolve::ResolveOptions;
use crate::syntax::SourceParser;

/// Owns a [`Database`] behind a read-write lock.
///
/// Mutations (reindex, document change, file removal) take the write lock
/// for the whole batch, so readers observe either the pre- or post-batch
/// state — never a file that is half deleted and not yet re-inserted. Read
/// queries run concurrently with each other under the read lock.
pub struct WorkspaceHost {
    db: RwLock<Database>,
    parser: Box<dyn SourceParser>,
    options: ResolveOptions,
}

impl WorkspaceHost {
    pub fn new(parser: Box<dyn SourceParser>) -> Self {
        Self {
            db: RwLock::new(Database::new()),
            parser,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Reindex a batch of changed files and removals.
    pub fn reindex(
        &self,
        changed: &[(String, String)],
        removed: &[String],
    ) -> Result<IndexSummary, IndexError> {
        let mut db = self.db.write();
        Indexer::new(&mut db, self.parser.as_ref())
            .with_options(self.options.clone())
            .reindex(changed, removed)
    }

    /// Reindex a batch, cancellable at file boundaries through `token`.
    pub fn reindex_with_cancellation(
        &self,
        changed: &[(String, String)],
        removed: &[String],
        token: CancellationToken,
    ) -> Result<IndexSummary, IndexError> {
        let mut db = self.db.write();
        Indexer::new(&mut db, self.parser.as_ref())
            .with_options(self.options.clone())
            .with_cancellation(token)
            .reindex(changed, removed)
    }

    /// Apply one changed document.
    pub fn file_changed(&self, uri: &str, text: &str) -> Result<IndexSummary, IndexError> {
        let mut db = self.db.write();
        Indexer::new(&mut db, self.parser.as_ref())
            .with_options(self.options.clone())
            .file_changed(uri, text)
    }

    /// Remove one file from the index.
    pub fn remove_file(&self, uri: &str) -> Result<IndexSummary, IndexError> {
        let mut db = self.db.write();
        Indexer::new(&mut db, self.parser.as_ref())
            .with_options(self.options.clone())
            .remove_file(uri)
    }

    /// Run a read query under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        f(&self.db.read())
    }
}
