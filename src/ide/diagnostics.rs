//! Per-file diagnostics: forwarded parser output plus unresolved references.

use text_size::TextRange;

use crate::db::Database;

/// One diagnostic attached to a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub message: String,
    pub range: TextRange,
}

/// The diagnostics for a file: whatever the parser reported, verbatim,
/// followed by one entry per unresolved reference.
///
/// Unresolved references are a normal end state, surfaced here as optional
/// diagnostics; nothing in the core treats them as errors.
pub fn file_diagnostics(db: &Database, uri: &str) -> Vec<FileDiagnostic> {
    let Some(file) = db.file_by_uri(uri) else {
        return Vec::new();
    };

    let mut out: Vec<FileDiagnostic> = file
        .diagnostics
        .iter()
        .map(|d| FileDiagnostic {
            message: d.message.clone(),
            range: d.range,
        })
        .collect();

    for r in db.references_in_file(file.id) {
        if !r.is_resolved() {
            out.push(FileDiagnostic {
                message: format!("Unresolved reference \"{}\"", r.target_fqn),
                range: r.range,
            });
        }
    }
    out.sort_by_key(|d| d.range.start());
    out
}
