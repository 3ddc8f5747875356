//! Reference rows.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{FileId, ReferenceId, SymbolId};

/// Where a reference comes from.
///
/// Hierarchy clauses are stored as ordinary reference rows but are attached
/// to the declaring symbol, so the hierarchy walker can follow them without a
/// secondary lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum ReferenceOrigin {
    /// An ordinary use-site (call, instantiation, member access, …).
    Use,
    /// A class `extends` clause, or one entry of an interface `extends` list.
    Extends,
    /// One entry of a class `implements` list.
    Implements,
}

/// A syntactic use-site naming a symbol.
///
/// Created unresolved by the collector; `target` is only ever set or cleared
/// by the resolution pass and the cascade on file removal.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    pub id: ReferenceId,
    pub file: FileId,
    pub range: TextRange,
    /// Canonical FQN this reference targets. Always present.
    pub target_fqn: SmolStr,
    /// The resolved target symbol; `None` means unresolved.
    pub target: Option<SymbolId>,
    pub origin: ReferenceOrigin,
}

impl Reference {
    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }
}
