//! Arena identifiers for files, symbols, and references.

use std::fmt;

/// An interned identifier for a source file.
///
/// `FileId` is a lightweight handle (just a u32) that uniquely identifies
/// a file within the index. The actual URI is stored in the file table.
///
/// Using `FileId` instead of the URI string throughout the codebase:
/// - Makes comparisons O(1) instead of O(n)
/// - Reduces memory usage (4 bytes vs ~24+ bytes)
/// - Enables cheap copying and hashing
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct FileId(pub u32);

/// Identifier of a symbol row in the symbol arena.
///
/// Ids are assigned monotonically and never reused within the lifetime of a
/// database, so an id held after its symbol was deleted can never alias a
/// newer symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolId(pub u32);

/// Identifier of a reference row in the reference arena.
///
/// Same monotonic-assignment guarantee as [`SymbolId`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceId(pub u32);

macro_rules! impl_id {
    ($ty:ident, $debug:literal, $display:literal) => {
        impl $ty {
            /// Create a new id from a raw index.
            #[inline]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw index.
            #[inline]
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($debug, "({})"), self.0)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($display, "#{}"), self.0)
            }
        }

        impl From<u32> for $ty {
            #[inline]
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$ty> for u32 {
            #[inline]
            fn from(id: $ty) -> Self {
                id.0
            }
        }
    };
}

impl_id!(FileId, "FileId", "file");
impl_id!(SymbolId, "SymbolId", "sym");
impl_id!(ReferenceId, "ReferenceId", "ref");
