//! Single-pass collection: one file's syntax tree in, symbols and
//! unresolved references out.

mod collector;
mod names;

pub use collector::{CollectOutput, PendingRef, PendingSymbol, collect};
pub use names::NameScope;
