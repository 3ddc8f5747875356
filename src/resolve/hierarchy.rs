//! Inheritance-aware member lookup.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::SymbolId;
use crate::db::{Database, MemberKind, SymbolKind};

/// Find the declaring symbol of a member, walking `extends`/`implements`
/// chains.
///
/// The class's own declared children are scanned first: methods match
/// case-insensitively, fields and constants exactly. While scanning for a
/// method, the first `__call`/`__callStatic` encountered anywhere in the walk
/// is remembered; it is returned only when the whole hierarchy yields no
/// exact match. Field lookups follow the `extends` chain only; method and
/// constant lookups also descend into `implements` targets. A visited set
/// keyed on class FQNs keeps malformed cyclic hierarchies from looping.
pub fn find_member(
    db: &Database,
    class: SymbolId,
    kind: MemberKind,
    name: &str,
) -> Option<SymbolId> {
    let mut visited: FxHashSet<SmolStr> = FxHashSet::default();
    let mut call_fallback = None;
    match walk(db, class, kind, name, &mut visited, &mut call_fallback) {
        Some(found) => Some(found),
        None if kind == MemberKind::Method => call_fallback,
        None => None,
    }
}

fn walk(
    db: &Database,
    id: SymbolId,
    kind: MemberKind,
    name: &str,
    visited: &mut FxHashSet<SmolStr>,
    call_fallback: &mut Option<SymbolId>,
) -> Option<SymbolId> {
    let sym = db.symbol(id)?;
    if !visited.insert(sym.fqn.clone()) {
        return None;
    }

    for &child_id in &sym.children {
        let Some(child) = db.symbol(child_id) else {
            continue;
        };
        match kind {
            MemberKind::Method => {
                if child.kind != SymbolKind::Function {
                    continue;
                }
                if child.name.eq_ignore_ascii_case(name) {
                    return Some(child_id);
                }
                if call_fallback.is_none()
                    && (child.name.eq_ignore_ascii_case("__call")
                        || child.name.eq_ignore_ascii_case("__callStatic"))
                {
                    *call_fallback = Some(child_id);
                }
            }
            MemberKind::Field => {
                if child.kind == SymbolKind::Variable && child.name == name {
                    return Some(child_id);
                }
            }
            MemberKind::Constant => {
                if child.kind == SymbolKind::Constant && child.name == name {
                    return Some(child_id);
                }
            }
        }
    }

    match sym.kind {
        SymbolKind::Class => {
            if let Some(parent) = hierarchy_target(db, sym.extends, SymbolKind::Class) {
                if let Some(found) = walk(db, parent, kind, name, visited, call_fallback) {
                    return Some(found);
                }
            }
            if kind != MemberKind::Field {
                for &r in &sym.interfaces {
                    if let Some(iface) = hierarchy_target(db, Some(r), SymbolKind::Interface) {
                        if let Some(found) = walk(db, iface, kind, name, visited, call_fallback) {
                            return Some(found);
                        }
                    }
                }
            }
        }
        SymbolKind::Interface => {
            // Interfaces may extend multiple interfaces.
            for &r in &sym.interfaces {
                if let Some(iface) = hierarchy_target(db, Some(r), SymbolKind::Interface) {
                    if let Some(found) = walk(db, iface, kind, name, visited, call_fallback) {
                        return Some(found);
                    }
                }
            }
        }
        _ => {}
    }

    None
}

/// Resolve a hierarchy-clause reference to its target symbol, provided the
/// target is live and of the expected kind.
fn hierarchy_target(
    db: &Database,
    reference: Option<crate::base::ReferenceId>,
    expected: SymbolKind,
) -> Option<SymbolId> {
    let target = db.reference(reference?)?.target?;
    (db.symbol(target)?.kind == expected).then_some(target)
}
