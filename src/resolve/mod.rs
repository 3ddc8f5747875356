//! The bulk resolution pass.
//!
//! Two ordered passes over the currently-unresolved references, run once per
//! reindex batch after every file has been collected:
//!
//! 1. **Non-member pass** — direct FQN lookup, with an optional single
//!    strip-to-root retry for function calls.
//! 2. **Member pass** — direct lookup first, else split at the member
//!    separator and walk the class hierarchy.
//!
//! References are processed in id order, so the outcome does not depend on
//! the order files were collected in.

mod hierarchy;

pub use hierarchy::find_member;

use crate::db::{Database, fqn};

/// Tunables for the resolution pass.
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    /// When a function-call FQN misses, retry once with the bare
    /// root-namespace form (`\a\b\f()` → `\f()`). A heuristic for unqualified
    /// calls to global functions; on by default.
    pub global_function_fallback: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            global_function_fallback: true,
        }
    }
}

/// Outcome counts of one resolution pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    pub unresolved: usize,
}

/// Resolve every currently-unresolved reference against the current symbol
/// set. Only ever sets targets; never deletes rows.
pub fn resolve_all(db: &mut Database, options: &ResolveOptions) -> ResolveStats {
    let pending = db.unresolved_ids();
    let mut resolved = 0usize;

    // Pass 1: references whose FQN names no member.
    for &id in &pending {
        let Some(r) = db.reference(id) else {
            continue;
        };
        if fqn::is_member(&r.target_fqn) {
            continue;
        }
        let target_fqn = r.target_fqn.clone();

        let mut target = db.symbol_by_fqn(&target_fqn).map(|s| s.id);
        if target.is_none() && options.global_function_fallback && target_fqn.ends_with("()") {
            if let Some(bare) = fqn::root_form(&target_fqn) {
                target = db.symbol_by_fqn(&bare).map(|s| s.id);
            }
        }
        if let Some(sym) = target {
            db.set_reference_target(id, Some(sym));
            resolved += 1;
        }
    }

    // Pass 2: member references. Direct lookup covers references already
    // disambiguated during collection; everything else goes through the
    // hierarchy.
    for &id in &pending {
        let Some(r) = db.reference(id) else {
            continue;
        };
        if r.is_resolved() || !fqn::is_member(&r.target_fqn) {
            continue;
        }
        let target_fqn = r.target_fqn.clone();

        if let Some(sym) = db.symbol_by_fqn(&target_fqn).map(|s| s.id) {
            db.set_reference_target(id, Some(sym));
            resolved += 1;
            continue;
        }

        let Some((class_part, member_part)) = fqn::split_member(&target_fqn) else {
            continue;
        };
        let Some(class) = db.symbol_by_fqn(class_part) else {
            continue;
        };
        if !class.kind.is_class_like() {
            continue;
        }
        let class_id = class.id;
        let (kind, bare) = fqn::member_sigil(member_part);
        if let Some(found) = find_member(db, class_id, kind, bare) {
            db.set_reference_target(id, Some(found));
            resolved += 1;
        }
    }

    let stats = ResolveStats {
        resolved,
        unresolved: db.unresolved_count(),
    };
    tracing::debug!(
        resolved = stats.resolved,
        unresolved = stats.unresolved,
        "resolution pass finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{FileId, SymbolId, TextRange, TextSize};
    use crate::db::{ContentHash, ReferenceOrigin, SymbolKind};
    use crate::base::LineIndex;
    use smol_str::SmolStr;

    fn r(start: u32, len: u32) -> TextRange {
        TextRange::at(TextSize::from(start), TextSize::from(len))
    }

    fn file(db: &mut Database, uri: &str) -> FileId {
        db.create_file(uri, ContentHash::of(uri), LineIndex::new(""), Vec::new())
    }

    fn class(db: &mut Database, f: FileId, name: &str, fqn: &str) -> SymbolId {
        db.add_symbol(
            f,
            None,
            SymbolKind::Class,
            SmolStr::new(name),
            SmolStr::new(fqn),
            r(0, 1),
        )
    }

    fn method(db: &mut Database, f: FileId, class: SymbolId, name: &str, fqn: &str) -> SymbolId {
        db.add_symbol(
            f,
            Some(class),
            SymbolKind::Function,
            SmolStr::new(name),
            SmolStr::new(fqn),
            r(0, 1),
        )
    }

    fn extends(db: &mut Database, f: FileId, sub: SymbolId, super_fqn: &str) {
        let r = db.add_reference(f, r(0, 1), SmolStr::new(super_fqn), ReferenceOrigin::Extends);
        db.set_hierarchy(sub, Some(r), Vec::new());
    }

    fn use_ref(db: &mut Database, f: FileId, fqn: &str) -> crate::base::ReferenceId {
        db.add_reference(f, r(10, 1), SmolStr::new(fqn), ReferenceOrigin::Use)
    }

    fn target_of(db: &Database, id: crate::base::ReferenceId) -> Option<SymbolId> {
        db.reference(id).unwrap().target
    }

    #[test]
    fn test_non_member_direct_lookup() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\app\\a");
        let reference = use_ref(&mut db, f, "\\app\\a");

        let stats = resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(a));
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.unresolved, 0);
    }

    #[test]
    fn test_function_global_fallback() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let strlen = db.add_symbol(
            f,
            None,
            SymbolKind::Function,
            SmolStr::new("strlen"),
            SmolStr::new("\\strlen()"),
            r(0, 1),
        );
        // An unqualified call inside \app expands to \app\strlen().
        let reference = use_ref(&mut db, f, "\\app\\strlen()");

        let mut db2 = Database::new();
        let f2 = file(&mut db2, "a.php");
        db2.add_symbol(
            f2,
            None,
            SymbolKind::Function,
            SmolStr::new("strlen"),
            SmolStr::new("\\strlen()"),
            r(0, 1),
        );
        let reference2 = use_ref(&mut db2, f2, "\\app\\strlen()");

        resolve_all(&mut db, &ResolveOptions::default());
        assert_eq!(target_of(&db, reference), Some(strlen));

        resolve_all(
            &mut db2,
            &ResolveOptions {
                global_function_fallback: false,
            },
        );
        assert_eq!(target_of(&db2, reference2), None);
    }

    #[test]
    fn test_inherited_method_resolves_through_hierarchy() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\app\\a");
        let a_f = method(&mut db, f, a, "f", "\\app\\a::f()");
        let b = class(&mut db, f, "B", "\\app\\b");
        extends(&mut db, f, b, "\\app\\a");
        let reference = use_ref(&mut db, f, "\\app\\b::f()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(a_f));
    }

    #[test]
    fn test_method_match_is_case_insensitive() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\a");
        let a_foo = method(&mut db, f, a, "Foo", "\\a::foo()");
        let b = class(&mut db, f, "B", "\\b");
        extends(&mut db, f, b, "\\a");
        let reference = use_ref(&mut db, f, "\\b::foo()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(a_foo));
    }

    #[test]
    fn test_call_fallback_resolves_unknown_method() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\a");
        let a_call = method(&mut db, f, a, "__call", "\\a::__call()");
        let b = class(&mut db, f, "B", "\\b");
        extends(&mut db, f, b, "\\a");
        let reference = use_ref(&mut db, f, "\\b::foo()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(a_call));
    }

    #[test]
    fn test_call_fallback_not_used_for_fields() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\a");
        method(&mut db, f, a, "__call", "\\a::__call()");
        let reference = use_ref(&mut db, f, "\\a::$missing");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), None);
    }

    #[test]
    fn test_inherited_field_lookup_is_exact() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\a");
        let count = db.add_symbol(
            f,
            Some(a),
            SymbolKind::Variable,
            SmolStr::new("count"),
            SmolStr::new("\\a::$count"),
            r(0, 1),
        );
        let b = class(&mut db, f, "B", "\\b");
        extends(&mut db, f, b, "\\a");
        let reference = use_ref(&mut db, f, "\\b::$count");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(count));
    }

    #[test]
    fn test_constant_through_interface() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let iface = db.add_symbol(
            f,
            None,
            SymbolKind::Interface,
            SmolStr::new("HasLimit"),
            SmolStr::new("\\haslimit"),
            r(0, 1),
        );
        let limit = db.add_symbol(
            f,
            Some(iface),
            SymbolKind::Constant,
            SmolStr::new("limit"),
            SmolStr::new("\\haslimit::#limit"),
            r(0, 1),
        );
        let c = class(&mut db, f, "C", "\\c");
        let impl_ref = db.add_reference(
            f,
            r(0, 1),
            SmolStr::new("\\haslimit"),
            ReferenceOrigin::Implements,
        );
        db.set_hierarchy(c, None, vec![impl_ref]);
        let reference = use_ref(&mut db, f, "\\c::#limit");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), Some(limit));
    }

    #[test]
    fn test_interface_self_cycle_terminates() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let iface = db.add_symbol(
            f,
            None,
            SymbolKind::Interface,
            SmolStr::new("I"),
            SmolStr::new("\\i"),
            r(0, 1),
        );
        // interface I extends I — malformed input, must not hang.
        let cycle = db.add_reference(f, r(0, 1), SmolStr::new("\\i"), ReferenceOrigin::Extends);
        db.set_hierarchy(iface, None, vec![cycle]);
        let reference = use_ref(&mut db, f, "\\i::m()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), None);
        assert_eq!(find_member(&db, iface, crate::db::MemberKind::Method, "m"), None);
    }

    #[test]
    fn test_extends_cycle_terminates() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        let a = class(&mut db, f, "A", "\\a");
        let b = class(&mut db, f, "B", "\\b");
        extends(&mut db, f, a, "\\b");
        extends(&mut db, f, b, "\\a");
        let reference = use_ref(&mut db, f, "\\a::missing()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), None);
    }

    #[test]
    fn test_member_reference_to_non_class_stays_unresolved() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        db.add_symbol(
            f,
            None,
            SymbolKind::Function,
            SmolStr::new("a"),
            SmolStr::new("\\a"),
            r(0, 1),
        );
        let reference = use_ref(&mut db, f, "\\a::f()");

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(target_of(&db, reference), None);
    }

    #[test]
    fn test_resolution_only_touches_targets() {
        let mut db = Database::new();
        let f = file(&mut db, "a.php");
        class(&mut db, f, "A", "\\a");
        use_ref(&mut db, f, "\\a");
        use_ref(&mut db, f, "\\missing");

        let symbols_before = db.symbol_count();
        let refs_before = db.reference_count();

        resolve_all(&mut db, &ResolveOptions::default());

        assert_eq!(db.symbol_count(), symbols_before);
        assert_eq!(db.reference_count(), refs_before);
        assert_eq!(db.unresolved_count(), 1);
    }
}
