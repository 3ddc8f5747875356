//! Fully-qualified name construction and dissection.
//!
//! All FQNs are lower-cased on construction; name binding is
//! case-insensitive, and the lookup indices rely on a single canonical
//! casing. The unqualified name keeps its source casing on the symbol row.
//!
//! Shapes, given the FQN `p` of the lexical parent:
//!
//! | kind                         | shape           |
//! |------------------------------|-----------------|
//! | namespace                    | `p\name`        |
//! | class / interface            | `p\name`        |
//! | function (namespace level)   | `p\name()`      |
//! | method                       | `p::name()`     |
//! | field / property             | `p::$name`      |
//! | class constant               | `p::#name`      |
//! | local variable / parameter   | `p$name`        |
//! | free constant                | `p#name`        |
//!
//! The root namespace FQN is the separator alone (`\`).

use smol_str::SmolStr;

/// The namespace separator.
pub const NS_SEP: char = '\\';

/// The member separator.
pub const MEMBER_SEP: &str = "::";

/// FQN of the root namespace.
pub const ROOT: &str = "\\";

/// Member kind recovered from an FQN member-part sigil.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Field,
    Constant,
}

/// Join `name` onto a namespace-like parent FQN with the namespace separator.
///
/// Collapses the doubled separator when the parent is the root namespace, so
/// `join(ROOT, "Foo")` is `\foo`, not `\\foo`.
fn join(parent: &str, name: &str) -> String {
    let name = name.trim_matches(NS_SEP);
    if parent.ends_with(NS_SEP) {
        format!("{}{}", parent, name.to_lowercase())
    } else {
        format!("{}{}{}", parent, NS_SEP, name.to_lowercase())
    }
}

/// FQN of a namespace declared with `name` (possibly compound, e.g.
/// `App\Sub`). An empty name denotes the root namespace.
pub fn namespace_fqn(name: &str) -> SmolStr {
    let name = name.trim_matches(NS_SEP);
    if name.is_empty() {
        SmolStr::new_static(ROOT)
    } else {
        SmolStr::from(join(ROOT, name))
    }
}

/// FQN of a class or interface under namespace `ns`.
pub fn class_fqn(ns: &str, name: &str) -> SmolStr {
    SmolStr::from(join(ns, name))
}

/// FQN of a namespace-level function.
pub fn function_fqn(ns: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}()", join(ns, name)))
}

/// FQN of a method on a class or interface.
pub fn method_fqn(class: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}::{}()", class, name.to_lowercase()))
}

/// FQN of a field / property on a class.
pub fn field_fqn(class: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}::${}", class, name.to_lowercase()))
}

/// FQN of a class or interface constant.
pub fn class_const_fqn(class: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}::#{}", class, name.to_lowercase()))
}

/// FQN of a local variable or parameter owned by `owner` (a function FQN,
/// or a namespace FQN for file-level code).
pub fn local_var_fqn(owner: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}${}", owner, name.to_lowercase()))
}

/// FQN of a free-standing (namespace-level) constant.
pub fn free_const_fqn(ns: &str, name: &str) -> SmolStr {
    SmolStr::from(format!("{}#{}", ns, name.to_lowercase()))
}

/// Whether an FQN denotes a class/interface member.
pub fn is_member(fqn: &str) -> bool {
    fqn.contains(MEMBER_SEP)
}

/// Split a member FQN into its class part and member part.
pub fn split_member(fqn: &str) -> Option<(&str, &str)> {
    let idx = fqn.find(MEMBER_SEP)?;
    Some((&fqn[..idx], &fqn[idx + MEMBER_SEP.len()..]))
}

/// Recover the member kind and bare name from a member part
/// (`$name` → field, `name()` → method, `#name` → constant).
pub fn member_sigil(member: &str) -> (MemberKind, &str) {
    if let Some(bare) = member.strip_prefix('$') {
        (MemberKind::Field, bare)
    } else if let Some(bare) = member.strip_suffix("()") {
        (MemberKind::Method, bare)
    } else if let Some(bare) = member.strip_prefix('#') {
        (MemberKind::Constant, bare)
    } else {
        // No sigil: a bare member part reads as a constant access.
        (MemberKind::Constant, member)
    }
}

/// The root-namespace form of a non-member FQN: `\a\b\c()` → `\c()`.
///
/// Returns `None` when the FQN is already root-level.
pub fn root_form(fqn: &str) -> Option<SmolStr> {
    let idx = fqn.rfind(NS_SEP)?;
    if idx == 0 {
        return None;
    }
    Some(SmolStr::from(format!("{}{}", NS_SEP, &fqn[idx + 1..])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_namespace_fqn() {
        assert_eq!(namespace_fqn(""), ROOT);
        assert_eq!(namespace_fqn("App"), "\\app");
        assert_eq!(namespace_fqn("App\\Sub"), "\\app\\sub");
        assert_eq!(namespace_fqn("\\App\\"), "\\app");
    }

    #[rstest]
    #[case(class_fqn("\\", "Foo"), "\\foo")]
    #[case(class_fqn("\\app", "Foo"), "\\app\\foo")]
    #[case(function_fqn("\\app", "Run"), "\\app\\run()")]
    #[case(function_fqn("\\", "strlen"), "\\strlen()")]
    #[case(method_fqn("\\app\\foo", "Bar"), "\\app\\foo::bar()")]
    #[case(field_fqn("\\app\\foo", "count"), "\\app\\foo::$count")]
    #[case(class_const_fqn("\\app\\foo", "MAX"), "\\app\\foo::#max")]
    #[case(local_var_fqn("\\app\\run()", "x"), "\\app\\run()$x")]
    #[case(free_const_fqn("\\app", "LIMIT"), "\\app#limit")]
    fn test_fqn_shapes(#[case] actual: SmolStr, #[case] expected: &str) {
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_member_split() {
        assert!(is_member("\\a\\b::c()"));
        assert!(!is_member("\\a\\b()"));

        let (class, member) = split_member("\\a\\b::$f").unwrap();
        assert_eq!(class, "\\a\\b");
        assert_eq!(member, "$f");
    }

    #[rstest]
    #[case("$f", MemberKind::Field, "f")]
    #[case("m()", MemberKind::Method, "m")]
    #[case("#c", MemberKind::Constant, "c")]
    #[case("c", MemberKind::Constant, "c")]
    fn test_member_sigil(#[case] member: &str, #[case] kind: MemberKind, #[case] bare: &str) {
        assert_eq!(member_sigil(member), (kind, bare));
    }

    #[test]
    fn test_root_form() {
        assert_eq!(root_form("\\a\\b\\c()").as_deref(), Some("\\c()"));
        assert_eq!(root_form("\\c()"), None);
        assert_eq!(root_form("c()"), None);
    }
}
