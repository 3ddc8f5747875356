//! Scope-sensitive name expansion.
//!
//! Pure logic: a syntactic name (possibly aliased, possibly relative) plus
//! the current namespace and the file's active import aliases in, a canonical
//! FQN out. No I/O, no store access.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::db::fqn;

/// The naming context of the collector's current position in a file.
///
/// The alias table is file-scoped: it only matters while expanding names
/// during collection and is discarded with the scope.
#[derive(Debug)]
pub struct NameScope {
    /// FQN of the current namespace.
    namespace: SmolStr,
    /// Lower-cased alias → absolute FQN, from `use` declarations seen so far.
    aliases: FxHashMap<SmolStr, SmolStr>,
    /// FQN of the innermost enclosing class or interface.
    class: Option<SmolStr>,
    /// Expansion target of `parent`: the enclosing class's `extends` FQN.
    class_extends: Option<SmolStr>,
}

impl NameScope {
    /// A fresh scope in the root namespace with no aliases.
    pub fn new() -> Self {
        Self {
            namespace: SmolStr::new_static(fqn::ROOT),
            aliases: FxHashMap::default(),
            class: None,
            class_extends: None,
        }
    }

    /// FQN of the current namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Switch to the namespace declared with `name` (empty for the root).
    pub fn enter_namespace(&mut self, name: &str) {
        self.namespace = fqn::namespace_fqn(name);
    }

    /// Register an import alias. `target` may be written with or without a
    /// leading separator; it is stored absolute and lower-cased.
    pub fn add_alias(&mut self, alias: &str, target: &str) {
        let target = target.trim();
        let absolute = if target.starts_with(fqn::NS_SEP) {
            target.to_lowercase()
        } else {
            format!("{}{}", fqn::NS_SEP, target.to_lowercase())
        };
        self.aliases
            .insert(SmolStr::from(alias.to_lowercase()), SmolStr::from(absolute));
    }

    /// Enter a class or interface body.
    pub fn set_class(&mut self, class: SmolStr, extends: Option<SmolStr>) {
        self.class = Some(class);
        self.class_extends = extends;
    }

    /// FQN of the innermost enclosing class or interface, if any.
    pub fn class_fqn(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Snapshot of the class context, for save/restore around nested scopes.
    pub fn save_class(&self) -> (Option<SmolStr>, Option<SmolStr>) {
        (self.class.clone(), self.class_extends.clone())
    }

    /// Restore a class context snapshot.
    pub fn restore_class(&mut self, saved: (Option<SmolStr>, Option<SmolStr>)) {
        self.class = saved.0;
        self.class_extends = saved.1;
    }

    /// Expand a syntactic name to a canonical FQN.
    ///
    /// Returns `None` when the name cannot denote anything — empty input, or
    /// `parent` in a class without an `extends` clause (the reference is
    /// dropped, not an error).
    pub fn expand(&self, raw: &str) -> Option<SmolStr> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let lower = raw.to_lowercase();

        match lower.as_str() {
            "self" | "static" => return self.class.clone(),
            "parent" => return self.class_extends.clone(),
            _ => {}
        }

        // Already absolute.
        if lower.starts_with(fqn::NS_SEP) {
            return Some(SmolStr::from(lower));
        }

        // Alias substitution on the first segment.
        let (first, rest) = match lower.find(fqn::NS_SEP) {
            Some(i) => (&lower[..i], Some(&lower[i + 1..])),
            None => (lower.as_str(), None),
        };
        if let Some(target) = self.aliases.get(first) {
            return Some(match rest {
                Some(rest) => SmolStr::from(format!("{}{}{}", target, fqn::NS_SEP, rest)),
                None => target.clone(),
            });
        }

        // Relative to the current namespace.
        Some(fqn::class_fqn(&self.namespace, &lower))
    }
}

impl Default for NameScope {
    fn default() -> Self {
        Self::new()
    }
}
