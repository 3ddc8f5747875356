//! Symbol rows.

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{FileId, ReferenceId, SymbolId};

/// What a symbol is.
///
/// One tagged enum; methods are `Function` symbols whose parent is a class or
/// interface, fields are `Variable` symbols whose parent is a class. The
/// context lives in the parent chain, not in the kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Function,
    Variable,
    Constant,
}

impl SymbolKind {
    /// Whether a symbol of this kind can own members.
    pub fn is_class_like(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Interface)
    }

    /// Human-readable kind name.
    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::Namespace => "namespace",
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Constant => "constant",
        }
    }
}

/// A declared named entity.
///
/// Rows form a forest: `parent` is the lexically enclosing symbol within the
/// same file (namespace → class/interface → function), `children` the inverse
/// edge. Cross-file namespace unification happens through the FQN index, not
/// through parent links.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "persist", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub id: SymbolId,
    pub parent: Option<SymbolId>,
    pub kind: SymbolKind,
    /// Unqualified name, case as written.
    pub name: SmolStr,
    /// Canonical lower-cased FQN.
    pub fqn: SmolStr,
    pub file: FileId,
    /// Range of the name token, not the whole declaration.
    pub range: TextRange,
    /// The `extends` clause reference (classes only — single inheritance).
    pub extends: Option<ReferenceId>,
    /// `implements` references of a class, or the `extends` references of an
    /// interface.
    pub interfaces: Vec<ReferenceId>,
    pub children: Vec<SymbolId>,
}

impl Symbol {
    /// Hover description, fenced as PHP source.
    pub fn description(&self) -> String {
        match self.kind {
            SymbolKind::Class => format!("<?php\nclass {}", self.fqn),
            SymbolKind::Interface => format!("<?php\ninterface {}", self.fqn),
            SymbolKind::Constant => format!("<?php\nconst {}", self.fqn),
            _ => format!("<?php\n//{}", self.fqn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_class_like() {
        assert!(SymbolKind::Class.is_class_like());
        assert!(SymbolKind::Interface.is_class_like());
        assert!(!SymbolKind::Function.is_class_like());
        assert!(!SymbolKind::Namespace.is_class_like());
    }

    #[test]
    fn test_description() {
        let sym = Symbol {
            id: SymbolId::new(0),
            parent: None,
            kind: SymbolKind::Class,
            name: SmolStr::new("Car"),
            fqn: SmolStr::new("\\app\\car"),
            file: FileId::new(0),
            range: TextRange::empty(text_size::TextSize::from(0)),
            extends: None,
            interfaces: Vec::new(),
            children: Vec::new(),
        };
        assert_eq!(sym.description(), "<?php\nclass \\app\\car");
    }
}
