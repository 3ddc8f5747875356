//! Typed syntax nodes.
//!
//! The node set is deliberately small: it covers exactly the declaration and
//! use-site forms the collector interprets, plus [`NodeKind::Other`] for
//! everything it merely descends through. Where a construct has named parts,
//! the convention is positional: the first [`NodeKind::Name`] child of a
//! declaration is its name token, the second `Name` child of a use clause is
//! its alias, and so on. Leaf tokens carry their text, which stands in for
//! source-slice extraction on the parser side.

use smol_str::SmolStr;
use text_size::TextRange;

/// Discriminator for syntax nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a parsed file.
    SourceFile,
    /// `namespace Foo\Bar;` — first `Name` child is the (possibly compound)
    /// namespace name; absent for the global namespace form.
    NamespaceDef,
    /// `use …;` statement; children are `UseClause` or `UseGroup` nodes.
    NamespaceUse,
    /// One imported path: first `Name` child is the target, an optional
    /// second `Name` child is the `as` alias.
    UseClause,
    /// `use Foo\{…}`: first `Name` child is the prefix, followed by
    /// `UseClause` children with prefix-relative targets.
    UseGroup,
    /// Class declaration; first `Name` child is the class name token.
    ClassDecl,
    /// Interface declaration; first `Name` child is the interface name token.
    InterfaceDecl,
    /// `extends` clause of a class; contains a single `Name`.
    BaseClause,
    /// `implements` list of a class, or the `extends` list of an interface;
    /// contains one `Name` per listed type.
    InterfaceClause,
    /// Namespace-level function declaration; first `Name` child is the name
    /// token.
    FunctionDecl,
    /// Method declaration inside a class or interface.
    MethodDecl,
    /// `const X = …;` at namespace level; `ConstElement` children.
    ConstDecl,
    /// `const X = …;` inside a class or interface; `ConstElement` children.
    ClassConstDecl,
    /// One constant name token within a const declaration.
    ConstElement,
    /// Function/method parameter; token text is the name without `$`.
    Parameter,
    /// Variable expression; token text is the name without `$`.
    Variable,
    /// A (possibly qualified) name as written in source.
    Name,
    /// Member name token on the right of `::` or `->`.
    MemberName,
    /// `new X(…)`; first `Name` child is the instantiated class.
    New,
    /// Plain call; first `Name` child is the callee.
    Call,
    /// `X::m(…)`; children: class `Name`, `MemberName`, `ArgumentList`.
    ScopedCall,
    /// `X::$p`; children: class `Name`, property `Variable`.
    ScopedProperty,
    /// `X::C` (also covers `X::class`, which the collector skips);
    /// children: class `Name`, `MemberName`.
    ScopedConst,
    /// `$x->m(…)`; children: receiver, `MemberName`, `ArgumentList`.
    MemberCall,
    /// `$x->p`; children: receiver, `MemberName`.
    MemberAccess,
    /// `$x instanceof Y`; the `Name` child is the right-hand operand.
    InstanceOf,
    /// Call argument list.
    ArgumentList,
    /// String literal; token text is the unquoted contents.
    StringLiteral,
    /// Any node the collector has no interest in beyond its children.
    Other,
}

/// A node in the consumed syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub range: TextRange,
    text: Option<SmolStr>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    /// Create an interior node with no token text.
    pub fn new(kind: NodeKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf token carrying its source text.
    pub fn token(kind: NodeKind, range: TextRange, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            range,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Append a child, builder-style.
    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, builder-style.
    pub fn with_children(mut self, children: impl IntoIterator<Item = AstNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Token text, if this is a leaf token.
    pub fn token_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// First child of the given kind.
    pub fn child_of_kind(&self, kind: NodeKind) -> Option<&AstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// `n`-th child of the given kind (0-based).
    pub fn nth_of_kind(&self, kind: NodeKind, n: usize) -> Option<&AstNode> {
        self.children.iter().filter(|c| c.kind == kind).nth(n)
    }

    /// All children of the given kind.
    pub fn children_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &AstNode> {
        self.children.iter().filter(move |c| c.kind == kind)
    }
}
