//! The AST walker.
//!
//! One pre-order pass over a file's tree, maintaining the scope stack
//! (namespace → class/interface → function/method) and a per-scope local
//! variable table. Output is pure per-file data with file-local parent
//! indices; the store assigns global ids when the batch is applied, so any
//! number of files can be collected concurrently.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use crate::db::fqn;
use crate::db::{ReferenceOrigin, SymbolKind};
use crate::syntax::{AstNode, NodeKind, SourceTree};

use super::names::NameScope;

/// A symbol awaiting insertion; `parent`, `extends` and `interfaces` are
/// indices into the owning [`CollectOutput`].
#[derive(Clone, Debug)]
pub struct PendingSymbol {
    pub parent: Option<usize>,
    pub kind: SymbolKind,
    pub name: SmolStr,
    pub fqn: SmolStr,
    pub range: TextRange,
    /// Index into `CollectOutput::references`.
    pub extends: Option<usize>,
    /// Indices into `CollectOutput::references`.
    pub interfaces: Vec<usize>,
}

/// A reference awaiting insertion.
#[derive(Clone, Debug)]
pub struct PendingRef {
    pub range: TextRange,
    pub target_fqn: SmolStr,
    pub origin: ReferenceOrigin,
}

/// Everything one file contributes to the index.
#[derive(Debug, Default)]
pub struct CollectOutput {
    pub symbols: Vec<PendingSymbol>,
    pub references: Vec<PendingRef>,
}

/// Collect one file's symbols and references.
pub fn collect(tree: &SourceTree) -> CollectOutput {
    let mut collector = Collector::new();
    collector.walk(&tree.root);
    collector.out
}

struct Collector {
    out: CollectOutput,
    scope: NameScope,
    /// Namespace FQN → local symbol index; namespaces may be reopened within
    /// a file and reuse their row.
    namespaces: FxHashMap<SmolStr, usize>,
    current_namespace: Option<usize>,
    current_class: Option<usize>,
    current_function: Option<usize>,
    /// Stack of local-variable tables; the top frame is the innermost scope.
    locals: Vec<FxHashMap<SmolStr, usize>>,
}

impl Collector {
    fn new() -> Self {
        Self {
            out: CollectOutput::default(),
            scope: NameScope::new(),
            namespaces: FxHashMap::default(),
            current_namespace: None,
            current_class: None,
            current_function: None,
            locals: vec![FxHashMap::default()],
        }
    }

    fn walk(&mut self, node: &AstNode) {
        use NodeKind::*;

        // Class/interface and function bodies save and restore the scope
        // state around their subtree; namespace statements deliberately
        // persist past their node.
        let saved = matches!(node.kind, ClassDecl | InterfaceDecl | FunctionDecl | MethodDecl)
            .then(|| {
                (
                    self.current_class,
                    self.current_function,
                    self.locals.len(),
                    self.scope.save_class(),
                )
            });

        if self.visit(node) {
            for child in &node.children {
                self.walk(child);
            }
        }

        if let Some((class, function, depth, class_scope)) = saved {
            self.current_class = class;
            self.current_function = function;
            self.locals.truncate(depth);
            self.scope.restore_class(class_scope);
        }
    }

    /// Handle one node. Returns whether to descend into its children.
    fn visit(&mut self, node: &AstNode) -> bool {
        use NodeKind::*;
        match node.kind {
            NamespaceDef => {
                let (name, range) = match node.child_of_kind(Name) {
                    Some(n) => (n.token_text().unwrap_or(""), n.range),
                    None => ("", node.range),
                };
                self.declare_namespace(name, range);
                self.scope.enter_namespace(name);
                true
            }
            NamespaceUse => {
                for clause in node.children_of_kind(UseClause) {
                    self.add_use_clause(clause, None);
                }
                for group in node.children_of_kind(UseGroup) {
                    let prefix = group.child_of_kind(Name).and_then(|n| n.token_text());
                    for clause in group.children_of_kind(UseClause) {
                        self.add_use_clause(clause, prefix);
                    }
                }
                false
            }
            ClassDecl => self.visit_class_like(node, SymbolKind::Class),
            InterfaceDecl => self.visit_class_like(node, SymbolKind::Interface),
            FunctionDecl => {
                let Some((name, range)) = name_token(node) else {
                    return true;
                };
                let ns = self.ensure_namespace();
                let ns_fqn = self.out.symbols[ns].fqn.clone();
                let idx = self.push_symbol(
                    Some(ns),
                    SymbolKind::Function,
                    &name,
                    fqn::function_fqn(&ns_fqn, &name),
                    range,
                );
                self.current_function = Some(idx);
                self.locals.push(FxHashMap::default());
                true
            }
            MethodDecl => {
                let Some(class) = self.current_class else {
                    return true;
                };
                let Some((name, range)) = name_token(node) else {
                    return true;
                };
                let class_fqn = self.out.symbols[class].fqn.clone();
                let idx = self.push_symbol(
                    Some(class),
                    SymbolKind::Function,
                    &name,
                    fqn::method_fqn(&class_fqn, &name),
                    range,
                );
                self.current_function = Some(idx);
                self.locals.push(FxHashMap::default());
                true
            }
            ConstDecl => {
                let ns = self.ensure_namespace();
                let ns_fqn = self.out.symbols[ns].fqn.clone();
                for el in node.children_of_kind(ConstElement) {
                    if let Some(name) = el.token_text() {
                        self.push_symbol(
                            Some(ns),
                            SymbolKind::Constant,
                            name,
                            fqn::free_const_fqn(&ns_fqn, name),
                            el.range,
                        );
                    }
                }
                true
            }
            ClassConstDecl => {
                let Some(class) = self.current_class else {
                    return true;
                };
                let class_fqn = self.out.symbols[class].fqn.clone();
                for el in node.children_of_kind(ConstElement) {
                    if let Some(name) = el.token_text() {
                        self.push_symbol(
                            Some(class),
                            SymbolKind::Constant,
                            name,
                            fqn::class_const_fqn(&class_fqn, name),
                            el.range,
                        );
                    }
                }
                true
            }
            Parameter => {
                if let (Some(function), Some(name)) = (self.current_function, node.token_text()) {
                    if !self.top_locals().contains_key(name) {
                        let fn_fqn = self.out.symbols[function].fqn.clone();
                        let idx = self.push_symbol(
                            Some(function),
                            SymbolKind::Variable,
                            name,
                            fqn::local_var_fqn(&fn_fqn, name),
                            node.range,
                        );
                        self.top_locals().insert(SmolStr::new(name), idx);
                    }
                }
                true
            }
            Variable => {
                self.visit_variable(node);
                true
            }
            New => {
                self.name_reference(node.child_of_kind(Name));
                true
            }
            Call => {
                self.visit_call(node);
                true
            }
            ScopedCall => {
                self.scoped_member_reference(node, |class, member| {
                    fqn::method_fqn(&class, &member)
                });
                true
            }
            ScopedConst => {
                // `X::class` is a class-name constant expression, not a
                // member reference.
                let is_class_expr = node
                    .child_of_kind(MemberName)
                    .and_then(|n| n.token_text())
                    .is_some_and(|m| m.eq_ignore_ascii_case("class"));
                if !is_class_expr {
                    self.scoped_member_reference(node, |class, member| {
                        fqn::class_const_fqn(&class, &member)
                    });
                }
                true
            }
            ScopedProperty => {
                if let (Some(cn), Some(prop)) =
                    (node.child_of_kind(Name), node.child_of_kind(Variable))
                {
                    if let (Some(raw), Some(name)) = (cn.token_text(), prop.token_text()) {
                        if let Some(class) = self.scope.expand(raw) {
                            self.push_ref(
                                prop.range,
                                fqn::field_fqn(&class, name),
                                ReferenceOrigin::Use,
                            );
                        }
                    }
                }
                // The property token must not be mistaken for a local.
                false
            }
            MemberCall => {
                self.this_member_reference(node, |class, member| fqn::method_fqn(&class, &member));
                true
            }
            MemberAccess => {
                self.this_member_reference(node, |class, member| fqn::field_fqn(&class, &member));
                true
            }
            InstanceOf => {
                self.name_reference(node.child_of_kind(Name));
                true
            }
            _ => true,
        }
    }

    fn visit_class_like(&mut self, node: &AstNode, kind: SymbolKind) -> bool {
        use NodeKind::*;
        let Some((name, range)) = name_token(node) else {
            return true;
        };
        let ns = self.ensure_namespace();
        let ns_fqn = self.out.symbols[ns].fqn.clone();
        let class_fqn = fqn::class_fqn(&ns_fqn, &name);
        let idx = self.push_symbol(Some(ns), kind, &name, class_fqn.clone(), range);
        self.current_class = Some(idx);
        self.locals.push(FxHashMap::default());

        // extends (classes only — single inheritance)
        let mut extends_target = None;
        if kind == SymbolKind::Class {
            if let Some(n) = node
                .child_of_kind(BaseClause)
                .and_then(|b| b.child_of_kind(Name))
            {
                if let Some(target) = n.token_text().and_then(|raw| self.scope.expand(raw)) {
                    let r = self.push_ref(n.range, target.clone(), ReferenceOrigin::Extends);
                    self.out.symbols[idx].extends = Some(r);
                    extends_target = Some(target);
                }
            }
        }

        // implements list of a class, extends list of an interface
        let origin = if kind == SymbolKind::Class {
            ReferenceOrigin::Implements
        } else {
            ReferenceOrigin::Extends
        };
        if let Some(clause) = node.child_of_kind(InterfaceClause) {
            for n in clause.children_of_kind(Name) {
                if let Some(target) = n.token_text().and_then(|raw| self.scope.expand(raw)) {
                    let r = self.push_ref(n.range, target, origin);
                    self.out.symbols[idx].interfaces.push(r);
                }
            }
        }

        self.scope.set_class(class_fqn, extends_target);
        true
    }

    fn visit_variable(&mut self, node: &AstNode) {
        let Some(name) = node.token_text() else {
            return;
        };
        if let Some(&idx) = self.top_locals().get(name) {
            let target = self.out.symbols[idx].fqn.clone();
            self.push_ref(node.range, target, ReferenceOrigin::Use);
            return;
        }

        // First occurrence in the innermost scope: function, else class,
        // else namespace.
        let (owner, var_fqn) = if let Some(function) = self.current_function {
            let owner_fqn = self.out.symbols[function].fqn.clone();
            (function, fqn::local_var_fqn(&owner_fqn, name))
        } else if let Some(class) = self.current_class {
            let owner_fqn = self.out.symbols[class].fqn.clone();
            (class, fqn::field_fqn(&owner_fqn, name))
        } else {
            let ns = self.ensure_namespace();
            let owner_fqn = self.out.symbols[ns].fqn.clone();
            (ns, fqn::local_var_fqn(&owner_fqn, name))
        };
        let idx = self.push_symbol(Some(owner), SymbolKind::Variable, name, var_fqn, node.range);
        self.top_locals().insert(SmolStr::new(name), idx);
    }

    fn visit_call(&mut self, node: &AstNode) {
        use NodeKind::*;
        let Some(callee) = node.child_of_kind(Name) else {
            return;
        };
        let Some(raw) = callee.token_text() else {
            return;
        };

        if raw.eq_ignore_ascii_case("define") {
            // Constant-definition call form: the literal names a
            // free-standing constant in the current namespace.
            if let Some(lit) = node
                .child_of_kind(ArgumentList)
                .and_then(|args| args.child_of_kind(StringLiteral))
            {
                if let Some(name) = lit.token_text() {
                    let ns = self.ensure_namespace();
                    let ns_fqn = self.out.symbols[ns].fqn.clone();
                    self.push_symbol(
                        Some(ns),
                        SymbolKind::Constant,
                        name,
                        fqn::free_const_fqn(&ns_fqn, name),
                        lit.range,
                    );
                }
            }
            return;
        }

        if let Some(target) = self.scope.expand(raw) {
            self.push_ref(
                callee.range,
                SmolStr::from(format!("{}()", target)),
                ReferenceOrigin::Use,
            );
        }
    }

    /// `X::member` forms: expand the class part, build the member FQN.
    fn scoped_member_reference(
        &mut self,
        node: &AstNode,
        make_fqn: impl FnOnce(SmolStr, String) -> SmolStr,
    ) {
        use NodeKind::*;
        if let (Some(cn), Some(mn)) = (node.child_of_kind(Name), node.child_of_kind(MemberName)) {
            if let (Some(raw), Some(member)) = (cn.token_text(), mn.token_text()) {
                if let Some(class) = self.scope.expand(raw) {
                    let target = make_fqn(class, member.to_string());
                    self.push_ref(mn.range, target, ReferenceOrigin::Use);
                }
            }
        }
    }

    /// `$this->member` forms inside a class body.
    fn this_member_reference(
        &mut self,
        node: &AstNode,
        make_fqn: impl FnOnce(SmolStr, String) -> SmolStr,
    ) {
        use NodeKind::*;
        let Some(class) = self.scope.class_fqn().map(SmolStr::from) else {
            return;
        };
        let receiver_is_this = node
            .children
            .first()
            .is_some_and(|r| r.kind == Variable && r.token_text() == Some("this"));
        if !receiver_is_this {
            return;
        }
        if let Some(member) = node
            .child_of_kind(MemberName)
            .and_then(|n| n.token_text().map(|m| (n.range, m.to_string())))
        {
            let (range, member) = member;
            let target = make_fqn(class, member);
            self.push_ref(range, target, ReferenceOrigin::Use);
        }
    }

    fn name_reference(&mut self, name: Option<&AstNode>) {
        if let Some(n) = name {
            if let Some(target) = n.token_text().and_then(|raw| self.scope.expand(raw)) {
                self.push_ref(n.range, target, ReferenceOrigin::Use);
            }
        }
    }

    fn add_use_clause(&mut self, clause: &AstNode, prefix: Option<&str>) {
        use NodeKind::*;
        let Some(target) = clause.nth_of_kind(Name, 0).and_then(|n| n.token_text()) else {
            return;
        };
        let target = match prefix {
            Some(p) => format!(
                "{}{}{}",
                p.trim_matches(fqn::NS_SEP),
                fqn::NS_SEP,
                target.trim_start_matches(fqn::NS_SEP)
            ),
            None => target.to_string(),
        };
        let alias = clause
            .nth_of_kind(Name, 1)
            .and_then(|n| n.token_text())
            .unwrap_or_else(|| target.rsplit(fqn::NS_SEP).next().unwrap_or(&target));
        self.scope.add_alias(alias, &target);
    }

    fn declare_namespace(&mut self, name: &str, range: TextRange) -> usize {
        let ns_fqn = fqn::namespace_fqn(name);
        if let Some(&idx) = self.namespaces.get(&ns_fqn) {
            self.current_namespace = Some(idx);
            return idx;
        }
        let idx = self.push_symbol(None, SymbolKind::Namespace, name, ns_fqn.clone(), range);
        self.namespaces.insert(ns_fqn, idx);
        self.current_namespace = Some(idx);
        idx
    }

    fn ensure_namespace(&mut self) -> usize {
        match self.current_namespace {
            Some(idx) => idx,
            None => self.declare_namespace("", TextRange::empty(TextSize::from(0))),
        }
    }

    fn top_locals(&mut self) -> &mut FxHashMap<SmolStr, usize> {
        // The stack always holds at least the file-level frame.
        self.locals.last_mut().expect("local scope stack is empty")
    }

    fn push_symbol(
        &mut self,
        parent: Option<usize>,
        kind: SymbolKind,
        name: &str,
        fqn: SmolStr,
        range: TextRange,
    ) -> usize {
        self.out.symbols.push(PendingSymbol {
            parent,
            kind,
            name: SmolStr::new(name),
            fqn,
            range,
            extends: None,
            interfaces: Vec::new(),
        });
        self.out.symbols.len() - 1
    }

    fn push_ref(&mut self, range: TextRange, target_fqn: SmolStr, origin: ReferenceOrigin) -> usize {
        self.out.references.push(PendingRef {
            range,
            target_fqn,
            origin,
        });
        self.out.references.len() - 1
    }
}

fn name_token(node: &AstNode) -> Option<(SmolStr, TextRange)> {
    let n = node.child_of_kind(NodeKind::Name)?;
    let text = n.token_text()?;
    if text.is_empty() {
        return None;
    }
    Some((SmolStr::new(text), n.range))
}
