//! The scope arena: an `IndexVec`-backed tree of nested scopes with a
//! `current` cursor, carrying the return-type/struct-name metadata
//! each scope kind needs (a `Struct` scope records the implementing
//! struct's name so `self` can resolve against it).

use std::collections::HashMap;

use jfmc_util::{define_idx, IndexVec, Symbol};

use jfmc_ast::Type;

use crate::symbol::SymbolId;

define_idx!(pub struct ScopeId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
    Loop,
    Struct,
}

#[derive(Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    bindings: HashMap<Symbol, SymbolId>,
    /// Set on `Function` scopes; the declared return type to check
    /// `return` statements against.
    pub return_type: Option<Type>,
    /// Set on `Struct` scopes (impl bodies); the name `self` resolves
    /// against.
    pub struct_name: Option<Symbol>,
    pub level: usize,
}

impl Scope {
    fn new(parent: Option<ScopeId>, kind: ScopeKind, level: usize) -> Self {
        Self {
            parent,
            kind,
            bindings: HashMap::new(),
            return_type: None,
            struct_name: None,
            level,
        }
    }
}

/// Strictly-nested scope stack: `enter_*` pushes a new scope whose
/// parent is the current one and makes it current; `exit_scope` pops
/// back to the parent. The root (`Global`) scope is never exited:
/// `exit_scope` simply no-ops when there is no parent to return to.
pub struct ScopeTree {
    scopes: IndexVec<ScopeId, Scope>,
    current: ScopeId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut scopes = IndexVec::new();
        let root = scopes.push(Scope::new(None, ScopeKind::Global, 0));
        Self { scopes, current: root }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    fn enter(&mut self, kind: ScopeKind) -> ScopeId {
        let level = self.scopes[self.current].level + 1;
        let id = self.scopes.push(Scope::new(Some(self.current), kind, level));
        self.current = id;
        id
    }

    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.enter(kind)
    }

    pub fn enter_function_scope(&mut self, return_type: Type) -> ScopeId {
        let id = self.enter(ScopeKind::Function);
        self.scopes[id].return_type = Some(return_type);
        id
    }

    pub fn enter_struct_scope(&mut self, struct_name: Symbol) -> ScopeId {
        let id = self.enter(ScopeKind::Struct);
        self.scopes[id].struct_name = Some(struct_name);
        id
    }

    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.current = parent;
        }
    }

    /// Defines `name` in the current scope. Fails (returns `false`)
    /// if the name is already bound in this exact scope — a shadowing
    /// `let` in a nested scope is fine, a redefinition within the same
    /// one is not.
    pub fn define(&mut self, name: Symbol, id: SymbolId) -> bool {
        let scope = &mut self.scopes[self.current];
        if scope.bindings.contains_key(&name) {
            false
        } else {
            scope.bindings.insert(name, id);
            true
        }
    }

    pub fn lookup(&self, name: Symbol) -> Option<SymbolId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if let Some(&sym) = self.scopes[id].bindings.get(&name) {
                return Some(sym);
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    pub fn lookup_current_scope(&self, name: Symbol) -> Option<SymbolId> {
        self.scopes[self.current].bindings.get(&name).copied()
    }

    pub fn in_loop(&self) -> bool {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if self.scopes[id].kind == ScopeKind::Loop {
                return true;
            }
            scope = self.scopes[id].parent;
        }
        false
    }

    pub fn in_function(&self) -> bool {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if self.scopes[id].kind == ScopeKind::Function {
                return true;
            }
            scope = self.scopes[id].parent;
        }
        false
    }

    pub fn return_type(&self) -> Option<Type> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if let Some(ty) = &self.scopes[id].return_type {
                return Some(ty.clone());
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    pub fn current_struct(&self) -> Option<Symbol> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if let Some(name) = self.scopes[id].struct_name {
                return Some(name);
            }
            scope = self.scopes[id].parent;
        }
        None
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
