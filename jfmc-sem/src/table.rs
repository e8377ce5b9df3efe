//! The symbol table: scope-chain storage for variables/parameters/
//! functions plus a struct registry kept separate from the scope
//! chain so struct types stay resolvable regardless of lexical
//! nesting.

use rustc_hash::FxHashMap;

use jfmc_util::{IndexVec, Symbol as Interned};

use jfmc_ast::Type;

use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::symbol::{Symbol, SymbolId, SymbolKind};

pub struct SymbolTable {
    symbols: IndexVec<SymbolId, Symbol>,
    scopes: ScopeTree,
    types: FxHashMap<Interned, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: IndexVec::new(),
            scopes: ScopeTree::new(),
            types: FxHashMap::default(),
        }
    }

    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeTree {
        &mut self.scopes
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    /// Defines `name` in the current scope. `None` if the name already
    /// exists in that exact scope.
    pub fn define(&mut self, symbol: Symbol) -> Option<SymbolId> {
        let name = symbol.name;
        let id = self.symbols.push(symbol);
        if self.scopes.define(name, id) {
            Some(id)
        } else {
            None
        }
    }

    pub fn lookup(&self, name: Interned) -> Option<&Symbol> {
        self.scopes.lookup(name).map(|id| self.get(id))
    }

    pub fn lookup_current_scope(&self, name: Interned) -> Option<&Symbol> {
        self.scopes.lookup_current_scope(name).map(|id| self.get(id))
    }

    pub fn lookup_function(&self, name: Interned) -> Option<&Symbol> {
        self.lookup(name).filter(|s| s.kind == SymbolKind::Function)
    }

    pub fn lookup_struct(&self, name: Interned) -> Option<&Symbol> {
        self.lookup_type(name).filter(|s| s.kind == SymbolKind::Struct)
    }

    /// Registers a struct symbol in the type registry, independent of
    /// the scope chain. `false` if `name` is already registered.
    pub fn register_type(&mut self, name: Interned, symbol: Symbol) -> bool {
        if self.types.contains_key(&name) {
            return false;
        }
        let id = self.symbols.push(symbol);
        self.types.insert(name, id);
        true
    }

    pub fn lookup_type(&self, name: Interned) -> Option<&Symbol> {
        self.types.get(&name).map(|&id| self.get(id))
    }

    pub fn in_loop(&self) -> bool {
        self.scopes.in_loop()
    }

    pub fn in_function(&self) -> bool {
        self.scopes.in_function()
    }

    pub fn return_type(&self) -> Option<Type> {
        self.scopes.return_type()
    }

    pub fn current_struct(&self) -> Option<Interned> {
        self.scopes.current_struct()
    }

    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scopes.enter_scope(kind)
    }

    pub fn enter_function_scope(&mut self, return_type: Type) -> ScopeId {
        self.scopes.enter_function_scope(return_type)
    }

    pub fn enter_struct_scope(&mut self, name: Interned) -> ScopeId {
        self.scopes.enter_struct_scope(name)
    }

    pub fn exit_scope(&mut self) {
        self.scopes.exit_scope()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
