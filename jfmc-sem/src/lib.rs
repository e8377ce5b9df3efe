//! jfmc-sem - name resolution and type-checking over a parsed
//! [`jfmc_ast::Program`].
//!
//! Analysis runs in three top-level passes (struct declarations, impl
//! blocks, then everything else) so a struct or function may be
//! referenced before its textual declaration. Every expression node is annotated
//! in place with its resolved type; diagnostics accumulate on a shared
//! [`jfmc_util::Handler`] rather than aborting at the first one.

mod checker;
mod scope;
mod symbol;
mod table;

#[cfg(test)]
mod edge_cases;

pub use checker::analyze;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use symbol::{Symbol, SymbolExtra, SymbolId, SymbolKind};
pub use table::SymbolTable;
