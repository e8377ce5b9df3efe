//! jfmc-util - shared infrastructure for the jfmc compiler family.
//!
//! Every other crate in the workspace depends on this one. It carries
//! nothing specific to SL's grammar or type system — only the
//! bookkeeping every stage of a batch compiler needs: source
//! positions, string interning, typed arena indices, and the
//! diagnostic list the compiler threads through lexing, parsing, and
//! semantic analysis.

mod diagnostic;
mod index_vec;
mod span;
mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{Location, SourceFile, SourceMap};
pub use symbol::Symbol;
