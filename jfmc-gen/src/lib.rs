//! jfmc-gen - the C emitter: lowers a type-checked
//! [`jfmc_ast::Program`] to a single C11 translation unit.
//!
//! This crate trusts its caller: it does not itself check whether
//! semantic analysis reported any diagnostics. The driver is the one
//! that decides whether to invoke the emitter at all; calling
//! [`emit`] on a program that failed analysis is a driver-level
//! contract violation, not something this crate diagnoses.

mod builtins;
mod codegen;
mod mangle;
mod types;

pub use codegen::emit_program as emit;
pub use mangle::{mangle, mangle_method};
pub use types::{local_declarator, lower_type};
