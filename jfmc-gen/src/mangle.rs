//! Name mangling: the `Struct::method` → `Struct_method` convention
//! used end-to-end, from the parser's path-expression synthesis
//! through to the emitted C identifier.

/// Rewrites every `::` in `name` to `_`. Applied to every identifier
/// the emitter writes out, not just ones that look mangled — plain
/// identifiers have no `::` in them and pass through unchanged, and a
/// method reference synthesized by the parser as `Struct::method` or
/// an impl method registered under that same name both come out as
/// `Struct_method`.
pub fn mangle(name: &str) -> String {
    name.replace("::", "_")
}

/// Mangles a struct name and method name directly, for call sites
/// that resolve a method by its parts rather than by an
/// already-synthesized `Struct::method` identifier.
pub fn mangle_method(struct_name: &str, method: &str) -> String {
    format!("{struct_name}_{method}")
}
