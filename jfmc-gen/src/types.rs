//! Type lowering: SL's [`jfmc_ast::Type`] tree to C type spelling.
//!
//! Arrays decay to a pointer to their element type everywhere a type
//! is lowered by this module — struct fields, function parameters and
//! return types, cast targets, and the inner type of a pointer or
//! reference. Local `let` declarations are the one place an array
//! keeps its `T name[N]` shape; that's a statement-lowering concern
//! handled in `stmt.rs`, not here.

use jfmc_ast::Type;

/// Lowers a primitive to its C spelling:
/// `i8..u64` to the matching `stdint.h` typedef, `f32/f64` to
/// `float`/`double`, `bool` to `_Bool` (visible as `bool` via
/// `stdbool.h`, but `_Bool` is what the standard actually names),
/// `char` unchanged, `void` unchanged, `str` to `const char*`.
fn lower_primitive(ty: &Type) -> Option<&'static str> {
    Some(match ty {
        Type::I8 => "int8_t",
        Type::I16 => "int16_t",
        Type::I32 => "int32_t",
        Type::I64 => "int64_t",
        Type::U8 => "uint8_t",
        Type::U16 => "uint16_t",
        Type::U32 => "uint32_t",
        Type::U64 => "uint64_t",
        Type::F32 => "float",
        Type::F64 => "double",
        Type::Bool => "_Bool",
        Type::Char => "char",
        Type::Void => "void",
        Type::Str => "const char*",
        _ => return None,
    })
}

/// Lowers any [`Type`] to a C type spelling. `Array` always decays to
/// a pointer to its lowered element type here; callers that need the
/// local-declaration `T name[N]` form build it directly from the
/// element type and size instead of calling this function on the
/// whole array type.
pub fn lower_type(ty: &Type) -> String {
    if let Some(prim) = lower_primitive(ty) {
        return prim.to_string();
    }
    match ty {
        Type::Array { element, .. } => format!("{}*", lower_type(element)),
        Type::Pointer { pointed } => format!("{}*", lower_type(pointed)),
        Type::Reference {
            referenced,
            is_mutable,
        } => {
            let inner = lower_type(referenced);
            if *is_mutable {
                format!("{inner}*")
            } else {
                format!("const {inner}*")
            }
        }
        Type::Struct { name } => name.to_string(),
        _ => unreachable!("lower_primitive already handled every remaining primitive"),
    }
}

/// Builds the C declarator for a local binding of type `ty` named
/// `name`: the ordinary `T name` form, except when `ty` is itself an
/// `Array`, in which case the declared size stays attached to the
/// name as a C array declarator (`T name[N]`) rather than decaying to
/// a pointer.
pub fn local_declarator(ty: &Type, name: &str) -> String {
    match ty {
        Type::Array { element, size } => format!("{} {name}[{size}]", lower_type(element)),
        _ => format!("{} {name}", lower_type(ty)),
    }
}
