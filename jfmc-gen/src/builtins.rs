//! Built-in call specialization: `println`, `print`, `sqrt`.
//!
//! The checker already validated arity and, for `sqrt`, numeric-ness;
//! this module only has to pick the right `printf` conversion for the
//! sole argument's static type, or lower a `sqrt` call.

use jfmc_ast::Type;

/// Lowers `println`/`print` given the already-emitted argument text
/// and its static type (`None` for the zero-argument `println` case).
/// `newline` appends `\n` to the format string for `println`.
pub fn lower_print_call(arg: Option<(&str, &Type)>, newline: bool) -> String {
    let nl = if newline { "\\n" } else { "" };
    match arg {
        None => format!("printf(\"{nl}\")"),
        Some((text, ty)) => match ty {
            Type::Str => format!("printf(\"%s{nl}\", {text})"),
            Type::Bool => format!("printf(\"%s{nl}\", ({text}) ? \"true\" : \"false\")"),
            Type::Char => format!("printf(\"%c{nl}\", {text})"),
            Type::F32 | Type::F64 => format!("printf(\"%f{nl}\", {text})"),
            t if t.is_integral() && t.is_signed() => {
                format!("printf(\"%lld{nl}\", (long long){text})")
            }
            t if t.is_integral() => format!("printf(\"%llu{nl}\", (unsigned long long){text})"),
            _ => format!("printf(\"%s{nl}\", {text})"),
        },
    }
}

/// Lowers a `sqrt` call. The argument is cast to `double` unless its
/// static type is already `F32`/`F64`, making the conversion explicit
/// rather than leaning on C's implicit numeric conversion.
pub fn lower_sqrt_call(arg_text: &str, arg_ty: &Type) -> String {
    if matches!(arg_ty, Type::F32 | Type::F64) {
        format!("sqrt({arg_text})")
    } else {
        format!("sqrt((double)({arg_text}))")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn println_with_no_args_prints_just_a_newline() {
        assert_eq!(lower_print_call(None, true), "printf(\"\\n\")");
    }

    #[test]
    fn println_signed_integer_casts_to_long_long() {
        assert_eq!(
            lower_print_call(Some(("n", &Type::I64)), true),
            "printf(\"%lld\\n\", (long long)n)"
        );
    }

    #[test]
    fn println_unsigned_integer_casts_to_unsigned_long_long() {
        assert_eq!(
            lower_print_call(Some(("n", &Type::U32)), true),
            "printf(\"%llu\\n\", (unsigned long long)n)"
        );
    }

    #[test]
    fn print_bool_uses_ternary_string() {
        assert_eq!(
            lower_print_call(Some(("flag", &Type::Bool)), false),
            "printf(\"%s\", (flag) ? \"true\" : \"false\")"
        );
    }

    #[test]
    fn print_string_uses_percent_s() {
        assert_eq!(
            lower_print_call(Some(("s", &Type::Str)), false),
            "printf(\"%s\", s)"
        );
    }

    #[test]
    fn sqrt_of_integral_argument_casts_to_double() {
        assert_eq!(lower_sqrt_call("n", &Type::I32), "sqrt((double)(n))");
    }

    #[test]
    fn sqrt_of_float_argument_is_passed_through() {
        assert_eq!(lower_sqrt_call("x", &Type::F64), "sqrt(x)");
    }
}
