//! Edge case and property-based tests for the parser, kept separate
//! from the per-function unit tests colocated in `expr.rs`/`stmt.rs`/
//! `item.rs` themselves (mirroring `jfmc-lex`'s own `edge_cases.rs`
//! split).

use jfmc_util::Handler;
use proptest::prelude::*;

use crate::parse_program;

/// Parses `source` twice, independently, and returns each resulting
/// `Program`'s debug representation. AST nodes don't derive
/// `PartialEq` (their `Expr` annotation cache is a `RefCell`, which
/// would make a derived `Eq` awkward without a meaning), so the debug
/// tree is the structural-equality proxy used here.
fn parse_twice(source: &str) -> (String, String) {
    let first_handler = Handler::new();
    let first_tokens = jfmc_lex::scan(source, "t.jfm", &first_handler);
    let first = parse_program(first_tokens, source, "t.jfm", &first_handler);

    let second_handler = Handler::new();
    let second_tokens = jfmc_lex::scan(source, "t.jfm", &second_handler);
    let second = parse_program(second_tokens, source, "t.jfm", &second_handler);

    (format!("{first:#?}"), format!("{second:#?}"))
}

#[test]
fn empty_source_parses_to_an_empty_program() {
    let (a, b) = parse_twice("");
    assert_eq!(a, b);
}

#[test]
fn parsing_the_same_source_twice_yields_the_same_debug_tree() {
    let (a, b) = parse_twice("fn main() -> i32 { let x: i32 = 1; return x + 2; }");
    assert_eq!(a, b);
}

fn arith_leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i32..1000).prop_map(|n| n.to_string()),
        Just("x".to_string()),
        Just("y".to_string()),
    ]
}

/// A small recursive grammar of parenthesized binary arithmetic
/// expressions over `x`, `y`, and integer literals — enough shape
/// variety to exercise precedence-climbing recursion without needing a
/// full grammar-aware generator.
fn arith_expr() -> impl Strategy<Value = String> {
    arith_leaf().prop_recursive(4, 64, 4, |inner| {
        (inner.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")], inner)
            .prop_map(|(l, op, r)| format!("({l} {op} {r})"))
    })
}

proptest! {
    /// Parser determinism: parsing the same byte sequence twice yields
    /// structurally equal ASTs.
    #[test]
    fn parser_determinism_over_arithmetic_function_bodies(expr in arith_expr()) {
        let source = format!("fn f(x: i32, y: i32) -> i32 {{ return {expr}; }}");
        let (a, b) = parse_twice(&source);
        prop_assert_eq!(a, b);
    }
}
