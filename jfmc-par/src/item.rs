//! Top-level declaration parsing: `include`, `extern`, `fn`, `struct`,
//! `impl`, and the bare top-level `let` the grammar also permits.
//! Everything else at the top level falls through to
//! [`parse_top_level_stmt`].

use jfmc_ast::{
    ExternFunctionItem, FieldDecl, FunctionItem, ImplItem, IncludeItem, Item, Param, StructItem,
};
use jfmc_lex::TokenKind;
use jfmc_util::Symbol;

use crate::parser::{Parser, MAX_LIST_ITEMS};
use crate::stmt::{parse_block, parse_top_level_stmt};
use crate::types::parse_type;

pub fn parse_item(p: &mut Parser) -> Option<Item> {
    let item = match p.current_kind() {
        TokenKind::Include => parse_include(p).map(Item::Include),
        TokenKind::Extern => parse_extern(p),
        TokenKind::Fn => parse_function(p).map(Item::Function),
        TokenKind::Struct => parse_struct(p, false).map(Item::Struct),
        TokenKind::Impl => parse_impl(p).map(Item::Impl),
        // A bare top-level expression statement's trailing `;` is
        // optional; `parse_top_level_stmt` still
        // dispatches to every other statement form (`let`, `if`, ...)
        // exactly as `parse_stmt` does, for the grammar's bare
        // top-level `let` and friends.
        _ => parse_top_level_stmt(p).map(Item::Stmt),
    };

    if item.is_none() && p.in_panic() {
        p.synchronize();
    }
    item
}

fn parse_include(p: &mut Parser) -> Option<IncludeItem> {
    let loc = p.current_loc();
    p.advance(); // 'include'
    p.expect(TokenKind::LParen, "'(' after 'include'")?;
    let path_tok = p.expect(TokenKind::StrLiteral, "string literal for include path")?;
    let lexeme = p.lexeme(&path_tok);
    // The lexeme still carries its surrounding quotes; strip them to
    // get the bare path the emitter wraps in `<...>`.
    let path = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
        .to_string();
    p.expect(TokenKind::RParen, "')' after include path")?;
    p.expect(TokenKind::Semicolon, "';' after include statement")?;
    Some(IncludeItem { path, loc })
}

/// `extern fn ...;` or `extern struct Name;`.
fn parse_extern(p: &mut Parser) -> Option<Item> {
    p.advance(); // 'extern'
    if p.check(TokenKind::Struct) {
        p.advance();
        return parse_struct(p, true).map(Item::Struct);
    }
    parse_extern_function(p).map(Item::ExternFunction)
}

fn parse_params(p: &mut Parser) -> Option<Vec<Param>> {
    p.expect(TokenKind::LParen, "'(' after function name")?;
    let mut params = Vec::new();

    if !p.check(TokenKind::RParen) {
        let mut guard = 0;
        loop {
            guard += 1;
            if guard > MAX_LIST_ITEMS {
                p.error("too many parameters");
                break;
            }

            let loc = p.current_loc();
            let is_mutable = p.match_kind(TokenKind::Mut);
            let name_tok = p.expect(TokenKind::Identifier, "parameter name")?;
            let name = Symbol::intern(p.lexeme(&name_tok));
            p.expect(TokenKind::Colon, "':' after parameter name")?;
            let ty = parse_type(p)?;
            params.push(Param { name, ty, is_mutable, loc });

            if !p.match_kind(TokenKind::Comma) {
                break;
            }
        }
    }

    p.expect(TokenKind::RParen, "')' after parameters")?;
    Some(params)
}

/// Shared by `fn` and `extern fn`: `-> Type` is optional and defaults
/// to `Type::Void` when absent.
fn parse_return_type(p: &mut Parser) -> Option<jfmc_ast::Type> {
    if p.match_kind(TokenKind::Arrow) {
        parse_type(p)
    } else {
        Some(jfmc_ast::Type::Void)
    }
}

fn parse_function(p: &mut Parser) -> Option<FunctionItem> {
    let loc = p.current_loc();
    p.advance(); // 'fn'
    let name_tok = p.expect(TokenKind::Identifier, "function name")?;
    let name = Symbol::intern(p.lexeme(&name_tok));
    let params = parse_params(p)?;
    let return_type = parse_return_type(p)?;
    let body = parse_block(p)?;
    Some(FunctionItem { name, params, return_type, body, loc })
}

fn parse_extern_function(p: &mut Parser) -> Option<ExternFunctionItem> {
    let loc = p.current_loc();
    p.expect(TokenKind::Fn, "'fn' or 'struct' after 'extern'")?;
    let name_tok = p.expect(TokenKind::Identifier, "function name")?;
    let name = Symbol::intern(p.lexeme(&name_tok));
    let params = parse_params(p)?;
    let return_type = parse_return_type(p)?;
    p.expect(TokenKind::Semicolon, "';' after extern function declaration")?;
    Some(ExternFunctionItem { name, params, return_type, loc })
}

fn parse_struct(p: &mut Parser, is_extern: bool) -> Option<StructItem> {
    let loc = p.current_loc();
    if !is_extern {
        p.advance(); // 'struct'
    }
    let name_tok = p.expect(TokenKind::Identifier, "struct name")?;
    let name = Symbol::intern(p.lexeme(&name_tok));

    if is_extern {
        p.expect(TokenKind::Semicolon, "';' after extern struct declaration")?;
        return Some(StructItem { name, fields: Vec::new(), is_extern: true, loc });
    }

    p.expect(TokenKind::LBrace, "'{' after struct name")?;
    let mut fields = Vec::new();
    let mut guard = 0;

    while !p.check(TokenKind::RBrace) && !p.is_at_end() {
        guard += 1;
        if guard > MAX_LIST_ITEMS {
            p.error("too many struct fields or parser stuck in loop");
            break;
        }

        let field_loc = p.current_loc();
        let field_name_tok = match p.expect(TokenKind::Identifier, "field name") {
            Some(tok) => tok,
            None => break,
        };
        let field_name = Symbol::intern(p.lexeme(&field_name_tok));
        if p.expect(TokenKind::Colon, "':' after field name").is_none() {
            break;
        }
        let ty = match parse_type(p) {
            Some(ty) => ty,
            None => break,
        };
        fields.push(FieldDecl { name: field_name, ty, loc: field_loc });

        if !p.match_kind(TokenKind::Comma) {
            break;
        }
    }

    p.expect(TokenKind::RBrace, "'}' after struct fields")?;
    Some(StructItem { name, fields, is_extern: false, loc })
}

/// `impl Name { fn ... fn ... }` — only method declarations are
/// permitted inside; anything else is an error that synchronizes
/// rather than aborting the whole impl block.
fn parse_impl(p: &mut Parser) -> Option<ImplItem> {
    let loc = p.current_loc();
    p.advance(); // 'impl'
    let name_tok = p.expect(TokenKind::Identifier, "struct name after 'impl'")?;
    let struct_name = Symbol::intern(p.lexeme(&name_tok));
    p.expect(TokenKind::LBrace, "'{' after struct name")?;

    let mut methods = Vec::new();
    let mut guard = 0;

    while !p.check(TokenKind::RBrace) && !p.is_at_end() {
        guard += 1;
        if guard > MAX_LIST_ITEMS {
            p.error("too many functions in impl block or parser stuck in loop");
            break;
        }

        let before = p.pos();
        if p.check(TokenKind::Fn) {
            if let Some(method) = parse_function(p) {
                methods.push(method);
            }
        } else {
            p.error("expected 'fn' in impl block");
            p.synchronize();
        }

        if p.pos() == before {
            p.advance();
        }
    }

    p.expect(TokenKind::RBrace, "'}' after impl block")?;
    Some(ImplItem { struct_name, methods, loc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfmc_util::Handler;

    fn parse(src: &str) -> Item {
        let handler = Handler::new();
        let tokens = jfmc_lex::scan(src, "t.jfm", &handler);
        let mut p = Parser::new(tokens, src, "t.jfm", &handler);
        let item = parse_item(&mut p).expect("item should parse");
        assert!(!handler.has_errors(), "unexpected diagnostics for `{src}`");
        item
    }

    #[test]
    fn function_without_return_type_defaults_to_void() {
        match parse("fn main() { }") {
            Item::Function(f) => {
                assert_eq!(f.name.as_str(), "main");
                assert!(f.params.is_empty());
                assert_eq!(f.return_type, jfmc_ast::Type::Void);
            }
            _ => panic!("expected function"),
        }
    }

    #[test]
    fn function_with_params_and_return_type() {
        match parse("fn add(a: i32, b: i32) -> i32 { return a + b; }") {
            Item::Function(f) => {
                assert_eq!(f.params.len(), 2);
                assert_eq!(f.return_type, jfmc_ast::Type::I32);
            }
            _ => panic!("expected function"),
        }
    }

    #[test]
    fn struct_with_fields() {
        match parse("struct Point { x: i32, y: i32 }") {
            Item::Struct(s) => {
                assert_eq!(s.fields.len(), 2);
                assert!(!s.is_extern);
            }
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn extern_struct_is_opaque() {
        match parse("extern struct FILE;") {
            Item::Struct(s) => {
                assert!(s.is_extern);
                assert!(s.fields.is_empty());
            }
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn extern_function_has_no_body() {
        match parse("extern fn malloc(size: u64) -> *u8;") {
            Item::ExternFunction(f) => {
                assert_eq!(f.name.as_str(), "malloc");
                assert_eq!(f.return_type, jfmc_ast::Type::pointer(jfmc_ast::Type::U8));
            }
            _ => panic!("expected extern function"),
        }
    }

    #[test]
    fn impl_block_collects_methods() {
        match parse("impl Point { fn len(self: Point) -> i32 { return 0; } }") {
            Item::Impl(i) => {
                assert_eq!(i.struct_name.as_str(), "Point");
                assert_eq!(i.methods.len(), 1);
            }
            _ => panic!("expected impl"),
        }
    }

    #[test]
    fn include_strips_quotes_from_path() {
        match parse("include(\"stdio.h\");") {
            Item::Include(inc) => assert_eq!(inc.path, "stdio.h"),
            _ => panic!("expected include"),
        }
    }

    #[test]
    fn bare_top_level_let_falls_through_to_statement() {
        match parse("let x: i32 = 1;") {
            Item::Stmt(jfmc_ast::Stmt::Let(l)) => assert_eq!(l.name.as_str(), "x"),
            _ => panic!("expected top-level let"),
        }
    }

    #[test]
    fn bare_top_level_call_statement_needs_no_trailing_semicolon() {
        let handler = Handler::new();
        let source = "fn f() -> i32 { return 1; }\nf()";
        let tokens = jfmc_lex::scan(source, "t.jfm", &handler);
        let mut p = Parser::new(tokens, source, "t.jfm", &handler);
        let _ = parse_item(&mut p).expect("function item should parse");
        let second = parse_item(&mut p).expect("trailing call expression should parse");
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        assert!(matches!(second, Item::Stmt(jfmc_ast::Stmt::Expr(_))));
    }
}
