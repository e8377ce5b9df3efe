//! Statement parsing: `let`, the control-flow forms, `break`/`continue`/
//! `return`, bare blocks, and expression statements.

use jfmc_ast::{
    Block, ElseBranch, ForStmt, IfStmt, LetStmt, LoopStmt, ReturnStmt, Stmt, WhileStmt,
};
use jfmc_lex::TokenKind;
use jfmc_util::Symbol;

use crate::expr::parse_expr;
use crate::parser::{Parser, MAX_LIST_ITEMS};
use crate::types::parse_type;

pub fn parse_stmt(p: &mut Parser) -> Option<Stmt> {
    parse_stmt_inner(p, false)
}

/// Top-level declaration fallback (`jfmc-par/src/item.rs`'s
/// `parse_item`, reached when none of `include`/`extern`/`fn`/`struct`/
/// `impl` apply): identical to [`parse_stmt`] except that a bare
/// expression statement's trailing `;` is optional here, matching
/// `expression_statement()` in the original compiler (only called from
/// `declaration()`'s top-level fallback, never from a block interior,
/// where `block_statement()` enforces the `;` itself).
pub fn parse_top_level_stmt(p: &mut Parser) -> Option<Stmt> {
    parse_stmt_inner(p, true)
}

fn parse_stmt_inner(p: &mut Parser, top_level: bool) -> Option<Stmt> {
    let stmt = match p.current_kind() {
        TokenKind::Let => parse_let(p).map(Stmt::Let),
        TokenKind::If => parse_if(p).map(Stmt::If),
        TokenKind::While => parse_while(p).map(Stmt::While),
        TokenKind::For => parse_for(p).map(Stmt::For),
        TokenKind::Loop => parse_loop(p).map(Stmt::Loop),
        TokenKind::Return => parse_return(p).map(Stmt::Return),
        TokenKind::Break => {
            let loc = p.current_loc();
            p.advance();
            p.expect(TokenKind::Semicolon, "';' after 'break'")?;
            Some(Stmt::Break(loc))
        }
        TokenKind::Continue => {
            let loc = p.current_loc();
            p.advance();
            p.expect(TokenKind::Semicolon, "';' after 'continue'")?;
            Some(Stmt::Continue(loc))
        }
        TokenKind::LBrace => parse_block(p).map(Stmt::Block),
        _ if top_level => parse_top_level_expr_stmt(p),
        _ => parse_expr_stmt(p),
    };

    if stmt.is_none() && p.in_panic() {
        p.synchronize();
    }
    stmt
}

fn parse_let(p: &mut Parser) -> Option<LetStmt> {
    let loc = p.current_loc();
    p.advance(); // 'let'
    let is_mutable = p.match_kind(TokenKind::Mut);
    let name_tok = p.expect(TokenKind::Identifier, "variable name")?;
    let name = Symbol::intern(p.lexeme(&name_tok));

    let declared_type = if p.match_kind(TokenKind::Colon) {
        Some(parse_type(p)?)
    } else {
        None
    };

    let init = if p.match_kind(TokenKind::Eq) {
        Some(parse_expr(p)?)
    } else {
        None
    };

    p.expect(TokenKind::Semicolon, "';' after let statement")?;
    Some(LetStmt { name, is_mutable, declared_type, init, loc })
}

fn parse_if(p: &mut Parser) -> Option<IfStmt> {
    let loc = p.current_loc();
    p.advance(); // 'if'
    p.expect(TokenKind::LParen, "'(' after 'if'")?;
    let condition = parse_expr(p)?;
    p.expect(TokenKind::RParen, "')' after if condition")?;
    let then_block = parse_block(p)?;
    let else_branch = if p.match_kind(TokenKind::Else) {
        if p.check(TokenKind::If) {
            Some(ElseBranch::If(Box::new(parse_if(p)?)))
        } else {
            Some(ElseBranch::Block(parse_block(p)?))
        }
    } else {
        None
    };
    Some(IfStmt { condition, then_block, else_branch, loc })
}

fn parse_while(p: &mut Parser) -> Option<WhileStmt> {
    let loc = p.current_loc();
    p.advance(); // 'while'
    p.expect(TokenKind::LParen, "'(' after 'while'")?;
    let condition = parse_expr(p)?;
    p.expect(TokenKind::RParen, "')' after while condition")?;
    let body = parse_block(p)?;
    Some(WhileStmt { condition, body, loc })
}

/// `for name [: Type] in start..end { ... }` — a half-open range; the
/// `..` here is the one place in the grammar it appears, so it is
/// matched directly rather than folded into the expression precedence
/// chain.
fn parse_for(p: &mut Parser) -> Option<ForStmt> {
    let loc = p.current_loc();
    p.advance(); // 'for'
    let name_tok = p.expect(TokenKind::Identifier, "loop variable name")?;
    let var_name = Symbol::intern(p.lexeme(&name_tok));

    let declared_type = if p.match_kind(TokenKind::Colon) {
        Some(parse_type(p)?)
    } else {
        None
    };

    p.expect(TokenKind::In, "'in' after loop variable")?;
    let start = parse_expr(p)?;
    p.expect(TokenKind::DotDot, "'..' in for-loop range")?;
    let end = parse_expr(p)?;
    let body = parse_block(p)?;
    Some(ForStmt { var_name, declared_type, start, end, body, loc })
}

fn parse_loop(p: &mut Parser) -> Option<LoopStmt> {
    let loc = p.current_loc();
    p.advance(); // 'loop'
    let body = parse_block(p)?;
    Some(LoopStmt { body, loc })
}

fn parse_return(p: &mut Parser) -> Option<ReturnStmt> {
    let loc = p.current_loc();
    p.advance(); // 'return'
    let value = if p.check(TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expr(p)?)
    };
    p.expect(TokenKind::Semicolon, "';' after return statement")?;
    Some(ReturnStmt { value, loc })
}

fn parse_expr_stmt(p: &mut Parser) -> Option<Stmt> {
    let e = parse_expr(p)?;
    p.expect(TokenKind::Semicolon, "';' after expression statement")?;
    Some(Stmt::Expr(e))
}

/// Top-level expression statement: the trailing `;` is consumed if
/// present but is never required.
fn parse_top_level_expr_stmt(p: &mut Parser) -> Option<Stmt> {
    let e = parse_expr(p)?;
    p.match_kind(TokenKind::Semicolon);
    Some(Stmt::Expr(e))
}

/// Parses `{ stmt* expr? }`. A block's last statement is kept as
/// `final_expr` only when it is an expression with no trailing `;`;
/// this is recorded on the node but, per the grammar's actual
/// semantics, never treated as the block's value anywhere a block sits
/// in expression position.
pub fn parse_block(p: &mut Parser) -> Option<Block> {
    let loc = p.current_loc();
    p.expect(TokenKind::LBrace, "'{' to start a block")?;

    let mut stmts = Vec::new();
    let mut final_expr = None;
    let mut guard = 0;

    while !p.check(TokenKind::RBrace) && !p.is_at_end() {
        guard += 1;
        if guard > MAX_LIST_ITEMS {
            p.error("block contains too many statements");
            break;
        }

        let before = p.pos();

        if !matches!(
            p.current_kind(),
            TokenKind::Let
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::LBrace
        ) {
            // Might be a trailing value expression: speculatively parse
            // it and only commit to `final_expr` if it is not followed
            // by a semicolon and the block closes right after.
            let saved = p.pos();
            if let Some(e) = parse_expr(p) {
                if p.check(TokenKind::RBrace) {
                    final_expr = Some(e);
                    break;
                }
                p.set_pos(saved);
            } else {
                p.set_pos(saved);
            }
        }

        match parse_stmt(p) {
            Some(stmt) => stmts.push(stmt),
            None => {
                if p.pos() == before {
                    // No progress was made; avoid looping forever on a
                    // token the statement parser can't start from.
                    p.advance();
                }
            }
        }
    }

    p.expect(TokenKind::RBrace, "'}' to close a block")?;
    Some(Block { stmts, final_expr, loc })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfmc_util::Handler;

    fn parse(src: &str) -> Stmt {
        let handler = Handler::new();
        let tokens = jfmc_lex::scan(src, "t.jfm", &handler);
        let mut p = Parser::new(tokens, src, "t.jfm", &handler);
        let s = parse_stmt(&mut p).expect("statement should parse");
        assert!(!handler.has_errors(), "unexpected diagnostics for `{src}`");
        s
    }

    #[test]
    fn let_without_initializer() {
        match parse("let x: i32;") {
            Stmt::Let(l) => {
                assert!(!l.is_mutable);
                assert!(l.init.is_none());
            }
            _ => panic!("expected let"),
        }
    }

    #[test]
    fn mutable_let_with_initializer() {
        match parse("let mut x: i32 = 1;") {
            Stmt::Let(l) => {
                assert!(l.is_mutable);
                assert!(l.init.is_some());
            }
            _ => panic!("expected let"),
        }
    }

    #[test]
    fn if_else_if_chain_nests_as_else_branch() {
        match parse("if (a) { } else if (b) { } else { }") {
            Stmt::If(i) => match i.else_branch {
                Some(ElseBranch::If(inner)) => assert!(inner.else_branch.is_some()),
                _ => panic!("expected nested else-if"),
            },
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn for_loop_requires_half_open_range() {
        match parse("for i in 0..10 { }") {
            Stmt::For(f) => assert_eq!(f.var_name.as_str(), "i"),
            _ => panic!("expected for"),
        }
    }

    #[test]
    fn block_retains_trailing_expression_without_semicolon() {
        match parse("{ let x: i32 = 1; x }") {
            Stmt::Block(b) => {
                assert_eq!(b.stmts.len(), 1);
                assert!(b.final_expr.is_some());
            }
            _ => panic!("expected block"),
        }
    }

    #[test]
    fn block_with_trailing_semicolon_has_no_final_expr() {
        match parse("{ let x: i32 = 1; x; }") {
            Stmt::Block(b) => {
                assert_eq!(b.stmts.len(), 2);
                assert!(b.final_expr.is_none());
            }
            _ => panic!("expected block"),
        }
    }

    #[test]
    fn return_with_no_value() {
        match parse("return;") {
            Stmt::Return(r) => assert!(r.value.is_none()),
            _ => panic!("expected return"),
        }
    }

    #[test]
    fn block_interior_expr_statement_still_requires_semicolon() {
        // `f()` without a `;` followed by another statement can't be a
        // `final_expr` (that requires the block to close right after),
        // so it falls to the ordinary expression-statement path, where
        // the `;` stays mandatory.
        let handler = Handler::new();
        let source = "{ f() g(); }";
        let tokens = jfmc_lex::scan(source, "t.jfm", &handler);
        let mut p = Parser::new(tokens, source, "t.jfm", &handler);
        let _ = parse_block(&mut p);
        assert!(handler.has_errors());
    }

    #[test]
    fn top_level_expr_statement_semicolon_is_optional() {
        let handler = Handler::new();
        let source = "f()";
        let tokens = jfmc_lex::scan(source, "t.jfm", &handler);
        let mut p = Parser::new(tokens, source, "t.jfm", &handler);
        let stmt = parse_top_level_stmt(&mut p).expect("top-level expression statement should parse");
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        assert!(matches!(stmt, Stmt::Expr(_)));
    }

    #[test]
    fn top_level_expr_statement_still_accepts_a_trailing_semicolon() {
        let handler = Handler::new();
        let source = "f();";
        let tokens = jfmc_lex::scan(source, "t.jfm", &handler);
        let mut p = Parser::new(tokens, source, "t.jfm", &handler);
        let stmt = parse_top_level_stmt(&mut p).expect("top-level expression statement should parse");
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        assert!(matches!(stmt, Stmt::Expr(_)));
    }
}
