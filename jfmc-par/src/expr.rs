//! Expression parsing: assignment down to primary, in strict
//! precedence order. Each level is an ordinary recursive-descent
//! function that calls the next-tighter level for its operands — a
//! left-recursion-eliminated `assignment` → `logical_or` → ... →
//! `primary` chain.

use jfmc_ast::{
    AssignOp, AssignmentExpr, BinOp, BinaryOpExpr, CallExpr, CastExpr, Expr, ExprKind, FieldExpr,
    IndexExpr, Literal, StructLiteralExpr, UnOp, UnaryOpExpr,
};
use jfmc_lex::{TokenKind, TokenLiteral};
use jfmc_util::Symbol;

use crate::parser::{Parser, MAX_POSTFIX_CHAIN};
use crate::types::parse_type;

pub fn parse_expr(p: &mut Parser) -> Option<Box<Expr>> {
    parse_assignment(p)
}

fn parse_assignment(p: &mut Parser) -> Option<Box<Expr>> {
    let loc = p.current_loc();
    let target = parse_logical_or(p)?;

    let op = match p.current_kind() {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::AddAssign,
        TokenKind::MinusEq => AssignOp::SubAssign,
        TokenKind::StarEq => AssignOp::MulAssign,
        TokenKind::SlashEq => AssignOp::DivAssign,
        _ => return Some(target),
    };
    p.advance();
    let value = parse_assignment(p)?; // right-associative
    Some(Box::new(Expr::new(
        ExprKind::Assignment(AssignmentExpr { target, op, value }),
        loc,
    )))
}

macro_rules! left_assoc_level {
    ($name:ident, $next:ident, [$($tok:pat => $op:expr),+ $(,)?]) => {
        fn $name(p: &mut Parser) -> Option<Box<Expr>> {
            let loc = p.current_loc();
            let mut left = $next(p)?;
            loop {
                let op = match p.current_kind() {
                    $($tok => $op,)+
                    _ => break,
                };
                p.advance();
                let right = $next(p)?;
                left = Box::new(Expr::new(
                    ExprKind::BinaryOp(BinaryOpExpr { op, left, right }),
                    loc,
                ));
            }
            Some(left)
        }
    };
}

left_assoc_level!(parse_logical_or, parse_logical_and, [TokenKind::OrOr => BinOp::Or]);
left_assoc_level!(parse_logical_and, parse_bitor, [TokenKind::AndAnd => BinOp::And]);
left_assoc_level!(parse_bitor, parse_bitxor, [TokenKind::Pipe => BinOp::BitOr]);
left_assoc_level!(parse_bitxor, parse_bitand, [TokenKind::Caret => BinOp::BitXor]);
left_assoc_level!(parse_bitand, parse_equality, [TokenKind::Amp => BinOp::BitAnd]);
left_assoc_level!(parse_equality, parse_comparison, [
    TokenKind::EqEq => BinOp::Eq,
    TokenKind::NotEq => BinOp::Ne,
]);
left_assoc_level!(parse_comparison, parse_cast, [
    TokenKind::Lt => BinOp::Lt,
    TokenKind::Gt => BinOp::Gt,
    TokenKind::LtEq => BinOp::Le,
    TokenKind::GtEq => BinOp::Ge,
]);

fn parse_cast(p: &mut Parser) -> Option<Box<Expr>> {
    let loc = p.current_loc();
    let mut operand = parse_shift(p)?;
    while p.match_kind(TokenKind::As) {
        let target_type = parse_type(p)?;
        operand = Box::new(Expr::new(
            ExprKind::Cast(CastExpr { operand, target_type }),
            loc,
        ));
    }
    Some(operand)
}

left_assoc_level!(parse_shift, parse_additive, [
    TokenKind::Shl => BinOp::Shl,
    TokenKind::Shr => BinOp::Shr,
]);
left_assoc_level!(parse_additive, parse_multiplicative, [
    TokenKind::Plus => BinOp::Add,
    TokenKind::Minus => BinOp::Sub,
]);
left_assoc_level!(parse_multiplicative, parse_unary, [
    TokenKind::Star => BinOp::Mul,
    TokenKind::Slash => BinOp::Div,
    TokenKind::Percent => BinOp::Rem,
]);

fn parse_unary(p: &mut Parser) -> Option<Box<Expr>> {
    let loc = p.current_loc();
    let op = match p.current_kind() {
        TokenKind::Bang => Some(UnOp::Not),
        TokenKind::Minus => Some(UnOp::Neg),
        TokenKind::Star => Some(UnOp::Deref),
        _ => None,
    };
    if let Some(op) = op {
        p.advance();
        let operand = parse_unary(p)?;
        return Some(Box::new(Expr::new(ExprKind::UnaryOp(UnaryOpExpr { op, operand }), loc)));
    }
    if p.match_kind(TokenKind::Amp) {
        let is_mut = p.match_kind(TokenKind::Mut);
        let operand = parse_unary(p)?;
        return Some(Box::new(Expr::new(
            ExprKind::UnaryOp(UnaryOpExpr { op: UnOp::Ref { is_mut }, operand }),
            loc,
        )));
    }
    parse_postfix(p)
}

fn parse_postfix(p: &mut Parser) -> Option<Box<Expr>> {
    let mut expr = parse_primary(p)?;
    let mut depth = 0;
    loop {
        depth += 1;
        if depth > MAX_POSTFIX_CHAIN {
            p.error("expression chain too deep");
            break;
        }
        if p.match_kind(TokenKind::LParen) {
            let loc = p.loc(p.previous());
            let mut args = Vec::new();
            if !p.check(TokenKind::RParen) {
                loop {
                    args.push(*parse_expr(p)?);
                    if !p.match_kind(TokenKind::Comma) {
                        break;
                    }
                }
            }
            p.expect(TokenKind::RParen, "')' after arguments")?;
            expr = Box::new(Expr::new(ExprKind::Call(CallExpr { callee: expr, args }), loc));
        } else if p.match_kind(TokenKind::LBracket) {
            let loc = p.loc(p.previous());
            let index = parse_expr(p)?;
            p.expect(TokenKind::RBracket, "']' after index")?;
            expr = Box::new(Expr::new(ExprKind::Index(IndexExpr { object: expr, index }), loc));
        } else if p.match_kind(TokenKind::Dot) {
            let loc = p.loc(p.previous());
            let field_tok = p.expect(TokenKind::Identifier, "field name after '.'")?;
            let field = Symbol::intern(p.lexeme(&field_tok));
            expr = Box::new(Expr::new(ExprKind::Field(FieldExpr { object: expr, field }), loc));
        } else if p.match_kind(TokenKind::ColonColon) {
            let method_tok = p.expect(TokenKind::Identifier, "method name after '::'")?;
            let method = p.lexeme(&method_tok);
            let base = match &expr.kind {
                ExprKind::Identifier(sym) => sym.as_str(),
                _ => {
                    p.error("'::' may only follow a path identifier");
                    break;
                }
            };
            let mangled = Symbol::intern(&format!("{base}::{method}"));
            let loc = expr.loc;
            expr = Box::new(Expr::new(ExprKind::Identifier(mangled), loc));
        } else {
            break;
        }
    }
    Some(expr)
}

fn parse_primary(p: &mut Parser) -> Option<Box<Expr>> {
    let loc = p.current_loc();

    if p.match_kind(TokenKind::True) {
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Bool(true)), loc)));
    }
    if p.match_kind(TokenKind::False) {
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Bool(false)), loc)));
    }
    if p.check(TokenKind::IntLiteral) {
        let tok = p.advance();
        let n = match tok.literal {
            Some(TokenLiteral::Int(n)) => n,
            _ => 0,
        };
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Int(n)), loc)));
    }
    if p.check(TokenKind::FloatLiteral) {
        let tok = p.advance();
        let f = match tok.literal {
            Some(TokenLiteral::Float(f)) => f,
            _ => 0.0,
        };
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Float(f)), loc)));
    }
    if p.check(TokenKind::CharLiteral) {
        let tok = p.advance();
        let c = match tok.literal {
            Some(TokenLiteral::Char(c)) => c,
            _ => '\0',
        };
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Char(c)), loc)));
    }
    if p.check(TokenKind::StrLiteral) {
        let tok = p.advance();
        let raw = p.lexeme(&tok);
        // Strip the surrounding quotes; escapes inside are left intact
        // since SL's string escape grammar is a subset of C's and the
        // emitter splices this text straight into a C string literal.
        let inner = &raw[1..raw.len().saturating_sub(1)];
        return Some(Box::new(Expr::new(ExprKind::Literal(Literal::Str(inner.to_string())), loc)));
    }
    if p.check(TokenKind::Identifier) {
        let tok = p.advance();
        let name = Symbol::intern(p.lexeme(&tok));

        if p.check(TokenKind::LBrace) {
            if let Some(struct_lit) = try_parse_struct_literal(p, name, loc) {
                return Some(struct_lit);
            }
        }

        return Some(Box::new(Expr::new(ExprKind::Identifier(name), loc)));
    }
    if p.match_kind(TokenKind::LBracket) {
        let mut elements = Vec::new();
        if !p.check(TokenKind::RBracket) {
            loop {
                elements.push(*parse_expr(p)?);
                if !p.match_kind(TokenKind::Comma) {
                    break;
                }
            }
        }
        p.expect(TokenKind::RBracket, "']' after array elements")?;
        return Some(Box::new(Expr::new(ExprKind::ArrayLiteral(elements), loc)));
    }
    if p.match_kind(TokenKind::LParen) {
        let inner = parse_expr(p)?;
        p.expect(TokenKind::RParen, "')' after expression")?;
        return Some(inner);
    }

    p.error("expected expression");
    None
}

/// Struct-literal disambiguation: after an identifier, `{` is only
/// committed to a struct literal if it is
/// immediately followed by `}` or `identifier :`. Otherwise the `{` is
/// put back so callers like `if (x) { ... }` never misparse the block
/// as a struct literal.
fn try_parse_struct_literal(p: &mut Parser, name: Symbol, loc: jfmc_util::Location) -> Option<Box<Expr>> {
    let saved = p.pos();
    p.advance(); // consume '{'

    let commits = p.check(TokenKind::RBrace)
        || (p.check(TokenKind::Identifier) && p.peek_kind(1) == TokenKind::Colon);

    if !commits {
        p.set_pos(saved);
        return None;
    }

    let mut fields = Vec::new();
    while !p.check(TokenKind::RBrace) && !p.is_at_end() {
        let field_tok = p.expect(TokenKind::Identifier, "field name")?;
        let field = Symbol::intern(p.lexeme(&field_tok));
        p.expect(TokenKind::Colon, "':' after field name")?;
        let value = *parse_expr(p)?;
        fields.push((field, value));
        if !p.match_kind(TokenKind::Comma) {
            break;
        }
    }
    p.expect(TokenKind::RBrace, "'}' after struct fields")?;

    Some(Box::new(Expr::new(
        ExprKind::StructLiteral(StructLiteralExpr { struct_name: name, fields }),
        loc,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfmc_util::Handler;

    fn parse(src: &str) -> Box<Expr> {
        let handler = Handler::new();
        let tokens = jfmc_lex::scan(src, "t.jfm", &handler);
        let mut p = Parser::new(tokens, src, "t.jfm", &handler);
        let e = parse_expr(&mut p).expect("expression should parse");
        assert!(!handler.has_errors(), "unexpected diagnostics for `{src}`");
        e
    }

    #[test]
    fn precedence_multiplication_binds_tighter_than_addition() {
        let e = parse("1 + 2 * 3");
        match &e.kind {
            ExprKind::BinaryOp(b) => {
                assert_eq!(b.op, BinOp::Add);
                assert!(matches!(b.right.kind, ExprKind::BinaryOp(_)));
            }
            _ => panic!("expected binary op"),
        }
    }

    #[test]
    fn assignment_is_right_associative() {
        let e = parse("a = b = 1");
        match &e.kind {
            ExprKind::Assignment(a) => {
                assert!(matches!(a.value.kind, ExprKind::Assignment(_)));
            }
            _ => panic!("expected assignment"),
        }
    }

    #[test]
    fn struct_literal_is_recognized_after_brace_colon_lookahead() {
        let e = parse("Point { x: 1, y: 2 }");
        match &e.kind {
            ExprKind::StructLiteral(s) => assert_eq!(s.fields.len(), 2),
            _ => panic!("expected struct literal"),
        }
    }

    #[test]
    fn bare_identifier_before_brace_block_is_not_a_struct_literal() {
        // as in `if (x) { ... }` — the `{` must not be absorbed here.
        let e = parse("x");
        assert!(matches!(e.kind, ExprKind::Identifier(_)));
    }

    #[test]
    fn path_expression_mangles_to_a_single_identifier() {
        let e = parse("Point::sum");
        match &e.kind {
            ExprKind::Identifier(sym) => assert_eq!(sym.as_str(), "Point::sum"),
            _ => panic!("expected identifier"),
        }
    }

    #[test]
    fn cast_binds_tighter_than_comparison() {
        let e = parse("a as i32 < b");
        match &e.kind {
            ExprKind::BinaryOp(b) => {
                assert_eq!(b.op, BinOp::Lt);
                assert!(matches!(b.left.kind, ExprKind::Cast(_)));
            }
            _ => panic!("expected comparison at the top"),
        }
    }

    #[test]
    fn cast_wraps_a_completed_shift_expression() {
        // `cast()` takes `shift()` as its operand parser, so a shift
        // appearing before `as` is already resolved by the time `as`
        // is seen: `a << 1 as i32` reads as `(a << 1) as i32`, not
        // `a << (1 as i32)`.
        let e = parse("a << 1 as i32");
        match &e.kind {
            ExprKind::Cast(c) => assert!(matches!(c.operand.kind, ExprKind::BinaryOp(_))),
            _ => panic!("expected cast at the top"),
        }
    }

    #[test]
    fn mut_reference_is_distinguished_from_plain_reference() {
        let e = parse("&mut x");
        match &e.kind {
            ExprKind::UnaryOp(u) => assert_eq!(u.op, UnOp::Ref { is_mut: true }),
            _ => panic!("expected unary ref"),
        }
    }

    #[test]
    fn empty_array_literal_parses_with_zero_elements() {
        let e = parse("[]");
        match &e.kind {
            ExprKind::ArrayLiteral(elems) => assert!(elems.is_empty()),
            _ => panic!("expected array literal"),
        }
    }
}
