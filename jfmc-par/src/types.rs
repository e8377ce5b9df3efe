//! Parses type annotations: primitives, references, pointers, fixed-
//! size arrays (`[T; N]`), and nominal struct references.

use jfmc_ast::Type;
use jfmc_lex::TokenKind;

use crate::parser::Parser;

pub fn parse_type(p: &mut Parser) -> Option<Type> {
    if p.match_kind(TokenKind::Amp) {
        let is_mutable = p.match_kind(TokenKind::Mut);
        let inner = parse_type(p)?;
        return Some(Type::reference(inner, is_mutable));
    }

    if p.match_kind(TokenKind::Star) {
        let inner = parse_type(p)?;
        return Some(Type::pointer(inner));
    }

    if p.match_kind(TokenKind::LBracket) {
        let element = parse_type(p)?;
        p.expect(TokenKind::Semicolon, "';' in array type")?;
        let size_tok = p.expect(TokenKind::IntLiteral, "array size")?;
        let size = match size_tok.literal {
            Some(jfmc_lex::TokenLiteral::Int(n)) if n >= 0 => n as u64,
            _ => {
                p.error("array size must be a non-negative integer literal");
                0
            }
        };
        p.expect(TokenKind::RBracket, "']' after array type")?;
        return Some(Type::array(element, size));
    }

    if let Some(primitive) = primitive_from_current(p) {
        p.advance();
        return Some(primitive);
    }

    if p.check(TokenKind::Identifier) {
        let tok = p.advance();
        let name = p.lexeme(&tok);
        return Some(Type::struct_named(name));
    }

    p.error("expected type");
    None
}

fn primitive_from_current(p: &Parser) -> Option<Type> {
    Some(match p.current_kind() {
        TokenKind::I8 => Type::I8,
        TokenKind::I16 => Type::I16,
        TokenKind::I32 => Type::I32,
        TokenKind::I64 => Type::I64,
        TokenKind::U8 => Type::U8,
        TokenKind::U16 => Type::U16,
        TokenKind::U32 => Type::U32,
        TokenKind::U64 => Type::U64,
        TokenKind::F32 => Type::F32,
        TokenKind::F64 => Type::F64,
        TokenKind::BoolKw => Type::Bool,
        TokenKind::CharKw => Type::Char,
        TokenKind::StrKw => Type::Str,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jfmc_util::Handler;

    fn parse(src: &str) -> Option<Type> {
        let handler = Handler::new();
        let tokens = jfmc_lex::scan(src, "t.jfm", &handler);
        let mut p = Parser::new(tokens, src, "t.jfm", &handler);
        parse_type(&mut p)
    }

    #[test]
    fn primitive() {
        assert_eq!(parse("i32"), Some(Type::I32));
    }

    #[test]
    fn mutable_reference() {
        assert_eq!(parse("&mut i32"), Some(Type::reference(Type::I32, true)));
    }

    #[test]
    fn immutable_reference() {
        assert_eq!(parse("&i32"), Some(Type::reference(Type::I32, false)));
    }

    #[test]
    fn pointer() {
        assert_eq!(parse("*i32"), Some(Type::pointer(Type::I32)));
    }

    #[test]
    fn fixed_size_array() {
        assert_eq!(parse("[i32; 4]"), Some(Type::array(Type::I32, 4)));
    }

    #[test]
    fn struct_name() {
        assert_eq!(parse("Point"), Some(Type::struct_named("Point")));
    }
}
