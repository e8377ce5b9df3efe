//! The syntax-directed C emitter. Walks a [`Program`] that has already
//! passed semantic analysis — every `Expr` node's annotation cache is
//! trusted to be populated, so this module never raises a diagnostic
//! of its own; the driver only invokes it once
//! `Handler::has_errors()` is false after semantic analysis, and
//! re-checking that here would just duplicate the checker.
//!
//! Emission order: fixed prelude, user `#include`s, struct typedefs
//! (extern structs skipped), impl blocks lowered to free functions,
//! then plain functions. Extern function items never emit a
//! prototype — the user's own `#include` is assumed to supply one.

use jfmc_ast::{
    AssignOp, BinOp, Block, Expr, ExprKind, FunctionItem, Item, Literal, Param, Program, Stmt,
    StructItem, Type, UnOp,
};

use crate::builtins::{lower_print_call, lower_sqrt_call};
use crate::mangle::{mangle, mangle_method};
use crate::types::{local_declarator, lower_type};

/// The declarator used everywhere except a local `let`: struct fields,
/// function parameters, anywhere an array decays to a pointer to its
/// element type rather than keeping its `T name[N]` bracket form.
fn decayed_declarator(ty: &Type, name: &str) -> String {
    format!("{} {name}", lower_type(ty))
}

const PRELUDE: &str = "#include <stdio.h>\n\
#include <stdlib.h>\n\
#include <stdint.h>\n\
#include <stdbool.h>\n\
#include <math.h>\n";

/// Emits a whole translation unit for `program`. Callers are expected
/// to have already confirmed semantic analysis reported no errors —
/// that check is a driver-level contract, not something re-verified
/// here.
pub fn emit_program(program: &Program) -> String {
    let mut out = String::new();
    out.push_str(PRELUDE);

    for item in &program.items {
        if let Item::Include(inc) = item {
            out.push_str(&format!("#include <{}>\n", inc.path));
        }
    }

    for item in &program.items {
        if let Item::Struct(s) = item {
            if !s.is_extern {
                out.push('\n');
                emit_struct(&mut out, s);
            }
        }
    }

    for item in &program.items {
        if let Item::Impl(i) = item {
            for method in &i.methods {
                out.push('\n');
                emit_function(&mut out, method, Some(&mangle_method(i.struct_name.as_str(), method.name.as_str())));
            }
        }
    }

    for item in &program.items {
        if let Item::Function(f) = item {
            out.push('\n');
            emit_function(&mut out, f, None);
        }
    }

    out
}

fn emit_struct(out: &mut String, s: &StructItem) {
    out.push_str(&format!("typedef struct {} {{\n", s.name));
    for field in &s.fields {
        out.push_str(&format!("    {};\n", decayed_declarator(&field.ty, field.name.as_str())));
    }
    out.push_str(&format!("}} {};\n", s.name));
}

fn emit_params(params: &[Param]) -> String {
    if params.is_empty() {
        return "void".to_string();
    }
    params
        .iter()
        .map(|p| decayed_declarator(&p.ty, p.name.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_function(out: &mut String, f: &FunctionItem, name_override: Option<&str>) {
    let name = name_override.map(str::to_string).unwrap_or_else(|| mangle(f.name.as_str()));
    out.push_str(&format!(
        "{} {}({}) ",
        lower_type(&f.return_type),
        name,
        emit_params(&f.params)
    ));
    emit_block(out, &f.body, 0);
    out.push('\n');
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

fn emit_block(out: &mut String, block: &Block, level: usize) {
    out.push_str("{\n");
    for stmt in &block.stmts {
        indent(out, level + 1);
        emit_stmt(out, stmt, level + 1);
        out.push('\n');
    }
    if let Some(final_expr) = &block.final_expr {
        // Never propagated as the block's value, so it is lowered
        // exactly like any other expression statement.
        indent(out, level + 1);
        out.push_str(&emit_expr(final_expr, false));
        out.push_str(";\n");
    }
    indent(out, level);
    out.push('}');
}

fn emit_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    match stmt {
        Stmt::Let(l) => {
            let declarator = local_declarator(
                l.declared_type.as_ref().unwrap_or(&Type::I32),
                l.name.as_str(),
            );
            let declarator = if l.is_mutable {
                declarator
            } else {
                format!("const {declarator}")
            };

            match (&l.declared_type, l.init.as_deref()) {
                (Some(Type::Array { .. }), Some(Expr { kind: ExprKind::ArrayLiteral(elems), .. })) => {
                    let values: Vec<String> = elems.iter().map(|e| emit_expr(e, false)).collect();
                    out.push_str(&format!("{declarator} = {{{}}};", values.join(", ")));
                }
                (_, Some(init)) => {
                    out.push_str(&format!("{declarator} = {};", emit_expr(init, false)));
                }
                (_, None) => {
                    out.push_str(&format!("{declarator};"));
                }
            }
        }
        Stmt::If(i) => {
            out.push_str(&format!("if ({}) ", emit_expr(&i.condition, false)));
            emit_block(out, &i.then_block, level);
            if let Some(branch) = &i.else_branch {
                out.push_str(" else ");
                match branch {
                    jfmc_ast::ElseBranch::Block(b) => emit_block(out, b, level),
                    jfmc_ast::ElseBranch::If(inner) => {
                        emit_stmt(out, &Stmt::If((**inner).clone()), level)
                    }
                }
            }
        }
        Stmt::While(w) => {
            out.push_str(&format!("while ({}) ", emit_expr(&w.condition, false)));
            emit_block(out, &w.body, level);
        }
        Stmt::For(f) => {
            out.push_str(&format!(
                "for (int {name} = {start}; {name} < {end}; {name}++) ",
                name = f.var_name,
                start = emit_expr(&f.start, false),
                end = emit_expr(&f.end, false),
            ));
            emit_block(out, &f.body, level);
        }
        Stmt::Loop(l) => {
            out.push_str("while (1) ");
            emit_block(out, &l.body, level);
        }
        Stmt::Return(r) => match &r.value {
            Some(v) => out.push_str(&format!("return {};", emit_expr(v, false))),
            None => out.push_str("return;"),
        },
        Stmt::Break(_) => out.push_str("break;"),
        Stmt::Continue(_) => out.push_str("continue;"),
        Stmt::Block(b) => emit_block(out, b, level),
        Stmt::Expr(e) => {
            out.push_str(&emit_expr(e, false));
            out.push(';');
        }
    }
}

/// Lowers an expression to C. `elide_compound_prefix` is set for a
/// struct literal nested as the value of a field inside an enclosing
/// struct literal, where the outer compound-literal's own prefix
/// already covers it.
fn emit_expr(e: &Expr, elide_compound_prefix: bool) -> String {
    match &e.kind {
        ExprKind::Literal(lit) => emit_literal(lit),
        ExprKind::Identifier(name) => mangle(name.as_str()),
        ExprKind::BinaryOp(b) => format!(
            "({} {} {})",
            emit_expr(&b.left, false),
            binop_str(b.op),
            emit_expr(&b.right, false)
        ),
        ExprKind::UnaryOp(u) => emit_unary(u, e),
        ExprKind::Cast(c) => format!("({})({})", lower_type(&c.target_type), emit_expr(&c.operand, false)),
        ExprKind::Call(c) => emit_call(c, e),
        ExprKind::Index(i) => format!("{}[{}]", emit_expr(&i.object, false), emit_expr(&i.index, false)),
        ExprKind::Field(f) => {
            let op = if object_type_is_indirect(&f.object) { "->" } else { "." };
            format!("{}{op}{}", emit_expr(&f.object, false), f.field)
        }
        ExprKind::Assignment(a) => format!(
            "{} {} {}",
            emit_expr(&a.target, false),
            assign_op_str(a.op),
            emit_expr(&a.value, false)
        ),
        ExprKind::ArrayLiteral(elems) => {
            let element_ty = elems
                .first()
                .and_then(|e| e.cached_type())
                .unwrap_or(Type::I32);
            let values: Vec<String> = elems.iter().map(|e| emit_expr(e, false)).collect();
            format!("({}[{}]){{{}}}", lower_type(&element_ty), elems.len(), values.join(", "))
        }
        ExprKind::StructLiteral(s) => {
            let fields: Vec<String> = s
                .fields
                .iter()
                .map(|(name, value)| {
                    let elide = matches!(value.kind, ExprKind::StructLiteral(_));
                    format!(".{name} = {}", emit_expr(value, elide))
                })
                .collect();
            let body = format!("{{{}}}", fields.join(", "));
            if elide_compound_prefix {
                body
            } else {
                format!("({}){body}", s.struct_name)
            }
        }
    }
}

/// Whether field/method access on `object` should use `->` in C:
/// true when its static type (as annotated by the semantic analyzer)
/// is a pointer or reference, false for a plain struct value.
fn object_type_is_indirect(object: &Expr) -> bool {
    match object.cached_type() {
        Some(Type::Pointer { .. }) | Some(Type::Reference { .. }) => true,
        _ => false,
    }
}

fn emit_unary(u: &jfmc_ast::UnaryOpExpr, _e: &Expr) -> String {
    match u.op {
        UnOp::Neg => format!("(-{})", emit_expr(&u.operand, false)),
        UnOp::Not => format!("(!{})", emit_expr(&u.operand, false)),
        UnOp::Deref => format!("(*{})", emit_expr(&u.operand, false)),
        UnOp::Ref { .. } => {
            // Arrays already decay to pointers in C; the `&` is
            // elided for an array-typed operand.
            if matches!(u.operand.cached_type(), Some(Type::Array { .. })) {
                emit_expr(&u.operand, false)
            } else {
                format!("(&{})", emit_expr(&u.operand, false))
            }
        }
    }
}

fn emit_call(c: &jfmc_ast::CallExpr, _e: &Expr) -> String {
    if let ExprKind::Field(field_expr) = &c.callee.kind {
        let obj_ty = field_expr.object.cached_type().unwrap_or(Type::Void);
        let struct_name = match obj_ty.auto_deref_once() {
            Type::Struct { name } => name.to_string(),
            _ => unreachable!("semantic analysis already rejected a method call on a non-struct receiver"),
        };
        let func = mangle_method(&struct_name, field_expr.field.as_str());
        let mut args = vec![emit_expr(&field_expr.object, false)];
        args.extend(c.args.iter().map(|a| emit_expr(a, false)));
        return format!("{func}({})", args.join(", "));
    }

    if let ExprKind::Identifier(name) = &c.callee.kind {
        match name.as_str() {
            "println" | "print" => {
                let arg = c.args.first().map(|a| {
                    let ty = a.cached_type().unwrap_or(Type::I32);
                    (emit_expr(a, false), ty)
                });
                let newline = name.as_str() == "println";
                return lower_print_call(arg.as_ref().map(|(t, ty)| (t.as_str(), ty)), newline);
            }
            "sqrt" => {
                if let Some(arg) = c.args.first() {
                    let ty = arg.cached_type().unwrap_or(Type::F32);
                    return lower_sqrt_call(&emit_expr(arg, false), &ty);
                }
            }
            _ => {}
        }
        let args: Vec<String> = c.args.iter().map(|a| emit_expr(a, false)).collect();
        return format!("{}({})", mangle(name.as_str()), args.join(", "));
    }

    unreachable!("semantic analysis already rejected a call with a non-identifier, non-field callee")
}

fn binop_str(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Rem => "%",
        BinOp::Lt => "<",
        BinOp::Gt => ">",
        BinOp::Le => "<=",
        BinOp::Ge => ">=",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::And => "&&",
        BinOp::Or => "||",
        BinOp::BitAnd => "&",
        BinOp::BitOr => "|",
        BinOp::BitXor => "^",
        BinOp::Shl => "<<",
        BinOp::Shr => ">>",
    }
}

fn assign_op_str(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
    }
}

fn emit_literal(lit: &Literal) -> String {
    match lit {
        Literal::Int(n) => n.to_string(),
        Literal::Float(f) => {
            let text = format!("{f:?}");
            if text.contains('.') || text.contains('e') || text.contains('E') {
                text
            } else {
                format!("{text}.0")
            }
        }
        Literal::Bool(b) => b.to_string(),
        Literal::Char(c) => format!("'{}'", escape_char(*c)),
        Literal::Str(s) => format!("\"{}\"", escape_string(s)),
    }
}

fn escape_char(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        '\0' => "\\0".to_string(),
        other => other.to_string(),
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}
