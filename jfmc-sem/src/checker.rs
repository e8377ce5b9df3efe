//! The semantic analyzer: name resolution, mutability and control-flow
//! enforcement, and type-checking, annotating every expression in
//! place. Impl method bodies are walked the same as free functions'
//! (registration and body analysis are kept as separate passes, but
//! every `Function` gets its body recursed into, method or not).

use jfmc_ast::{
    AssignmentExpr, BinaryOpExpr, Block, CallExpr, CastExpr, Expr, ExprKind,
    ExternFunctionItem, FieldExpr, ForStmt, FunctionItem, IfStmt, ImplItem, IndexExpr, Item,
    Literal, LoopStmt, Param, Program, ReturnStmt, Stmt, StructItem, StructLiteralExpr, Type,
    UnOp, UnaryOpExpr, WhileStmt,
};
use jfmc_util::{Diagnostic, DiagnosticBuilder, Handler, Location, Symbol as Interned};

use crate::scope::ScopeKind;
use crate::symbol::{Symbol, SymbolExtra, SymbolKind};
use crate::table::SymbolTable;

/// Checks assignment compatibility: identical types, or both
/// integral, or both in `{F32, F64}`.
fn assignable(from: &Type, to: &Type) -> bool {
    from == to
        || (from.is_integral() && to.is_integral())
        || (matches!(from, Type::F32 | Type::F64) && matches!(to, Type::F32 | Type::F64))
}

/// Arithmetic result widening: `F64` if either operand is `F64`, else
/// `F32` if either is `F32`, else `I32`.
fn arithmetic_result(left: &Type, right: &Type) -> Type {
    if matches!(left, Type::F64) || matches!(right, Type::F64) {
        Type::F64
    } else if matches!(left, Type::F32) || matches!(right, Type::F32) {
        Type::F32
    } else {
        Type::I32
    }
}

pub struct Analyzer<'a> {
    table: SymbolTable,
    handler: &'a Handler,
    file: std::path::PathBuf,
    loop_depth: u32,
}

/// Runs the full three-pass analysis over `program`, mutating its
/// expression nodes' annotation caches and
/// pushing diagnostics onto `handler`. Returns the populated symbol
/// table (the driver's `--semantic` dump reads it for a summary).
pub fn analyze(program: &Program, file: impl Into<std::path::PathBuf>, handler: &Handler) -> SymbolTable {
    let mut analyzer = Analyzer {
        table: SymbolTable::new(),
        handler,
        file: file.into(),
        loop_depth: 0,
    };
    analyzer.run(program);
    analyzer.table
}

impl<'a> Analyzer<'a> {
    fn error(&self, message: impl Into<String>, loc: Location) {
        self.handler.push(Diagnostic::error(message, self.file.clone(), loc));
    }

    /// Like [`Self::error`], with an "(expected X, found Y)" style
    /// parenthetical appended to the message for the type-mismatch
    /// diagnostics that have both sides of the mismatch on hand.
    fn error_with_note(&self, message: impl Into<String>, note: impl AsRef<str>, loc: Location) {
        DiagnosticBuilder::error(message, self.file.clone(), loc)
            .note(note)
            .emit(self.handler);
    }

    fn run(&mut self, program: &Program) {
        for item in &program.items {
            if let Item::Struct(s) = item {
                self.register_struct(s);
            }
        }
        for item in &program.items {
            if let Item::Impl(i) = item {
                self.analyze_impl(i);
            }
        }
        for item in &program.items {
            match item {
                Item::ExternFunction(ef) => self.register_extern_function(ef),
                Item::Function(f) => self.analyze_top_level_function(f),
                Item::Stmt(s) => self.check_stmt(s),
                Item::Struct(_) | Item::Impl(_) | Item::Include(_) => {}
            }
        }
    }

    // ---- top-level passes -------------------------------------------------

    fn register_struct(&mut self, s: &StructItem) {
        let fields: Vec<(Interned, Type)> = s.fields.iter().map(|f| (f.name, f.ty.clone())).collect();
        let scope = self.table.scopes().current();
        let symbol = Symbol::new(s.name, SymbolKind::Struct, Type::struct_named(s.name.as_str()), false, true, scope)
            .with_extra(SymbolExtra::Struct { fields });
        if !self.table.register_type(s.name, symbol) {
            self.error(format!("Struct {} already defined", s.name), s.loc);
        }
    }

    fn analyze_impl(&mut self, i: &ImplItem) {
        if self.table.lookup_type(i.struct_name).is_none() {
            self.error(
                format!("Implementing methods for undefined struct: {}", i.struct_name),
                i.loc,
            );
            return;
        }

        for method in &i.methods {
            let mangled = Interned::intern(&format!("{}::{}", i.struct_name, method.name));
            let params: Vec<(Interned, Type)> =
                method.params.iter().map(|p| (p.name, p.ty.clone())).collect();
            let scope = self.table.scopes().current();
            let symbol = Symbol::new(mangled, SymbolKind::Function, method.return_type.clone(), false, true, scope)
                .with_extra(SymbolExtra::Function { params });
            if self.table.define(symbol).is_none() {
                self.error(format!("Function {mangled} already defined in this scope"), method.loc);
            }

            self.table.enter_struct_scope(i.struct_name);
            self.table.enter_function_scope(method.return_type.clone());
            self.define_params(&method.params);
            self.check_block(&method.body);
            self.table.exit_scope();
            self.table.exit_scope();
        }
    }

    fn register_extern_function(&mut self, ef: &ExternFunctionItem) {
        let params: Vec<(Interned, Type)> = ef.params.iter().map(|p| (p.name, p.ty.clone())).collect();
        let scope = self.table.scopes().current();
        let symbol = Symbol::new(ef.name, SymbolKind::Function, ef.return_type.clone(), false, true, scope)
            .with_extra(SymbolExtra::Function { params });
        if self.table.define(symbol).is_none() {
            self.error(format!("Function {} already defined in this scope", ef.name), ef.loc);
        }
    }

    fn analyze_top_level_function(&mut self, f: &FunctionItem) {
        let params: Vec<(Interned, Type)> = f.params.iter().map(|p| (p.name, p.ty.clone())).collect();
        let scope = self.table.scopes().current();
        let symbol = Symbol::new(f.name, SymbolKind::Function, f.return_type.clone(), false, true, scope)
            .with_extra(SymbolExtra::Function { params });
        if self.table.define(symbol).is_none() {
            self.error(format!("Function {} already defined in this scope", f.name), f.loc);
        }

        self.table.enter_function_scope(f.return_type.clone());
        self.define_params(&f.params);
        self.check_block(&f.body);
        self.table.exit_scope();
    }

    /// Shared by plain functions and impl methods: defines each
    /// parameter in the current (function) scope, enforcing the
    /// `self`-parameter-matches-enclosing-struct rule where it
    /// applies.
    fn define_params(&mut self, params: &[Param]) {
        for p in params {
            if p.name.as_str() == "self" {
                if let Type::Struct { name } = &p.ty {
                    if let Some(enclosing) = self.table.current_struct() {
                        if *name != enclosing {
                            self.error("self parameter type must match implementing struct", p.loc);
                        }
                    }
                }
            }
            let scope = self.table.scopes().current();
            let symbol = Symbol::new(p.name, SymbolKind::Parameter, p.ty.clone(), p.is_mutable, true, scope);
            if self.table.define(symbol).is_none() {
                self.error(format!("Parameter {} already defined in this scope", p.name), p.loc);
            }
        }
    }

    // ---- statements ---------------------------------------------------

    fn check_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
        if let Some(final_expr) = &block.final_expr {
            // Analyzed for its own internal diagnostics; its value is
            // never propagated out of the block.
            self.check_expr(final_expr);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let(l) => self.check_let(l),
            Stmt::If(i) => self.check_if(i),
            Stmt::While(w) => self.check_while(w),
            Stmt::For(f) => self.check_for(f),
            Stmt::Loop(l) => self.check_loop(l),
            Stmt::Return(r) => self.check_return(r),
            Stmt::Break(loc) => {
                if self.loop_depth == 0 {
                    self.error("Break statement outside loop", *loc);
                }
            }
            Stmt::Continue(loc) => {
                if self.loop_depth == 0 {
                    self.error("Continue statement outside loop", *loc);
                }
            }
            Stmt::Block(b) => {
                self.table.enter_scope(ScopeKind::Block);
                self.check_block(b);
                self.table.exit_scope();
            }
            Stmt::Expr(e) => {
                self.check_expr(e);
            }
        }
    }

    fn check_let(&mut self, l: &jfmc_ast::LetStmt) {
        if l.declared_type.is_none() {
            self.error(format!("Variable {} requires explicit type declaration", l.name), l.loc);
        }

        let init_ty = l.init.as_ref().map(|e| self.check_expr(e));

        if let (Some(declared), Some(init_ty)) = (&l.declared_type, &init_ty) {
            if !assignable(init_ty, declared) {
                self.error_with_note(
                    "Type mismatch in variable declaration",
                    format!("expected {declared}, found {init_ty}"),
                    l.loc,
                );
            }
        }

        let effective_ty = l
            .declared_type
            .clone()
            .or(init_ty)
            .unwrap_or(Type::I32);

        let scope = self.table.scopes().current();
        let symbol = Symbol::new(l.name, SymbolKind::Variable, effective_ty, l.is_mutable, l.init.is_some(), scope);
        if self.table.define(symbol).is_none() {
            self.error(format!("Variable {} already defined in this scope", l.name), l.loc);
        }
    }

    fn check_if(&mut self, i: &IfStmt) {
        let cond_ty = self.check_expr(&i.condition);
        if cond_ty != Type::Bool {
            self.error("If/While condition must be boolean", i.loc);
        }

        self.table.enter_scope(ScopeKind::Block);
        self.check_block(&i.then_block);
        self.table.exit_scope();

        match &i.else_branch {
            Some(jfmc_ast::ElseBranch::Block(b)) => {
                self.table.enter_scope(ScopeKind::Block);
                self.check_block(b);
                self.table.exit_scope();
            }
            Some(jfmc_ast::ElseBranch::If(inner)) => self.check_if(inner),
            None => {}
        }
    }

    fn check_while(&mut self, w: &WhileStmt) {
        let cond_ty = self.check_expr(&w.condition);
        if cond_ty != Type::Bool {
            self.error("If/While condition must be boolean", w.loc);
        }
        self.table.enter_scope(ScopeKind::Loop);
        self.loop_depth += 1;
        self.check_block(&w.body);
        self.loop_depth -= 1;
        self.table.exit_scope();
    }

    fn check_for(&mut self, f: &ForStmt) {
        let start_ty = self.check_expr(&f.start);
        let end_ty = self.check_expr(&f.end);
        if !start_ty.is_integral() || !end_ty.is_integral() {
            self.error("For loop range must be integral", f.loc);
        }

        self.table.enter_scope(ScopeKind::Loop);
        self.loop_depth += 1;
        let scope = self.table.scopes().current();
        let symbol = Symbol::new(f.var_name, SymbolKind::Variable, Type::I32, false, true, scope);
        if self.table.define(symbol).is_none() {
            self.error(format!("Variable {} already defined in this scope", f.var_name), f.loc);
        }
        self.check_block(&f.body);
        self.loop_depth -= 1;
        self.table.exit_scope();
    }

    fn check_loop(&mut self, l: &LoopStmt) {
        self.table.enter_scope(ScopeKind::Loop);
        self.loop_depth += 1;
        self.check_block(&l.body);
        self.loop_depth -= 1;
        self.table.exit_scope();
    }

    fn check_return(&mut self, r: &ReturnStmt) {
        if !self.table.in_function() {
            self.error("Return statement outside function", r.loc);
            if let Some(v) = &r.value {
                self.check_expr(v);
            }
            return;
        }

        let return_ty = self.table.return_type().unwrap_or(Type::Void);
        match &r.value {
            Some(value) => {
                let value_ty = self.check_expr(value);
                if return_ty.is_void() || !assignable(&value_ty, &return_ty) {
                    self.error_with_note(
                        "Return type mismatch",
                        format!("expected {return_ty}, found {value_ty}"),
                        r.loc,
                    );
                }
            }
            None => {
                if !return_ty.is_void() {
                    self.error_with_note(
                        "Return type mismatch",
                        format!("expected {return_ty}, found void"),
                        r.loc,
                    );
                }
            }
        }
    }

    // ---- expressions ----------------------------------------------------

    fn check_expr(&mut self, e: &Expr) -> Type {
        if let Some(cached) = e.cached_type() {
            return cached;
        }
        let ty = self.compute_expr_type(e);
        e.cache_type(ty.clone());
        ty
    }

    fn compute_expr_type(&mut self, e: &Expr) -> Type {
        match &e.kind {
            ExprKind::Literal(lit) => match lit {
                Literal::Int(_) => Type::I32,
                Literal::Float(_) => Type::F32,
                Literal::Bool(_) => Type::Bool,
                Literal::Char(_) => Type::Char,
                Literal::Str(_) => Type::Str,
            },
            ExprKind::Identifier(name) => self.check_identifier(*name, e.loc),
            ExprKind::BinaryOp(b) => self.check_binary_op(b, e.loc),
            ExprKind::UnaryOp(u) => self.check_unary_op(u, e.loc),
            ExprKind::Cast(c) => self.check_cast(c),
            ExprKind::Call(c) => self.check_call(c, e.loc),
            ExprKind::Index(i) => self.check_index(i, e.loc),
            ExprKind::Field(f) => self.check_field(f, e.loc),
            ExprKind::Assignment(a) => self.check_assignment(a, e.loc),
            ExprKind::ArrayLiteral(elems) => self.check_array_literal(elems, e.loc),
            ExprKind::StructLiteral(s) => self.check_struct_literal(s, e.loc),
        }
    }

    fn check_identifier(&mut self, name: Interned, loc: Location) -> Type {
        if name.as_str() == "self" {
            return match self.table.current_struct() {
                Some(struct_name) => Type::struct_named(struct_name.as_str()),
                None => {
                    self.error("Undefined variable: self", loc);
                    Type::I32
                }
            };
        }

        match self.table.lookup(name) {
            Some(sym) => {
                if !sym.is_initialized.get() {
                    self.error(format!("Use of uninitialized variable: {name}"), loc);
                }
                sym.ty.clone()
            }
            None => {
                self.error(format!("Undefined variable: {name}"), loc);
                Type::I32
            }
        }
    }

    fn check_binary_op(&mut self, b: &BinaryOpExpr, loc: Location) -> Type {
        let left = self.check_expr(&b.left);
        let right = self.check_expr(&b.right);

        if b.op.is_arithmetic() {
            if !left.is_numeric() || !right.is_numeric() {
                self.error("Arithmetic operation requires numeric types", loc);
            }
            arithmetic_result(&left, &right)
        } else if b.op.is_relational() {
            if !left.is_numeric() || !right.is_numeric() {
                self.error("Comparison requires numeric types", loc);
            }
            Type::Bool
        } else if b.op.is_equality() {
            if left != right {
                self.error("Equality comparison requires same types", loc);
            }
            Type::Bool
        } else if b.op.is_logical() {
            if left != Type::Bool || right != Type::Bool {
                self.error("Logical operation requires boolean types", loc);
            }
            Type::Bool
        } else {
            debug_assert!(b.op.is_bitwise());
            if !left.is_integral() || !right.is_integral() {
                self.error("Bitwise operation requires integral types", loc);
            }
            left
        }
    }

    fn check_unary_op(&mut self, u: &UnaryOpExpr, loc: Location) -> Type {
        let operand = self.check_expr(&u.operand);
        match u.op {
            UnOp::Neg => {
                if !operand.is_numeric() {
                    self.error("Negation requires numeric type", loc);
                }
                operand
            }
            UnOp::Not => {
                if operand != Type::Bool {
                    self.error("Logical NOT requires boolean type", loc);
                }
                Type::Bool
            }
            UnOp::Deref => match operand.dereference() {
                Some(inner) => inner.clone(),
                None => {
                    self.error("Cannot dereference non-pointer type", loc);
                    Type::I32
                }
            },
            UnOp::Ref { is_mut } => Type::reference(operand, is_mut),
        }
    }

    fn check_cast(&mut self, c: &CastExpr) -> Type {
        // Operand is checked so its own internal errors surface, but
        // the cast itself is unchecked: the target type is adopted
        // unconditionally, any type to any type.
        self.check_expr(&c.operand);
        c.target_type.clone()
    }

    fn check_call(&mut self, c: &CallExpr, loc: Location) -> Type {
        if let ExprKind::Field(field_expr) = &c.callee.kind {
            return self.check_method_call(field_expr, &c.args, loc);
        }

        if let ExprKind::Identifier(name) = &c.callee.kind {
            if let Some(builtin) = self.check_builtin_call(name.as_str(), &c.args, loc) {
                return builtin;
            }
            return self.check_plain_call(*name, &c.args, loc);
        }

        self.error("Undefined function: <expression>", loc);
        for arg in &c.args {
            self.check_expr(arg);
        }
        Type::I32
    }

    fn check_method_call(&mut self, field_expr: &FieldExpr, args: &[Expr], loc: Location) -> Type {
        let obj_ty = self.check_expr(&field_expr.object);
        let deref_ty = obj_ty.auto_deref_once().clone();

        let struct_name = match &deref_ty {
            Type::Struct { name } => *name,
            _ => {
                self.error("Cannot access field of non-struct type", loc);
                for arg in args {
                    self.check_expr(arg);
                }
                return Type::I32;
            }
        };

        let mangled = Interned::intern(&format!("{}::{}", struct_name, field_expr.field));
        let Some(method) = self.table.lookup_function(mangled) else {
            self.error(format!("Undefined method: {}", field_expr.field), loc);
            for arg in args {
                self.check_expr(arg);
            }
            return Type::I32;
        };
        let SymbolExtra::Function { params } = &method.extra else {
            unreachable!("function symbols always carry SymbolExtra::Function")
        };
        let return_ty = method.ty.clone();
        let param_types: Vec<Type> = params.iter().skip(1).map(|(_, ty)| ty.clone()).collect();
        let expected = param_types.len();
        let method_name = field_expr.field;

        if args.len() != expected {
            self.error(
                format!("Method {method_name} expects {expected} arguments, got {}", args.len()),
                loc,
            );
        }

        for (i, arg) in args.iter().enumerate() {
            let arg_ty = self.check_expr(arg);
            if let Some(expected_ty) = param_types.get(i) {
                if !assignable(&arg_ty, expected_ty) {
                    self.error(format!("Argument {} type mismatch in call to {method_name}", i + 1), loc);
                }
            }
        }

        return_ty
    }

    /// Dispatches the built-in `println`/`print`/`sqrt` calls.
    /// Returns `None` if `name` isn't one of these, so the caller
    /// falls through to an ordinary function-call lookup.
    fn check_builtin_call(&mut self, name: &str, args: &[Expr], loc: Location) -> Option<Type> {
        match name {
            "println" => {
                if args.len() > 1 {
                    self.error(format!("Function println expects 1 arguments, got {}", args.len()), loc);
                }
                for arg in args {
                    self.check_expr(arg);
                }
                Some(Type::Void)
            }
            "print" => {
                if args.len() != 1 {
                    self.error(format!("Function print expects 1 arguments, got {}", args.len()), loc);
                }
                for arg in args {
                    self.check_expr(arg);
                }
                Some(Type::Void)
            }
            "sqrt" => {
                if args.len() != 1 {
                    self.error(format!("Function sqrt expects 1 arguments, got {}", args.len()), loc);
                    for arg in args {
                        self.check_expr(arg);
                    }
                    return Some(Type::F32);
                }
                let arg_ty = self.check_expr(&args[0]);
                if !arg_ty.is_numeric() {
                    self.error("Arithmetic operation requires numeric types", loc);
                }
                Some(Type::F32)
            }
            _ => None,
        }
    }

    fn check_plain_call(&mut self, name: Interned, args: &[Expr], loc: Location) -> Type {
        let Some(func) = self.table.lookup_function(name) else {
            self.error(format!("Undefined function: {name}"), loc);
            for arg in args {
                self.check_expr(arg);
            }
            return Type::I32;
        };

        let SymbolExtra::Function { params } = &func.extra else {
            unreachable!("function symbols always carry SymbolExtra::Function")
        };
        let return_ty = func.ty.clone();
        let param_types: Vec<Type> = params.iter().map(|(_, ty)| ty.clone()).collect();
        let expected = param_types.len();

        if args.len() != expected {
            self.error(format!("Function {name} expects {expected} arguments, got {}", args.len()), loc);
        }

        for (i, arg) in args.iter().enumerate() {
            let arg_ty = self.check_expr(arg);
            if let Some(expected_ty) = param_types.get(i) {
                if !assignable(&arg_ty, expected_ty) {
                    self.error(format!("Argument {} type mismatch in call to {name}", i + 1), loc);
                }
            }
        }

        return_ty
    }

    fn check_index(&mut self, i: &IndexExpr, loc: Location) -> Type {
        let obj_ty = self.check_expr(&i.object);
        let idx_ty = self.check_expr(&i.index);

        if !idx_ty.is_integral() {
            self.error("Array index must be integral type", loc);
        }

        match obj_ty.auto_deref_once() {
            Type::Array { element, .. } => (**element).clone(),
            Type::Pointer { pointed } => (**pointed).clone(),
            _ => {
                self.error("Cannot index non-array or pointer type", loc);
                Type::I32
            }
        }
    }

    fn check_field(&mut self, f: &FieldExpr, loc: Location) -> Type {
        let obj_ty = self.check_expr(&f.object);
        let deref_ty = obj_ty.auto_deref_once().clone();

        let struct_name = match &deref_ty {
            Type::Struct { name } => *name,
            _ => {
                self.error("Cannot access field of non-struct type", loc);
                return Type::I32;
            }
        };

        let Some(struct_sym) = self.table.lookup_struct(struct_name) else {
            self.error(format!("Undefined struct: {struct_name}"), loc);
            return Type::I32;
        };

        let SymbolExtra::Struct { fields } = &struct_sym.extra else {
            unreachable!("struct symbols always carry SymbolExtra::Struct")
        };

        match fields.iter().find(|(name, _)| *name == f.field) {
            Some((_, ty)) => ty.clone(),
            None => {
                self.error(format!("Struct {struct_name} has no field {}", f.field), loc);
                Type::I32
            }
        }
    }

    fn check_assignment(&mut self, a: &AssignmentExpr, loc: Location) -> Type {
        let target_ty = self.check_expr(&a.target);
        let value_ty = self.check_expr(&a.value);

        if !assignable(&value_ty, &target_ty) {
            self.error_with_note(
                "Type mismatch in assignment",
                format!("expected {target_ty}, found {value_ty}"),
                loc,
            );
        }

        if let Some(sym) = self.assignment_target_symbol(&a.target) {
            if !sym.is_mutable {
                self.error("Cannot assign to immutable variable", loc);
            }
        }

        target_ty
    }

    /// The underlying variable symbol of an assignment target, if the
    /// target is a plain identifier or an index into one. The
    /// mutability check applies only to those two shapes, not to a
    /// field-access target.
    fn assignment_target_symbol(&self, target: &Expr) -> Option<&Symbol> {
        match &target.kind {
            ExprKind::Identifier(name) => self.table.lookup(*name),
            ExprKind::Index(idx) => self.assignment_target_symbol(&idx.object),
            _ => None,
        }
    }

    fn check_array_literal(&mut self, elems: &[Expr], loc: Location) -> Type {
        if elems.is_empty() {
            self.error("Cannot infer type of empty array literal", loc);
            return Type::array(Type::I32, 0);
        }

        let element_ty = self.check_expr(&elems[0]);
        for elem in &elems[1..] {
            let ty = self.check_expr(elem);
            if ty != element_ty {
                self.error("Array literal elements must have same type", loc);
            }
        }
        Type::array(element_ty, elems.len() as u64)
    }

    fn check_struct_literal(&mut self, s: &StructLiteralExpr, loc: Location) -> Type {
        let Some(struct_sym) = self.table.lookup_struct(s.struct_name) else {
            self.error(format!("Undefined struct: {}", s.struct_name), loc);
            for (_, value) in &s.fields {
                self.check_expr(value);
            }
            return Type::struct_named(s.struct_name.as_str());
        };

        let SymbolExtra::Struct { fields: declared } = &struct_sym.extra else {
            unreachable!("struct symbols always carry SymbolExtra::Struct")
        };
        let declared = declared.clone();

        for (field_name, value) in &s.fields {
            let value_ty = self.check_expr(value);
            match declared.iter().find(|(name, _)| name == field_name) {
                Some((_, declared_ty)) => {
                    if !assignable(&value_ty, declared_ty) {
                        self.error(
                            format!("Type mismatch for field {field_name} in struct literal"),
                            loc,
                        );
                    }
                }
                None => {
                    self.error(format!("Unknown field {field_name} in struct {}", s.struct_name), loc);
                }
            }
        }

        // Missing fields are not enforced; an under-initialized
        // struct literal is left zero-initialized by the emitted C
        // compound literal, matching C's own semantics.
        Type::struct_named(s.struct_name.as_str())
    }
}
