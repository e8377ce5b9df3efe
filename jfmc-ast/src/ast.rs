//! The AST produced by the parser and annotated in place by the
//! semantic analyzer.
//!
//! Rather than one tagged union over every node kind (the source's
//! `AstNodeType` discriminator-and-union idiom), the tree is split into
//! three enums along the grammar's own declaration/statement/expression
//! boundary: [`Item`] (things that appear only at the top level or
//! inside an `impl`), [`Stmt`], and [`Expr`]. `match` exhaustiveness
//! then catches, at compile time, a statement handler that forgot an
//! expression kind or vice versa — a mistake the single-union original
//! can only catch by inspection.

use jfmc_util::{Location, Symbol};
use std::cell::RefCell;

/// A whole compiled source file: a flat sequence of top-level items.
/// A bare top-level `let` (the grammar permits one) is represented as
/// `Item::Stmt`, since SL's grammar treats "everything else" at the
/// top level as a statement rather than inventing a sixth item kind
/// for it.
#[derive(Debug, Clone)]
pub struct Program {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Function(FunctionItem),
    Struct(StructItem),
    Impl(ImplItem),
    Include(IncludeItem),
    ExternFunction(ExternFunctionItem),
    Stmt(Stmt),
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: Symbol,
    pub ty: Type,
    pub is_mutable: bool,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct FunctionItem {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: Block,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: Symbol,
    pub ty: Type,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct StructItem {
    pub name: Symbol,
    pub fields: Vec<FieldDecl>,
    /// `extern struct Name;` — opaque, no fields, no emitted typedef;
    /// the user's own `#include` is assumed to supply the definition.
    pub is_extern: bool,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct ImplItem {
    pub struct_name: Symbol,
    pub methods: Vec<FunctionItem>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct IncludeItem {
    pub path: String,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct ExternFunctionItem {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub loc: Location,
}

/// A block: a straight-line sequence of statements, optionally ending
/// in a value-producing expression with no trailing semicolon.
/// `final_expr` is kept on the node but its type is never propagated
/// as the block's value anywhere the block sits in expression
/// position — blocks remain statements despite the syntax permitting
/// this shape, matching the source's actual behavior rather than the
/// "obvious" fix.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub final_expr: Option<Box<Expr>>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Let(LetStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Loop(LoopStmt),
    Return(ReturnStmt),
    Break(Location),
    Continue(Location),
    Block(Block),
    Expr(Box<Expr>),
}

#[derive(Debug, Clone)]
pub struct LetStmt {
    pub name: Symbol,
    pub is_mutable: bool,
    /// `None` when the source omitted a type annotation. SL requires
    /// one explicitly; the semantic analyzer, not the parser, raises
    /// the diagnostic for a missing declaration.
    pub declared_type: Option<Type>,
    pub init: Option<Box<Expr>>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Box<Expr>,
    pub then_block: Block,
    pub else_branch: Option<ElseBranch>,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Box<Expr>,
    pub body: Block,
    pub loc: Location,
}

/// `for name [: Type] in start..end body` — half-open, `I32` iterator
/// implicitly defined in the loop's own scope.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub var_name: Symbol,
    pub declared_type: Option<Type>,
    pub start: Box<Expr>,
    pub end: Box<Expr>,
    pub body: Block,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct LoopStmt {
    pub body: Block,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Box<Expr>>,
    pub loc: Location,
}

/// An expression node. `ty` is the semantic analyzer's annotation
/// cache: `None` until the analyzer checks this node once, `Some` from
/// then on, re-read rather than recomputed on any later visit of the
/// same node.
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub loc: Location,
    ty: RefCell<Option<Type>>,
}

impl Expr {
    pub fn new(kind: ExprKind, loc: Location) -> Self {
        Self {
            kind,
            loc,
            ty: RefCell::new(None),
        }
    }

    pub fn cached_type(&self) -> Option<Type> {
        self.ty.borrow().clone()
    }

    pub fn cache_type(&self, ty: Type) {
        *self.ty.borrow_mut() = Some(ty);
    }

    /// Clears the annotation cache. Exists for tests that need to prove
    /// the cache holds no stale state across two independent uses of the
    /// same node; production code never needs to call this.
    pub fn reset_type(&self) {
        *self.ty.borrow_mut() = None;
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            loc: self.loc,
            ty: RefCell::new(self.ty.borrow().clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Assignment(AssignmentExpr),
    BinaryOp(BinaryOpExpr),
    UnaryOp(UnaryOpExpr),
    Call(CallExpr),
    Field(FieldExpr),
    Index(IndexExpr),
    Literal(Literal),
    Identifier(Symbol),
    ArrayLiteral(Vec<Expr>),
    StructLiteral(StructLiteralExpr),
    Cast(CastExpr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub target: Box<Expr>,
    pub op: AssignOp,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl BinOp {
    pub fn is_arithmetic(self) -> bool {
        matches!(self, BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem)
    }

    pub fn is_relational(self) -> bool {
        matches!(self, BinOp::Lt | BinOp::Gt | BinOp::Le | BinOp::Ge)
    }

    pub fn is_equality(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne)
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinOp::And | BinOp::Or)
    }

    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor | BinOp::Shl | BinOp::Shr
        )
    }
}

#[derive(Debug, Clone)]
pub struct BinaryOpExpr {
    pub op: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// `&` carries `is_mut` to distinguish `&x` from `&mut x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
    Deref,
    Ref { is_mut: bool },
}

#[derive(Debug, Clone)]
pub struct UnaryOpExpr {
    pub op: UnOp,
    pub operand: Box<Expr>,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone)]
pub struct FieldExpr {
    pub object: Box<Expr>,
    pub field: Symbol,
}

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

#[derive(Debug, Clone)]
pub struct StructLiteralExpr {
    pub struct_name: Symbol,
    pub fields: Vec<(Symbol, Expr)>,
}

#[derive(Debug, Clone)]
pub struct CastExpr {
    pub operand: Box<Expr>,
    pub target_type: Type,
}

use crate::types::Type;
