//! jfmc-ast - the type tree and AST node definitions shared by the
//! parser and the semantic analyzer.
//!
//! Nothing in this crate parses or type-checks anything; it only
//! defines the shapes those stages build and walk.

mod ast;
mod types;

pub use ast::{
    AssignOp, AssignmentExpr, BinOp, BinaryOpExpr, Block, CallExpr, CastExpr, ElseBranch,
    Expr, ExprKind, ExternFunctionItem, FieldDecl, FieldExpr, ForStmt, FunctionItem, IfStmt,
    ImplItem, IncludeItem, IndexExpr, Item, Literal, LetStmt, LoopStmt, Param, Program,
    ReturnStmt, Stmt, StructItem, StructLiteralExpr, UnOp, UnaryOpExpr, WhileStmt,
};
pub use types::Type;
