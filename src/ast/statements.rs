use crate::Span;

use super::{
    ast::{NodeId, VarDecl},
    expressions::Expr,
};

#[derive(Debug, Clone)]
pub struct Stmt {
    pub id: NodeId,
    pub span: Span,
    pub kind: StmtKind,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    VarDecl(VarDecl),
    /// Holds an `ExprKind::Assign` expression.
    Assign(Expr),
    Read(Expr),
    Write(Expr),
    PostInc(Expr),
    PostDec(Expr),
    If {
        cond: Expr,
        body: Vec<Stmt>,
    },
    IfElse {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    /// Holds an `ExprKind::Call` expression.
    Call(Expr),
}
