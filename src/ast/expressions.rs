use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

use super::ast::{Ident, NodeId};

#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    // Literals
    IntLit(i32),
    ShortLit(i16),
    StrLit(String),
    True,
    False,

    Id(Ident),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `&x`
    Ref(Ident),
    /// `*p`
    Deref(Ident),
    Call(CallExpr),
    Assign(AssignExpr),
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Ident,
    pub args: Vec<Expr>,
}

/// `dst = src`. The parser only builds these with an lvalue `dst`.
#[derive(Debug, Clone)]
pub struct AssignExpr {
    pub dst: Box<Expr>,
    pub src: Box<Expr>,
}

impl Expr {
    /// Whether this expression may appear on the left of `=`, or as the
    /// target of `read`, `++` and `--`.
    pub fn is_lval(&self) -> bool {
        matches!(self.kind, ExprKind::Id(_) | ExprKind::Deref(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
    Divide,
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    LessEq,
    Greater,
    GreaterEq,
}

/// Which typing rule a binary operator falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpClass {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        let op = match kind {
            TokenKind::Plus => BinaryOp::Plus,
            TokenKind::Dash => BinaryOp::Minus,
            TokenKind::Star => BinaryOp::Times,
            TokenKind::Slash => BinaryOp::Divide,
            TokenKind::And => BinaryOp::And,
            TokenKind::Or => BinaryOp::Or,
            TokenKind::Equals => BinaryOp::Equals,
            TokenKind::NotEquals => BinaryOp::NotEquals,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::LessEquals => BinaryOp::LessEq,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::GreaterEquals => BinaryOp::GreaterEq,
            _ => return None,
        };
        Some(op)
    }

    pub fn class(self) -> OpClass {
        match self {
            BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Divide => {
                OpClass::Arithmetic
            }
            BinaryOp::Less | BinaryOp::LessEq | BinaryOp::Greater | BinaryOp::GreaterEq => {
                OpClass::Relational
            }
            BinaryOp::Equals | BinaryOp::NotEquals => OpClass::Equality,
            BinaryOp::And | BinaryOp::Or => OpClass::Logical,
        }
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equals => "==",
            BinaryOp::NotEquals => "!=",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Negate => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}
