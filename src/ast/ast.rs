use std::fmt::Display;

use crate::{name_analysis::symbol_table::SymbolId, Span};

use super::{statements::Stmt, types::TypeNode};

/// Stable identity of an AST node, handed out by the parser's id counter.
///
/// Node ids are the keys of the node to type mapping built by type analysis,
/// so two nodes never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Root of a parsed C-- file: a sequence of global declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub id: NodeId,
    pub span: Span,
    pub globals: Vec<Decl>,
}

#[derive(Debug, Clone)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
}

impl Decl {
    pub fn id(&self) -> NodeId {
        match self {
            Decl::Var(var) => var.id,
            Decl::Fn(func) => func.id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Decl::Var(var) => &var.span,
            Decl::Fn(func) => &func.span,
        }
    }

    pub fn name(&self) -> &Ident {
        match self {
            Decl::Var(var) => &var.name,
            Decl::Fn(func) => &func.name,
        }
    }
}

/// `int x;`, at global or local scope.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub id: NodeId,
    pub span: Span,
    pub ty: TypeNode,
    pub name: Ident,
}

/// A function's formal parameter. Shaped exactly like a variable declaration.
pub type FormalDecl = VarDecl;

#[derive(Debug, Clone)]
pub struct FnDecl {
    pub id: NodeId,
    pub span: Span,
    pub ret: TypeNode,
    pub name: Ident,
    pub formals: Vec<FormalDecl>,
    pub body: Vec<Stmt>,
}

/// An identifier occurrence.
///
/// `symbol` is `None` straight out of the parser and is filled in by name
/// analysis.
#[derive(Debug, Clone)]
pub struct Ident {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    pub symbol: Option<SymbolId>,
}

impl Ident {
    pub fn new(id: NodeId, span: Span, name: String) -> Self {
        Ident {
            id,
            span,
            name,
            symbol: None,
        }
    }
}
