//! Type annotations as written in source.
//!
//! Annotations never carry a type result of their own. Instead each one
//! produces the canonical [`TypeId`] it denotes from a [`TypeRegistry`].

use std::fmt::Display;

use crate::{
    type_checker::data_types::{BasicKind, TypeId, TypeRegistry},
    Span,
};

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub span: Span,
    pub kind: TypeNodeKind,
}

#[derive(Debug, Clone)]
pub enum TypeNodeKind {
    Void,
    Int,
    Short,
    Bool,
    Str,
    Ptr(Box<TypeNode>),
}

impl TypeNode {
    /// The canonical type this annotation denotes.
    ///
    /// Deterministic: the same annotation always yields the same handle from
    /// the same registry.
    pub fn data_type(&self, types: &mut TypeRegistry) -> TypeId {
        match &self.kind {
            TypeNodeKind::Void => types.basic(BasicKind::Void),
            TypeNodeKind::Int => types.basic(BasicKind::Int),
            TypeNodeKind::Short => types.basic(BasicKind::Short),
            TypeNodeKind::Bool => types.basic(BasicKind::Bool),
            TypeNodeKind::Str => types.basic(BasicKind::Str),
            TypeNodeKind::Ptr(base) => {
                let base = base.data_type(types);
                types.pointer_to(base)
            }
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, TypeNodeKind::Void)
    }
}

impl Display for TypeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeNodeKind::Void => write!(f, "void"),
            TypeNodeKind::Int => write!(f, "int"),
            TypeNodeKind::Short => write!(f, "short"),
            TypeNodeKind::Bool => write!(f, "bool"),
            TypeNodeKind::Str => write!(f, "string"),
            TypeNodeKind::Ptr(base) => write!(f, "{}*", base),
        }
    }
}
