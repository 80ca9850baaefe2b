//! Canonical type representations and the registry that interns them.
//!
//! Types are addressed through [`TypeId`] handles into a [`TypeRegistry`]
//! arena, so comparing two types is comparing two `u32`s:
//!
//! - `Error` lives at a reserved index and is shared by every tainted node
//! - `Basic` types are interned by kind, on first request
//! - `Ptr` types are interned by the *identity* of their base type
//! - `Fn` types are never interned; every request appends a fresh entry
//!
//! Because `Fn` types are fresh, two functions with identical signatures
//! never compare equal. Callers rely on this: a function value is never
//! assignment-compatible with anything.

use std::{collections::HashMap, fmt::Display};

/// Handle to a type stored in a [`TypeRegistry`].
///
/// Equality of two handles is identity equality of the underlying types.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    /// The canonical error type. Reserved by [`TypeRegistry::new`].
    pub const ERROR: TypeId = TypeId(0);

    #[inline]
    pub fn is_error(self) -> bool {
        self == Self::ERROR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Int,
    Short,
    Bool,
    Str,
    Void,
}

impl Display for BasicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BasicKind::Int => "int",
            BasicKind::Short => "short",
            BasicKind::Bool => "bool",
            BasicKind::Str => "string",
            BasicKind::Void => "void",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Error,
    Basic(BasicKind),
    Ptr(TypeId),
    Fn { formals: Vec<TypeId>, ret: TypeId },
}

/// Signature of a function type, borrowed out of the registry.
#[derive(Debug, Clone, Copy)]
pub struct FnSig<'a> {
    pub formals: &'a [TypeId],
    pub ret: TypeId,
}

/// Append-only arena of types.
///
/// Cloning a registry keeps every existing handle valid in the clone, which is
/// how handles created during name analysis survive into type analysis.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: Vec<DataType>,
    basics: HashMap<BasicKind, TypeId>,
    pointers: HashMap<TypeId, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        TypeRegistry {
            types: vec![DataType::Error],
            basics: HashMap::new(),
            pointers: HashMap::new(),
        }
    }

    fn push(&mut self, data_type: DataType) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data_type);
        id
    }

    pub fn error(&self) -> TypeId {
        TypeId::ERROR
    }

    pub fn basic(&mut self, kind: BasicKind) -> TypeId {
        if let Some(id) = self.basics.get(&kind) {
            return *id;
        }

        let id = self.push(DataType::Basic(kind));
        self.basics.insert(kind, id);
        id
    }

    pub fn int(&mut self) -> TypeId {
        self.basic(BasicKind::Int)
    }

    pub fn short(&mut self) -> TypeId {
        self.basic(BasicKind::Short)
    }

    pub fn bool(&mut self) -> TypeId {
        self.basic(BasicKind::Bool)
    }

    pub fn string(&mut self) -> TypeId {
        self.basic(BasicKind::Str)
    }

    pub fn void(&mut self) -> TypeId {
        self.basic(BasicKind::Void)
    }

    /// Canonical pointer to exactly the `base` instance.
    pub fn pointer_to(&mut self, base: TypeId) -> TypeId {
        if let Some(id) = self.pointers.get(&base) {
            return *id;
        }

        let id = self.push(DataType::Ptr(base));
        self.pointers.insert(base, id);
        id
    }

    /// A new function type. Never deduplicated.
    pub fn function(&mut self, formals: Vec<TypeId>, ret: TypeId) -> TypeId {
        self.push(DataType::Fn { formals, ret })
    }

    pub fn get(&self, id: TypeId) -> &DataType {
        // Handles are only minted by this registry (or a clone of it), so an
        // out-of-range handle can only come from a foreign registry.
        self.types.get(id.0 as usize).unwrap_or(&DataType::Error)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn is_error(&self, id: TypeId) -> bool {
        id.is_error()
    }

    fn is_basic(&self, id: TypeId, kind: BasicKind) -> bool {
        matches!(self.get(id), DataType::Basic(k) if *k == kind)
    }

    pub fn is_int(&self, id: TypeId) -> bool {
        self.is_basic(id, BasicKind::Int)
    }

    pub fn is_bool(&self, id: TypeId) -> bool {
        self.is_basic(id, BasicKind::Bool)
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        self.is_basic(id, BasicKind::Void)
    }

    pub fn is_ptr(&self, id: TypeId) -> bool {
        matches!(self.get(id), DataType::Ptr(_))
    }

    pub fn is_fn(&self, id: TypeId) -> bool {
        matches!(self.get(id), DataType::Fn { .. })
    }

    pub fn as_fn(&self, id: TypeId) -> Option<FnSig<'_>> {
        match self.get(id) {
            DataType::Fn { formals, ret } => Some(FnSig { formals, ret: *ret }),
            _ => None,
        }
    }

    pub fn pointee(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id) {
            DataType::Ptr(base) => Some(*base),
            _ => None,
        }
    }

    /// Anything usable as an lvalue or rvalue: not `void` and not a function.
    pub fn valid_var_type(&self, id: TypeId) -> bool {
        !self.is_void(id) && !self.is_fn(id)
    }

    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            DataType::Error => String::from("ERROR"),
            DataType::Basic(kind) => kind.to_string(),
            DataType::Ptr(base) => format!("{}*", self.display(*base)),
            DataType::Fn { formals, ret } => {
                let formals = formals
                    .iter()
                    .map(|formal| self.display(*formal))
                    .collect::<Vec<_>>()
                    .join(",");
                format!("{}->{}", formals, self.display(*ret))
            }
        }
    }
}
