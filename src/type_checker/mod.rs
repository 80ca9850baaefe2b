//! Type checking for C--.
//!
//! This module computes a type for every expression and statement of a
//! name-resolved program and records every violation of the language's
//! static semantics without stopping early:
//!
//! - Operator and operand compatibility
//! - Call argument counts and types
//! - Return values against the enclosing function's return type
//! - Assignment, `read` and `write` targets
//!
//! Types live in an interning [`TypeRegistry`](data_types::TypeRegistry) and
//! are compared by identity. The walk itself is split into per-node hooks for
//! expressions and for declarations and statements.

pub mod data_types;
pub mod diagnostics;
pub mod expr;
pub mod stmt;
pub mod type_analysis;
