//! Name analysis for C--.
//!
//! Walks a parsed program with a chain of scopes and binds every identifier
//! occurrence to the symbol it refers to. Each symbol records its declared
//! type as a handle into the [`TypeRegistry`](crate::type_checker::data_types::TypeRegistry)
//! that type analysis later continues to use. It reports:
//!
//! - Names declared twice in the same scope
//! - Uses of undeclared names
//! - Variables and formals declared `void`

pub mod name_analysis;
pub mod symbol_table;

#[cfg(test)]
mod tests;
