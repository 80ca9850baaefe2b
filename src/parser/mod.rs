//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a C-- [`Program`](crate::ast::ast::Program). It uses a Pratt parser
//! for expressions with proper operator precedence and handles:
//!
//! - Global declarations (variables and functions)
//! - Statement parsing (local variables, assignment, read/write, control flow)
//! - Expression parsing (binary ops, function calls, literals, `&` and `*`)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling. Every
//! node it builds receives a fresh [`NodeId`](crate::ast::ast::NodeId).

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
