//! Error types and error handling for the front end.
//!
//! This module defines the error types raised before type analysis runs:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and name analysis
//! - The `Report` trait shared with type diagnostics for display
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
