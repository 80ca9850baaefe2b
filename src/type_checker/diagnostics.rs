use std::fmt::Display;

use thiserror::Error;

use crate::{
    errors::errors::{ErrorTip, Report},
    Position, Span,
};

/// The construct whose condition was not a `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    If,
    IfElse,
    While,
}

impl Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Construct::If | Construct::IfElse => write!(f, "an if"),
            Construct::While => write!(f, "a while"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("Invalid assignment operand")]
    AssignOperand,
    #[error("Invalid assignment operation")]
    AssignOperator,
    #[error("Arithmetic operator applied to invalid operand")]
    MathOperand,
    #[error("Relational operator applied to non-numeric operand")]
    RelOperand,
    #[error("Logical operator applied to non-bool operand")]
    LogicOperand,
    #[error("Invalid equality operand")]
    EqOperand,
    #[error("Invalid equality operation")]
    EqOperator,
    #[error("Invalid operand for dereference")]
    DerefOperand,
    #[error("Function call with wrong number of args")]
    ArgCount,
    #[error("Type of actual does not match type of formal")]
    ArgMatch,
    #[error("Attempt to call a non-function")]
    Callee,
    #[error("Bad return value")]
    RetWrong,
    #[error("Missing return value")]
    RetEmpty,
    #[error("Return with a value in void function")]
    ExtraRetValue,
    #[error("Non-bool expression used as {0} condition")]
    CondType(Construct),
    #[error("Attempt to output a function")]
    WriteFn,
    #[error("Attempt to write void")]
    WriteVoid,
    #[error("Attempt to output a raw pointer")]
    WritePtr,
    #[error("Attempt to read a raw pointer")]
    ReadPtr,
    #[error("Attempt to assign user input to function")]
    AssignFn,
}

/// A type error tied to the source span it was reported at.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { kind, span }
    }

    pub fn get_kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn get_position(&self) -> &Position {
        &self.span.start
    }

    pub fn get_error_name(&self) -> &str {
        match self.kind {
            DiagnosticKind::AssignOperand => "AssignOperand",
            DiagnosticKind::AssignOperator => "AssignOperator",
            DiagnosticKind::MathOperand => "MathOperand",
            DiagnosticKind::RelOperand => "RelOperand",
            DiagnosticKind::LogicOperand => "LogicOperand",
            DiagnosticKind::EqOperand => "EqOperand",
            DiagnosticKind::EqOperator => "EqOperator",
            DiagnosticKind::DerefOperand => "DerefOperand",
            DiagnosticKind::ArgCount => "ArgCount",
            DiagnosticKind::ArgMatch => "ArgMatch",
            DiagnosticKind::Callee => "Callee",
            DiagnosticKind::RetWrong => "RetWrong",
            DiagnosticKind::RetEmpty => "RetEmpty",
            DiagnosticKind::ExtraRetValue => "ExtraRetValue",
            DiagnosticKind::CondType(_) => "CondType",
            DiagnosticKind::WriteFn => "WriteFn",
            DiagnosticKind::WriteVoid => "WriteVoid",
            DiagnosticKind::WritePtr => "WritePtr",
            DiagnosticKind::ReadPtr => "ReadPtr",
            DiagnosticKind::AssignFn => "AssignFn",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        ErrorTip::Suggestion(self.kind.to_string())
    }
}

impl Report for Diagnostic {
    fn get_position(&self) -> &Position {
        Diagnostic::get_position(self)
    }
    fn get_error_name(&self) -> &str {
        Diagnostic::get_error_name(self)
    }
    fn get_tip(&self) -> ErrorTip {
        Diagnostic::get_tip(self)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.span.start)
    }
}

impl std::error::Error for Diagnostic {}
