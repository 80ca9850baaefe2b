//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Report};
use crate::type_checker::diagnostics::{Construct, Diagnostic, DiagnosticKind};
use crate::{Position, Span};
use std::rc::Rc;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.cmm".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.to_string(), "unexpected token: \"identifier\" at test.cmm:42");
}

#[test]
fn test_unexpected_token_tips() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        position(0),
    );
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `}`, did you miss a semicolon?"
    );

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: "5".to_string(),
            message: "expected an identifier".to_string(),
        },
        position(0),
    );
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected token: `5`, expected an identifier"
    );
}

#[test]
fn test_number_parse_error() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999".to_string(),
        },
        position(3),
    );

    assert_eq!(error.get_error_name(), "NumberParseError");
    assert!(error.get_tip().to_string().contains("99999999999"));
}

#[test]
fn test_name_analysis_errors() {
    let cases = [
        (
            ErrorImpl::VariableAlreadyDeclared {
                variable: "x".to_string(),
            },
            "VariableAlreadyDeclared",
            "`x` is multiply declared",
        ),
        (
            ErrorImpl::VariableNotDeclared {
                variable: "y".to_string(),
            },
            "VariableNotDeclared",
            "`y` is not declared",
        ),
        (
            ErrorImpl::InvalidVariableType {
                variable: "v".to_string(),
            },
            "InvalidVariableType",
            "`v` cannot be declared with type `void`",
        ),
    ];

    for (kind, name, tip) in cases {
        let error = Error::new(kind, position(0));
        assert_eq!(error.get_error_name(), name);
        assert_eq!(error.get_tip().to_string(), tip);
    }
}

#[test]
fn test_error_kind_is_preserved() {
    let kind = ErrorImpl::VariableNotDeclared {
        variable: "z".to_string(),
    };
    let error = Error::new(kind.clone(), position(0));

    assert_eq!(error.get_kind(), &kind);
}

fn report_name<R: Report>(report: &R) -> String {
    report.get_error_name().to_string()
}

#[test]
fn test_report_is_shared_with_diagnostics() {
    let span = Span {
        start: position(7),
        end: position(9),
    };
    let diagnostic = Diagnostic::new(DiagnosticKind::CondType(Construct::While), span);
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        position(1),
    );

    assert_eq!(report_name(&diagnostic), "CondType");
    assert_eq!(report_name(&error), "UnrecognisedToken");
    assert_eq!(Report::get_position(&diagnostic).0, 7);
    assert_eq!(
        diagnostic.get_tip().to_string(),
        "Non-bool expression used as a while condition"
    );
    assert_eq!(
        diagnostic.to_string(),
        "Non-bool expression used as a while condition at test.cmm:7"
    );
}
