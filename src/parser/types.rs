//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Basic types (`void`, `int`, `short`, `bool`, `string`)
//! - Pointer types (`int*`, `bool**`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers, with `*` acting as a postfix type operator.

use std::collections::HashMap;

use crate::{
    ast::types::{TypeNode, TypeNodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeNode, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeNode, BindingPower) -> Result<TypeNode, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Void, parse_basic_type);
    parser.type_nud(TokenKind::Int, parse_basic_type);
    parser.type_nud(TokenKind::Short, parse_basic_type);
    parser.type_nud(TokenKind::Bool, parse_basic_type);
    parser.type_nud(TokenKind::Str, parse_basic_type);
    parser.type_led(TokenKind::Star, BindingPower::Call, parse_pointer_type);
}

pub fn parse_basic_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let token = parser.advance().clone();
    let kind = match token.kind {
        TokenKind::Void => TypeNodeKind::Void,
        TokenKind::Int => TypeNodeKind::Int,
        TokenKind::Short => TypeNodeKind::Short,
        TokenKind::Bool => TypeNodeKind::Bool,
        TokenKind::Str => TypeNodeKind::Str,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value,
                    message: String::from("expected a type"),
                },
                token.span.start,
            ))
        }
    };

    Ok(TypeNode {
        span: token.span,
        kind,
    })
}

pub fn parse_pointer_type(
    parser: &mut Parser,
    left: TypeNode,
    _bp: BindingPower,
) -> Result<TypeNode, Error> {
    let star = parser.expect(TokenKind::Star)?;

    Ok(TypeNode {
        span: left.span.to(&star.span),
        kind: TypeNodeKind::Ptr(Box::new(left)),
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeNode, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected a type"));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            return Err(parser.unexpected("unexpected token in type"));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}
