use crate::{
    ast::{
        ast::Ident,
        expressions::{AssignExpr, BinaryOp, CallExpr, Expr, ExprKind, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_ident(parser: &mut Parser) -> Result<Ident, Error> {
    let error = parser.unexpected("expected identifier");
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    Ok(Ident::new(parser.advance_id(), token.span, token.value))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let kind = match token.kind {
        TokenKind::IntLiteral => match token.value.parse::<i32>() {
            Ok(value) => ExprKind::IntLit(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::ShortLiteral => match token.value.parse::<i16>() {
            Ok(value) => ExprKind::ShortLit(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError {
                        token: format!("{}S", token.value),
                    },
                    token.span.start,
                ))
            }
        },
        TokenKind::String => ExprKind::StrLit(token.value.clone()),
        TokenKind::True => ExprKind::True,
        TokenKind::False => ExprKind::False,
        TokenKind::Identifier => ExprKind::Id(parse_ident(parser)?),
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: token.value },
                token.span.start,
            ))
        }
    };

    if !matches!(kind, ExprKind::Id(_)) {
        parser.advance();
    }

    Ok(Expr {
        id: parser.advance_id(),
        span: token.span,
        kind,
    })
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(op) = BinaryOp::from_token(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value,
            },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: left.span.to(&right.span),
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(left),
            rhs: Box::new(right),
        },
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = if operator_token.kind == TokenKind::Not {
        UnaryOp::Not
    } else {
        UnaryOp::Negate
    };
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: operator_token.span.to(&rhs.span),
        kind: ExprKind::Unary {
            op,
            operand: Box::new(rhs),
        },
    })
}

pub fn parse_ref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let ident = parse_ident(parser)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: ExprKind::Ref(ident),
    })
}

pub fn parse_deref_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let ident = parse_ident(parser)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: ExprKind::Deref(ident),
    })
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    if !left.is_lval() {
        return Err(parser.unexpected("left side of an assignment must be a variable or a dereference"));
    }

    parser.advance();
    // One step below assignment, so `a = b = c` groups to the right
    let rhs = parse_expr(parser, BindingPower::Comma)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: left.span.to(&rhs.span),
        kind: ExprKind::Assign(AssignExpr {
            dst: Box::new(left),
            src: Box::new(rhs),
        }),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let ExprKind::Id(callee) = left.kind else {
        return Err(parser.unexpected("only a function name can be called"));
    };

    parser.advance();

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expr(parser, BindingPower::Comma)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in argument list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr {
        id: parser.advance_id(),
        span: parser.span_from(left.span.start),
        kind: ExprKind::Call(CallExpr { callee, args }),
    })
}
