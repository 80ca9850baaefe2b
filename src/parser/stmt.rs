use crate::{
    ast::{
        ast::{Decl, FnDecl, FormalDecl, Ident, VarDecl},
        expressions::{Expr, ExprKind},
        statements::{Stmt, StmtKind},
        types::TypeNode,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{expr::parse_ident, parser::Parser, types::parse_type};

/// Parses one global declaration: a variable or a function.
pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    if !parser.current_token_kind().is_type_keyword() {
        return Err(parser.unexpected("expected a declaration"));
    }

    let start = parser.get_position();
    let ty = parse_type(parser, BindingPower::Default)?;
    let name = parse_ident(parser)?;

    if parser.current_token_kind() == TokenKind::OpenParen {
        return parse_fn_decl(parser, start, ty, name).map(Decl::Fn);
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(Decl::Var(VarDecl {
        id: parser.advance_id(),
        span: parser.span_from(start),
        ty,
        name,
    }))
}

fn parse_fn_decl(
    parser: &mut Parser,
    start: Position,
    ret: TypeNode,
    name: Ident,
) -> Result<FnDecl, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut formals: Vec<FormalDecl> = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        let formal_start = parser.get_position();
        let ty = parse_type(parser, BindingPower::Default)?;
        let formal_name = parse_ident(parser)?;
        formals.push(VarDecl {
            id: parser.advance_id(),
            span: parser.span_from(formal_start),
            ty,
            name: formal_name,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected("expected `,` or `)` in parameter list"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FnDecl {
        id: parser.advance_id(),
        span: parser.span_from(start),
        ret,
        name,
        formals,
        body,
    })
}

/// `{ stmt* }`
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}`"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(statements)
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let kind = match parser.current_token_kind() {
        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            if !expr.is_lval() {
                return Err(parser.unexpected("only a variable or a dereference can be incremented"));
            }
            let increment = parser.advance().kind == TokenKind::PlusPlus;
            if increment {
                StmtKind::PostInc(expr)
            } else {
                StmtKind::PostDec(expr)
            }
        }
        _ if matches!(expr.kind, ExprKind::Assign(_)) => StmtKind::Assign(expr),
        _ if matches!(expr.kind, ExprKind::Call(_)) => StmtKind::Call(expr),
        _ => return Err(parser.unexpected("expected an assignment or a call")),
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind,
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.get_position();
    let ty = parse_type(parser, BindingPower::Default)?;
    let name = parse_ident(parser)?;

    let error = parser.unexpected("local functions are not allowed, expected `;`");
    parser.expect_error(TokenKind::Semicolon, Some(error))?;

    let decl = VarDecl {
        id: parser.advance_id(),
        span: parser.span_from(start.clone()),
        ty,
        name,
    };

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: StmtKind::VarDecl(decl),
    })
}

fn parse_lval(parser: &mut Parser, construct: &str) -> Result<Expr, Error> {
    let lval = parse_expr(parser, BindingPower::Default)?;
    if !lval.is_lval() {
        return Err(parser.unexpected(&format!(
            "{} expects a variable or a dereference",
            construct
        )));
    }
    Ok(lval)
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let target = parse_lval(parser, "read")?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: StmtKind::Read(target),
    })
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();
    let source = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: StmtKind::Write(source),
    })
}

fn parse_condition(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;
    Ok(cond)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let cond = parse_condition(parser)?;
    let body = parse_block(parser)?;

    let kind = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        let else_body = parse_block(parser)?;
        StmtKind::IfElse {
            cond,
            then_body: body,
            else_body,
        }
    } else {
        StmtKind::If { cond, body }
    };

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let cond = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: StmtKind::While { cond, body },
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt {
        id: parser.advance_id(),
        span: parser.span_from(start),
        kind: StmtKind::Return(value),
    })
}
