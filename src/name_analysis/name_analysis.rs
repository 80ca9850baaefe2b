use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{Decl, FnDecl, Ident, Program, VarDecl},
        expressions::{Expr, ExprKind},
        statements::{Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    type_checker::data_types::TypeRegistry,
};

use super::symbol_table::{Symbol, SymbolKind, SymbolTable};

/// A name-resolved program: every identifier carries the symbol it refers
/// to, and every symbol carries a type handle into `types`.
#[derive(Debug)]
pub struct NameAnalysis {
    pub program: Program,
    pub symbols: SymbolTable,
    pub types: TypeRegistry,
}

struct NameAnalyzer {
    symbols: SymbolTable,
    types: TypeRegistry,
    errors: Vec<Error>,
}

/// Resolves every identifier in `program`.
///
/// All errors are collected before returning; on success the program is
/// returned with its symbols attached.
pub fn analyze(mut program: Program) -> Result<NameAnalysis, Vec<Error>> {
    let mut analyzer = NameAnalyzer {
        symbols: SymbolTable::new(),
        types: TypeRegistry::new(),
        errors: vec![],
    };

    for decl in program.globals.iter_mut() {
        match decl {
            Decl::Var(var) => analyzer.var_decl(var),
            Decl::Fn(func) => analyzer.fn_decl(func),
        }
    }

    if !analyzer.errors.is_empty() {
        debug!(errors = analyzer.errors.len(), "name analysis failed");
        return Err(analyzer.errors);
    }

    trace!(symbols = analyzer.symbols.len(), "name analysis passed");
    Ok(NameAnalysis {
        program,
        symbols: analyzer.symbols,
        types: analyzer.types,
    })
}

impl NameAnalyzer {
    fn report(&mut self, error: Error) {
        debug!(%error, "name analysis error");
        self.errors.push(error);
    }

    fn var_decl(&mut self, var: &mut VarDecl) {
        if var.ty.is_void() {
            self.report(Error::new(
                ErrorImpl::InvalidVariableType {
                    variable: var.name.name.clone(),
                },
                var.name.span.start.clone(),
            ));
            return;
        }

        let symbol = Symbol {
            name: var.name.name.clone(),
            kind: SymbolKind::Var,
            ty: var.ty.data_type(&mut self.types),
            span: var.name.span.clone(),
        };

        match self.symbols.declare(symbol) {
            Ok(id) => var.name.symbol = Some(id),
            Err(error) => self.report(error),
        }
    }

    fn fn_decl(&mut self, func: &mut FnDecl) {
        let formals = func
            .formals
            .iter()
            .map(|formal| formal.ty.data_type(&mut self.types))
            .collect();
        let ret = func.ret.data_type(&mut self.types);

        let symbol = Symbol {
            name: func.name.name.clone(),
            kind: SymbolKind::Fn,
            ty: self.types.function(formals, ret),
            span: func.name.span.clone(),
        };

        // Declared before the body, so recursive calls resolve.
        match self.symbols.declare(symbol) {
            Ok(id) => func.name.symbol = Some(id),
            Err(error) => self.report(error),
        }

        self.symbols.enter_scope();
        for formal in func.formals.iter_mut() {
            self.var_decl(formal);
        }
        self.block(&mut func.body);
        self.symbols.exit_scope();
    }

    fn block(&mut self, body: &mut [Stmt]) {
        for stmt in body.iter_mut() {
            self.stmt(stmt);
        }
    }

    fn stmt(&mut self, stmt: &mut Stmt) {
        match &mut stmt.kind {
            StmtKind::VarDecl(var) => self.var_decl(var),
            StmtKind::Assign(exp)
            | StmtKind::Read(exp)
            | StmtKind::Write(exp)
            | StmtKind::PostInc(exp)
            | StmtKind::PostDec(exp)
            | StmtKind::Call(exp) => self.expr(exp),
            StmtKind::If { cond, body } | StmtKind::While { cond, body } => {
                self.expr(cond);
                self.symbols.enter_scope();
                self.block(body);
                self.symbols.exit_scope();
            }
            StmtKind::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.expr(cond);
                self.symbols.enter_scope();
                self.block(then_body);
                self.symbols.exit_scope();
                self.symbols.enter_scope();
                self.block(else_body);
                self.symbols.exit_scope();
            }
            StmtKind::Return(Some(exp)) => self.expr(exp),
            StmtKind::Return(None) => {}
        }
    }

    fn ident(&mut self, ident: &mut Ident) {
        match self.symbols.lookup(&ident.name) {
            Some(id) => ident.symbol = Some(id),
            None => self.report(Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: ident.name.clone(),
                },
                ident.span.start.clone(),
            )),
        }
    }

    fn expr(&mut self, exp: &mut Expr) {
        match &mut exp.kind {
            ExprKind::IntLit(_)
            | ExprKind::ShortLit(_)
            | ExprKind::StrLit(_)
            | ExprKind::True
            | ExprKind::False => {}
            ExprKind::Id(ident) | ExprKind::Ref(ident) | ExprKind::Deref(ident) => self.ident(ident),
            ExprKind::Binary { lhs, rhs, .. } => {
                self.expr(lhs);
                self.expr(rhs);
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Call(call) => {
                self.ident(&mut call.callee);
                for arg in call.args.iter_mut() {
                    self.expr(arg);
                }
            }
            ExprKind::Assign(assign) => {
                self.expr(&mut assign.dst);
                self.expr(&mut assign.src);
            }
        }
    }
}
