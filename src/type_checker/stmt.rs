//! Typing rules for declarations and statements.

use tracing::{error, trace};

use crate::ast::{
    ast::{Decl, FnDecl, Program, VarDecl},
    expressions::Expr,
    statements::{Stmt, StmtKind},
};

use super::{data_types::TypeId, diagnostics::Construct, type_analysis::TypeAnalysis};

impl Program {
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) {
        for decl in &self.globals {
            decl.type_analysis(ta);
        }

        let void = ta.types_mut().void();
        ta.set_node_type(self.id, void);
    }
}

impl Decl {
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) {
        match self {
            Decl::Var(var) => var.type_analysis(ta),
            Decl::Fn(func) => func.type_analysis(ta),
        }
    }
}

impl VarDecl {
    /// Declarations are never used as values.
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) {
        let void = ta.types_mut().void();
        ta.set_node_type(self.id, void);
    }
}

impl FnDecl {
    /// Builds a fresh `Fn` type from the annotations and walks the body with
    /// it as the current function type.
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) {
        let formals = self
            .formals
            .iter()
            .map(|formal| formal.ty.data_type(ta.types_mut()))
            .collect();
        let ret = self.ret.data_type(ta.types_mut());
        let fn_type = ta.types_mut().function(formals, ret);

        trace!(name = %self.name.name, ty = %ta.types().display(fn_type), "entering function");
        ta.set_current_fn_type(Some(fn_type));

        for formal in &self.formals {
            formal.type_analysis(ta);
        }
        for stmt in &self.body {
            stmt.type_analysis(ta);
        }

        ta.set_current_fn_type(None);
        ta.set_node_type(self.id, fn_type);
    }
}

impl Stmt {
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) {
        let ty = match &self.kind {
            StmtKind::VarDecl(var) => {
                var.type_analysis(ta);
                ta.types_mut().void()
            }
            StmtKind::Assign(exp) => {
                let ty = exp.type_analysis(ta);
                void_unless_error(ta, ty)
            }
            StmtKind::Read(dst) => read(ta, dst),
            StmtKind::Write(src) => write(ta, src),
            StmtKind::PostInc(lval) | StmtKind::PostDec(lval) => {
                let ty = lval.type_analysis(ta);
                if !ty.is_error() && !ta.types().is_int(ty) {
                    ta.err_math_operand(&lval.span);
                }
                ta.types_mut().void()
            }
            StmtKind::If { cond, body } => {
                let ty = condition(ta, Construct::If, cond);
                block(ta, body);
                ty
            }
            StmtKind::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let ty = condition(ta, Construct::IfElse, cond);
                block(ta, then_body);
                block(ta, else_body);
                ty
            }
            StmtKind::While { cond, body } => {
                let ty = condition(ta, Construct::While, cond);
                block(ta, body);
                ty
            }
            StmtKind::Return(value) => self.ret(ta, value.as_ref()),
            StmtKind::Call(call) => {
                call.type_analysis(ta);
                ta.types_mut().void()
            }
        };

        ta.set_node_type(self.id, ty);
    }

    fn ret(&self, ta: &mut TypeAnalysis, value: Option<&Expr>) -> TypeId {
        let value_ty = value.map(|exp| exp.type_analysis(ta));

        let Some(ret) = ta
            .current_fn_type()
            .and_then(|fn_type| ta.types().as_fn(fn_type))
            .map(|sig| sig.ret)
        else {
            error!(position = %self.span.start, "return outside of a function body");
            return ta.types().error();
        };

        let returns_void = ta.types().is_void(ret);

        match (value, value_ty) {
            (Some(exp), Some(_)) if returns_void => {
                ta.err_extra_ret_value(&exp.span);
                ta.types().error()
            }
            // An erroneous value was already reported where it occurred.
            (Some(exp), Some(ty)) if !ty.is_error() && ty != ret => {
                ta.err_ret_wrong(&exp.span);
                ta.types().error()
            }
            (None, _) if !returns_void => {
                ta.err_ret_empty(&self.span);
                ta.types().error()
            }
            _ => ta.types_mut().void(),
        }
    }
}

fn block(ta: &mut TypeAnalysis, body: &[Stmt]) {
    for stmt in body {
        stmt.type_analysis(ta);
    }
}

fn void_unless_error(ta: &mut TypeAnalysis, ty: TypeId) -> TypeId {
    if ty.is_error() {
        ty
    } else {
        ta.types_mut().void()
    }
}

/// Checks a branch or loop condition, returning the construct's own type.
fn condition(ta: &mut TypeAnalysis, construct: Construct, cond: &Expr) -> TypeId {
    let ty = cond.type_analysis(ta);

    if ty.is_error() {
        return ty;
    }

    if ta.types().is_bool(ty) {
        ta.types_mut().void()
    } else {
        ta.err_cond(construct, &cond.span);
        ta.types().error()
    }
}

fn read(ta: &mut TypeAnalysis, dst: &Expr) -> TypeId {
    let ty = dst.type_analysis(ta);

    if ta.types().is_fn(ty) {
        ta.err_assign_fn(&dst.span);
        ta.types().error()
    } else if ta.types().is_ptr(ty) {
        ta.err_read_ptr(&dst.span);
        ta.types().error()
    } else {
        void_unless_error(ta, ty)
    }
}

fn write(ta: &mut TypeAnalysis, src: &Expr) -> TypeId {
    let ty = src.type_analysis(ta);

    if ta.types().is_fn(ty) {
        ta.err_write_fn(&src.span);
        ta.types().error()
    } else if ta.types().is_void(ty) {
        ta.err_write_void(&src.span);
        ta.types().error()
    } else if ta.types().is_ptr(ty) {
        ta.err_write_ptr(&src.span);
        ta.types().error()
    } else {
        void_unless_error(ta, ty)
    }
}
