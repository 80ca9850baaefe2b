//! Typing rules for expressions.
//!
//! Every hook records the type it computes for its node and returns it.
//! Operands typed `Error` are passed through without a new diagnostic, and
//! any node on which a diagnostic fires is typed `Error`.

use crate::ast::{
    ast::Ident,
    expressions::{AssignExpr, BinaryOp, CallExpr, Expr, ExprKind, OpClass, UnaryOp},
};

use super::{data_types::TypeId, type_analysis::TypeAnalysis};

impl Ident {
    /// The type of the resolved symbol. Never fails.
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) -> TypeId {
        let ty = ta.symbol_type(self);
        ta.set_node_type(self.id, ty);
        ty
    }
}

impl Expr {
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) -> TypeId {
        let ty = match &self.kind {
            ExprKind::IntLit(_) => ta.types_mut().int(),
            ExprKind::ShortLit(_) => ta.types_mut().short(),
            ExprKind::StrLit(_) => ta.types_mut().string(),
            ExprKind::True | ExprKind::False => ta.types_mut().bool(),
            ExprKind::Id(ident) => ident.type_analysis(ta),
            ExprKind::Binary { op, lhs, rhs } => self.binary(ta, *op, lhs, rhs),
            ExprKind::Unary { op, operand } => self.unary(ta, *op, operand),
            ExprKind::Ref(ident) => {
                let base = ident.type_analysis(ta);
                ta.types_mut().pointer_to(base)
            }
            ExprKind::Deref(ident) => self.deref(ta, ident),
            ExprKind::Call(call) => call.type_analysis(ta),
            ExprKind::Assign(assign) => self.assign(ta, assign),
        };

        ta.set_node_type(self.id, ty);
        ty
    }

    fn binary(&self, ta: &mut TypeAnalysis, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> TypeId {
        match op.class() {
            OpClass::Arithmetic => self.arithmetic(ta, lhs, rhs),
            OpClass::Relational => self.relational(ta, lhs, rhs),
            OpClass::Equality => self.equality(ta, lhs, rhs),
            OpClass::Logical => self.logical(ta, lhs, rhs),
        }
    }

    /// `+ - * /`: both operands int. Diagnostics sit on the whole expression.
    fn arithmetic(&self, ta: &mut TypeAnalysis, lhs: &Expr, rhs: &Expr) -> TypeId {
        let operands = [lhs.type_analysis(ta), rhs.type_analysis(ta)];
        let mut tainted = false;

        for ty in operands {
            let ty = through_fn(ta, ty);
            if ty.is_error() {
                tainted = true;
            } else if !ta.types().is_int(ty) {
                ta.err_math_operand(&self.span);
                tainted = true;
            }
        }

        if tainted {
            ta.types().error()
        } else {
            ta.types_mut().int()
        }
    }

    /// `< <= > >=`: both operands int. Diagnostics sit on the offending operand.
    fn relational(&self, ta: &mut TypeAnalysis, lhs: &Expr, rhs: &Expr) -> TypeId {
        let mut tainted = false;

        for operand in [lhs, rhs] {
            let ty = operand.type_analysis(ta);
            let ty = through_fn(ta, ty);
            if ty.is_error() {
                tainted = true;
            } else if !ta.types().is_int(ty) {
                ta.err_rel_operand(&operand.span);
                tainted = true;
            }
        }

        if tainted {
            ta.types().error()
        } else {
            ta.types_mut().bool()
        }
    }

    /// `== !=`: operands int or bool, and the same type.
    fn equality(&self, ta: &mut TypeAnalysis, lhs: &Expr, rhs: &Expr) -> TypeId {
        let lhs_ty = equality_operand(ta, lhs);
        let rhs_ty = equality_operand(ta, rhs);

        match (lhs_ty, rhs_ty) {
            (Some(l), Some(r)) if l == r => ta.types_mut().bool(),
            (Some(_), Some(_)) => {
                ta.err_eq_operator(&self.span);
                ta.types().error()
            }
            _ => ta.types().error(),
        }
    }

    /// `&& ||`: both operands bool. At most one diagnostic, on the whole
    /// expression.
    fn logical(&self, ta: &mut TypeAnalysis, lhs: &Expr, rhs: &Expr) -> TypeId {
        let operands = [lhs.type_analysis(ta), rhs.type_analysis(ta)];

        if operands.iter().any(|ty| ty.is_error()) {
            return ta.types().error();
        }

        if operands.iter().all(|ty| ta.types().is_bool(*ty)) {
            ta.types_mut().bool()
        } else {
            ta.err_logic_operand(&self.span);
            ta.types().error()
        }
    }

    fn unary(&self, ta: &mut TypeAnalysis, op: UnaryOp, operand: &Expr) -> TypeId {
        let ty = operand.type_analysis(ta);

        if ty.is_error() {
            return ty;
        }

        match op {
            UnaryOp::Negate if !ta.types().is_int(ty) => {
                ta.err_math_operand(&operand.span);
                ta.types().error()
            }
            UnaryOp::Not if !ta.types().is_bool(ty) => {
                ta.err_logic_operand(&operand.span);
                ta.types().error()
            }
            _ => ty,
        }
    }

    fn deref(&self, ta: &mut TypeAnalysis, ident: &Ident) -> TypeId {
        let ty = ident.type_analysis(ta);

        if ty.is_error() {
            return ty;
        }

        match ta.types().pointee(ty) {
            Some(base) => base,
            None => {
                ta.err_deref_operand(&ident.span);
                ta.types().error()
            }
        }
    }

    /// The destination is checked first; a bad destination hides the source.
    fn assign(&self, ta: &mut TypeAnalysis, assign: &AssignExpr) -> TypeId {
        let dst = assign.dst.type_analysis(ta);
        let src = assign.src.type_analysis(ta);

        if dst.is_error() || src.is_error() {
            return ta.types().error();
        }

        if !ta.types().valid_var_type(dst) {
            ta.err_assign_operand(&assign.dst.span);
            return ta.types().error();
        }
        if !ta.types().valid_var_type(src) {
            ta.err_assign_operand(&assign.src.span);
            return ta.types().error();
        }

        if dst == src {
            dst
        } else {
            ta.err_assign_operator(&self.span);
            ta.types().error()
        }
    }
}

impl CallExpr {
    pub fn type_analysis(&self, ta: &mut TypeAnalysis) -> TypeId {
        let actuals: Vec<TypeId> = self.args.iter().map(|arg| arg.type_analysis(ta)).collect();
        let callee = self.callee.type_analysis(ta);

        let Some((formals, ret)) = ta
            .types()
            .as_fn(callee)
            .map(|sig| (sig.formals.to_vec(), sig.ret))
        else {
            ta.err_callee(&self.callee.span);
            return ta.types().error();
        };

        if actuals.len() != formals.len() {
            ta.err_arg_count(&self.callee.span);
            return ta.types().error();
        }

        for ((arg, actual), formal) in self.args.iter().zip(actuals).zip(formals) {
            if !actual.is_error() && !formal.is_error() && actual != formal {
                ta.err_arg_match(&arg.span);
            }
        }

        ret
    }
}

/// Arithmetic and relational operators check a bare function reference by
/// its return type.
fn through_fn(ta: &TypeAnalysis, ty: TypeId) -> TypeId {
    ta.types().as_fn(ty).map(|sig| sig.ret).unwrap_or(ty)
}

/// Analyzes one side of `==`/`!=`, returning its type when it is usable.
///
/// A bad operand is retyped `Error`.
fn equality_operand(ta: &mut TypeAnalysis, operand: &Expr) -> Option<TypeId> {
    let ty = operand.type_analysis(ta);

    if ty.is_error() {
        return None;
    }

    if ta.types().is_int(ty) || ta.types().is_bool(ty) {
        Some(ty)
    } else {
        ta.err_eq_operand(&operand.span);
        let error = ta.types().error();
        ta.set_node_type(operand.id, error);
        None
    }
}
