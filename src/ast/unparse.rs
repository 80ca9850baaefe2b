//! Renders an AST back to C-- source.
//!
//! [`unparse_typed`] produces the same text with every expression wrapped as
//! `(expr : type)`, reading the types out of a finished type analysis.

use crate::type_checker::type_analysis::{AnalysisError, TypeAnalysis};

use super::{
    ast::{Decl, FnDecl, Ident, NodeId, Program, VarDecl},
    expressions::{Expr, ExprKind},
    statements::{Stmt, StmtKind},
};

pub fn unparse(program: &Program) -> String {
    let mut unparser = Unparser::new(4, None);
    // Untyped unparsing never looks up a node type, so it cannot fail.
    match unparser.program(program) {
        Ok(()) => unparser.output,
        Err(_) => String::new(),
    }
}

pub fn unparse_typed(program: &Program, analysis: &TypeAnalysis) -> Result<String, AnalysisError> {
    let mut unparser = Unparser::new(4, Some(analysis));
    unparser.program(program)?;
    Ok(unparser.output)
}

struct Unparser<'a> {
    indent_level: usize,
    indent_size: usize,
    output: String,
    analysis: Option<&'a TypeAnalysis>,
}

impl<'a> Unparser<'a> {
    fn new(indent_size: usize, analysis: Option<&'a TypeAnalysis>) -> Self {
        Unparser {
            indent_level: 0,
            indent_size,
            output: String::new(),
            analysis,
        }
    }

    fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.indent_size)
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indented(&mut self, text: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(text);
    }

    fn write_line(&mut self, text: &str) {
        self.write_indented(text);
        self.output.push('\n');
    }

    fn annotate(&self, id: NodeId, text: String) -> Result<String, AnalysisError> {
        match self.analysis {
            Some(analysis) => {
                let ty = analysis.node_type(id)?;
                Ok(format!("({} : {})", text, analysis.types().display(ty)))
            }
            None => Ok(text),
        }
    }

    fn program(&mut self, program: &Program) -> Result<(), AnalysisError> {
        for decl in &program.globals {
            match decl {
                Decl::Var(var) => self.write_line(&var_decl(var)),
                Decl::Fn(func) => self.fn_decl(func)?,
            }
        }
        Ok(())
    }

    fn fn_decl(&mut self, func: &FnDecl) -> Result<(), AnalysisError> {
        let formals = func
            .formals
            .iter()
            .map(|formal| format!("{} {}", formal.ty, formal.name.name))
            .collect::<Vec<_>>()
            .join(", ");

        self.write_line(&format!("{} {}({}) {{", func.ret, func.name.name, formals));
        self.block(&func.body)?;
        self.write_line("}");
        Ok(())
    }

    fn block(&mut self, body: &[Stmt]) -> Result<(), AnalysisError> {
        self.indent_level += 1;
        for stmt in body {
            self.stmt(stmt)?;
        }
        self.indent_level -= 1;
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> Result<(), AnalysisError> {
        match &stmt.kind {
            StmtKind::VarDecl(var) => self.write_line(&var_decl(var)),
            StmtKind::Assign(exp) | StmtKind::Call(exp) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("{};", text));
            }
            StmtKind::Read(exp) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("read {};", text));
            }
            StmtKind::Write(exp) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("write {};", text));
            }
            StmtKind::PostInc(exp) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("{}++;", text));
            }
            StmtKind::PostDec(exp) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("{}--;", text));
            }
            StmtKind::If { cond, body } => {
                let cond = self.expr(cond)?;
                self.write_line(&format!("if ({}) {{", cond));
                self.block(body)?;
                self.write_line("}");
            }
            StmtKind::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let cond = self.expr(cond)?;
                self.write_line(&format!("if ({}) {{", cond));
                self.block(then_body)?;
                self.write_line("} else {");
                self.block(else_body)?;
                self.write_line("}");
            }
            StmtKind::While { cond, body } => {
                let cond = self.expr(cond)?;
                self.write_line(&format!("while ({}) {{", cond));
                self.block(body)?;
                self.write_line("}");
            }
            StmtKind::Return(Some(exp)) => {
                let text = self.expr(exp)?;
                self.write_line(&format!("return {};", text));
            }
            StmtKind::Return(None) => self.write_line("return;"),
        }
        Ok(())
    }

    fn ident(&self, ident: &Ident) -> Result<String, AnalysisError> {
        self.annotate(ident.id, ident.name.clone())
    }

    fn expr(&self, exp: &Expr) -> Result<String, AnalysisError> {
        let text = match &exp.kind {
            ExprKind::IntLit(value) => value.to_string(),
            ExprKind::ShortLit(value) => format!("{}S", value),
            ExprKind::StrLit(value) => format!("\"{}\"", escape(value)),
            ExprKind::True => String::from("true"),
            ExprKind::False => String::from("false"),
            // Identifiers carry their own node id, so the wrapper is skipped.
            ExprKind::Id(ident) => return self.ident(ident),
            ExprKind::Binary { op, lhs, rhs } => {
                format!("({} {} {})", self.expr(lhs)?, op, self.expr(rhs)?)
            }
            ExprKind::Unary { op, operand } => format!("{}{}", op, self.expr(operand)?),
            ExprKind::Ref(ident) => format!("&{}", self.ident(ident)?),
            ExprKind::Deref(ident) => format!("*{}", self.ident(ident)?),
            ExprKind::Call(call) => {
                let args = call
                    .args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                format!("{}({})", self.ident(&call.callee)?, args)
            }
            ExprKind::Assign(assign) => {
                format!("{} = {}", self.expr(&assign.dst)?, self.expr(&assign.src)?)
            }
        };

        self.annotate(exp.id, text)
    }
}

fn var_decl(var: &VarDecl) -> String {
    format!("{} {};", var.ty, var.name.name)
}

fn escape(value: &str) -> String {
    let mut result = String::new();
    for ch in value.chars() {
        match ch {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\0' => result.push_str("\\0"),
            _ => result.push(ch),
        }
    }
    result
}
