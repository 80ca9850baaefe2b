//! The type-analysis context and the pass entry point.
//!
//! A [`TypeAnalysis`] is created once per run. It owns the type registry
//! carried over from name analysis, records the type computed for every
//! node, tracks the function whose body is being walked, and collects
//! diagnostics. Reporting never stops the walk.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::{
    ast::ast::{Ident, NodeId},
    name_analysis::{name_analysis::NameAnalysis, symbol_table::SymbolTable},
    Span,
};

use super::{
    data_types::{TypeId, TypeRegistry},
    diagnostics::{Construct, Diagnostic, DiagnosticKind},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A node type was requested before the node was visited.
    #[error("node {0} was queried before it was analyzed")]
    UnanalyzedNode(NodeId),
}

#[derive(Debug)]
pub struct TypeAnalysis {
    types: TypeRegistry,
    symbol_types: Vec<TypeId>,
    node_types: HashMap<NodeId, TypeId>,
    current_fn: Option<TypeId>,
    diagnostics: Vec<Diagnostic>,
    has_error: bool,
}

impl TypeAnalysis {
    pub fn new(types: TypeRegistry, symbols: &SymbolTable) -> Self {
        TypeAnalysis {
            types,
            symbol_types: symbols.iter().map(|(_, symbol)| symbol.ty).collect(),
            node_types: HashMap::new(),
            current_fn: None,
            diagnostics: vec![],
            has_error: false,
        }
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn types_mut(&mut self) -> &mut TypeRegistry {
        &mut self.types
    }

    /// The type recorded for `node`.
    pub fn node_type(&self, node: NodeId) -> Result<TypeId, AnalysisError> {
        self.node_types
            .get(&node)
            .copied()
            .ok_or(AnalysisError::UnanalyzedNode(node))
    }

    /// Records `ty` for `node`, replacing any earlier entry.
    pub fn set_node_type(&mut self, node: NodeId, ty: TypeId) {
        trace!(%node, ty = %self.types.display(ty), "typed node");
        self.node_types.insert(node, ty);
    }

    pub fn node_count(&self) -> usize {
        self.node_types.len()
    }

    /// The `Fn` type of the function whose body is being walked.
    pub fn current_fn_type(&self) -> Option<TypeId> {
        self.current_fn
    }

    pub fn set_current_fn_type(&mut self, fn_type: Option<TypeId>) {
        self.current_fn = fn_type;
    }

    /// The declared type of the symbol `ident` resolved to.
    pub fn symbol_type(&self, ident: &Ident) -> TypeId {
        let ty = ident
            .symbol
            .and_then(|symbol| self.symbol_types.get(symbol.0 as usize).copied());

        match ty {
            Some(ty) => ty,
            None => {
                warn!(name = %ident.name, "identifier reached type analysis without a symbol");
                self.types.error()
            }
        }
    }

    /// True iff nothing has been reported so far.
    pub fn passed(&self) -> bool {
        !self.has_error
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, kind: DiagnosticKind, span: &Span) {
        debug!(%kind, position = %span.start, "type diagnostic");
        self.has_error = true;
        self.diagnostics.push(Diagnostic::new(kind, span.clone()));
    }

    pub fn err_assign_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::AssignOperand, span);
    }

    pub fn err_assign_operator(&mut self, span: &Span) {
        self.report(DiagnosticKind::AssignOperator, span);
    }

    pub fn err_math_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::MathOperand, span);
    }

    pub fn err_rel_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::RelOperand, span);
    }

    pub fn err_logic_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::LogicOperand, span);
    }

    pub fn err_eq_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::EqOperand, span);
    }

    pub fn err_eq_operator(&mut self, span: &Span) {
        self.report(DiagnosticKind::EqOperator, span);
    }

    pub fn err_deref_operand(&mut self, span: &Span) {
        self.report(DiagnosticKind::DerefOperand, span);
    }

    pub fn err_arg_count(&mut self, span: &Span) {
        self.report(DiagnosticKind::ArgCount, span);
    }

    pub fn err_arg_match(&mut self, span: &Span) {
        self.report(DiagnosticKind::ArgMatch, span);
    }

    pub fn err_callee(&mut self, span: &Span) {
        self.report(DiagnosticKind::Callee, span);
    }

    pub fn err_ret_wrong(&mut self, span: &Span) {
        self.report(DiagnosticKind::RetWrong, span);
    }

    pub fn err_ret_empty(&mut self, span: &Span) {
        self.report(DiagnosticKind::RetEmpty, span);
    }

    pub fn err_extra_ret_value(&mut self, span: &Span) {
        self.report(DiagnosticKind::ExtraRetValue, span);
    }

    pub fn err_cond(&mut self, construct: Construct, span: &Span) {
        self.report(DiagnosticKind::CondType(construct), span);
    }

    pub fn err_write_fn(&mut self, span: &Span) {
        self.report(DiagnosticKind::WriteFn, span);
    }

    pub fn err_write_void(&mut self, span: &Span) {
        self.report(DiagnosticKind::WriteVoid, span);
    }

    pub fn err_write_ptr(&mut self, span: &Span) {
        self.report(DiagnosticKind::WritePtr, span);
    }

    pub fn err_read_ptr(&mut self, span: &Span) {
        self.report(DiagnosticKind::ReadPtr, span);
    }

    pub fn err_assign_fn(&mut self, span: &Span) {
        self.report(DiagnosticKind::AssignFn, span);
    }
}

/// Type checks a name-resolved program.
///
/// The whole program is always walked. Returns the populated context when no
/// diagnostic was raised, and every diagnostic from the run otherwise.
pub fn analyze(names: &NameAnalysis) -> Result<TypeAnalysis, Vec<Diagnostic>> {
    let mut ta = TypeAnalysis::new(names.types.clone(), &names.symbols);

    names.program.type_analysis(&mut ta);

    if ta.passed() {
        info!(nodes = ta.node_count(), "type analysis passed");
        Ok(ta)
    } else {
        info!(diagnostics = ta.diagnostics().len(), "type analysis failed");
        Err(ta.into_diagnostics())
    }
}
