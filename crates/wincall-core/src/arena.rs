//! Statement-scoped storage for parse-tree nodes.
//!
//! One [`StatementArena`] is created per statement. Argument expressions are
//! allocated into it by the grammar before a builder runs, and builders
//! allocate the resulting [`WindowFunctionCall`] into the same arena. Nodes
//! are addressed by index handles and are released together when the arena is
//! dropped; there is no per-node release.

use crate::builder::{BuilderKind, CallFlags};
use crate::name::FunctionName;
use sqlparser::ast::Expr;

/// Handle to an expression node in a [`StatementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(usize);

/// Handle to a call node in a [`StatementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallId(usize);

impl ExprId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl CallId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A validated window-function call.
///
/// Only builders construct these, and only after the argument count and
/// shape checks have both passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFunctionCall {
    name: FunctionName,
    kind: BuilderKind,
    arguments: Vec<ExprId>,
    flags: CallFlags,
}

impl WindowFunctionCall {
    pub(crate) fn new(
        name: FunctionName,
        kind: BuilderKind,
        arguments: Vec<ExprId>,
        flags: CallFlags,
    ) -> Self {
        Self {
            name,
            kind,
            arguments,
            flags,
        }
    }

    pub fn name(&self) -> &FunctionName {
        &self.name
    }

    /// The builder variant that produced this node.
    pub fn kind(&self) -> BuilderKind {
        self.kind
    }

    /// Argument expressions in call order.
    pub fn arguments(&self) -> &[ExprId] {
        &self.arguments
    }

    pub fn flags(&self) -> CallFlags {
        self.flags
    }
}

/// Append-only node store owned by a single statement.
#[derive(Debug, Default)]
pub struct StatementArena {
    exprs: Vec<Expr>,
    calls: Vec<WindowFunctionCall>,
}

impl StatementArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        self.exprs.push(expr);
        ExprId(self.exprs.len() - 1)
    }

    pub(crate) fn alloc_call(&mut self, call: WindowFunctionCall) -> CallId {
        self.calls.push(call);
        CallId(self.calls.len() - 1)
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.0)
    }

    pub fn call(&self, id: CallId) -> Option<&WindowFunctionCall> {
        self.calls.get(id.0)
    }

    /// Call nodes in allocation order.
    pub fn calls(&self) -> impl Iterator<Item = (CallId, &WindowFunctionCall)> {
        self.calls
            .iter()
            .enumerate()
            .map(|(index, call)| (CallId(index), call))
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}
