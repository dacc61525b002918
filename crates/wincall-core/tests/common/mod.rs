#![allow(dead_code)]

use sqlparser::ast::{Expr, Ident, Value};
use wincall_core::{
    Argument, ArgumentList, BuildContext, BuildError, Builder, CallFlags, CallId, ExprId,
    FunctionName, StatementArena, WindowFunctionCall,
};

/// An arena plus an error sink, standing in for one statement being built.
#[derive(Default)]
pub struct Fixture {
    pub arena: StatementArena,
    pub errors: Vec<BuildError>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&mut self, name: &str) -> ExprId {
        self.arena.alloc_expr(Expr::Identifier(Ident::new(name)))
    }

    pub fn number(&mut self, value: &str) -> ExprId {
        self.arena
            .alloc_expr(Expr::Value(Value::Number(value.to_string(), false).with_empty_span()))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.arena
            .alloc_expr(Expr::Value(Value::Boolean(value).with_empty_span()))
    }

    /// `count` distinct positional column arguments named `c0`, `c1`, ...
    pub fn columns(&mut self, count: usize) -> Vec<ExprId> {
        (0..count).map(|i| self.column(&format!("c{i}"))).collect()
    }

    pub fn create(
        &mut self,
        builder: &Builder,
        name: &str,
        arguments: Vec<Argument>,
        flags: CallFlags,
    ) -> Result<CallId, BuildError> {
        let mut ctx = BuildContext::new(&mut self.arena, &mut self.errors);
        builder.create(
            &mut ctx,
            &FunctionName::new(name),
            Some(ArgumentList::from(arguments)),
            flags,
        )
    }

    pub fn call(&self, id: CallId) -> &WindowFunctionCall {
        self.arena.call(id).expect("call node was allocated")
    }
}

pub fn positional(ids: &[ExprId]) -> Vec<Argument> {
    ids.iter().copied().map(Argument::positional).collect()
}
