use crate::arena::ExprId;
use std::collections::VecDeque;

/// One argument of a function call: an arena expression plus the alias the
/// user gave it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    expr: ExprId,
    alias: Option<String>,
}

impl Argument {
    pub fn positional(expr: ExprId) -> Self {
        Self { expr, alias: None }
    }

    pub fn aliased(expr: ExprId, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: Some(alias.into()),
        }
    }

    pub fn expr(&self) -> ExprId {
        self.expr
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// True when the argument was written without an explicit alias.
    pub fn is_positional(&self) -> bool {
        self.alias.is_none()
    }
}

/// Ordered arguments of a call, consumed front to back by a builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    items: VecDeque<Argument>,
}

impl ArgumentList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, argument: Argument) {
        self.items.push_back(argument);
    }

    /// Inserts at `index`, shifting later arguments right. Appends when
    /// `index` is past the end.
    pub fn insert(&mut self, index: usize, argument: Argument) {
        let index = index.min(self.items.len());
        self.items.insert(index, argument);
    }

    pub fn pop_front(&mut self) -> Option<Argument> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.items.iter()
    }
}

impl FromIterator<Argument> for ArgumentList {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Argument>> for ArgumentList {
    fn from(items: Vec<Argument>) -> Self {
        Self {
            items: items.into(),
        }
    }
}
