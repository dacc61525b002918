//! Argument count and shape checks shared by every builder.

use super::args::ArgumentList;
use crate::arena::ExprId;
use crate::error::BuildError;
use crate::name::FunctionName;
use std::fmt;

/// Number of arguments a builder accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    /// Inclusive range.
    Between { min: usize, max: usize },
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Self::Exact(n) => count == n,
            Self::Between { min, max } => (min..=max).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::Between { min, max } if max == min + 1 => write!(f, "{min} or {max}"),
            Self::Between { min, max } => write!(f, "{min} to {max}"),
        }
    }
}

pub(crate) fn check_arity(
    name: &FunctionName,
    arity: Arity,
    arguments: &ArgumentList,
) -> Result<(), BuildError> {
    let actual = arguments.len();
    if arity.accepts(actual) {
        Ok(())
    } else {
        Err(BuildError::ArityMismatch {
            name: name.clone(),
            expected: arity,
            actual,
        })
    }
}

/// Pops the first `N` arguments, each of which must be positional.
///
/// Callers run [`check_arity`] first; running out of arguments here is still
/// reported as an arity mismatch rather than panicking.
pub(crate) fn take_positional<const N: usize>(
    name: &FunctionName,
    arguments: &mut ArgumentList,
) -> Result<[ExprId; N], BuildError> {
    let available = arguments.len();
    let mut taken = Vec::with_capacity(N);
    for position in 1..=N {
        let Some(argument) = arguments.pop_front() else {
            break;
        };
        if !argument.is_positional() {
            return Err(BuildError::NonPositionalArgument {
                name: name.clone(),
                position,
            });
        }
        taken.push(argument.expr());
    }

    <[ExprId; N]>::try_from(taken).map_err(|_| BuildError::ArityMismatch {
        name: name.clone(),
        expected: Arity::Exact(N),
        actual: available,
    })
}
