//! Window-function call builders.
//!
//! The grammar turns `name(arg, ...)` into a call node in two steps: it looks
//! up a [`Builder`] by name in the [registry](crate::registry), then calls
//! [`Builder::create`] with the raw argument list and the flags parsed for
//! that call. The builder polices argument count and shape, and only then
//! runs its typed construction step.
//!
//! There is one builder per fixed arity (0 to 3 arguments) and one for the
//! NTH_VALUE family, which takes three arguments plus an optional FROM
//! FIRST/LAST selector. Builders are immutable `'static` values; everything
//! that varies between calls travels in [`CallFlags`].

mod args;
mod flags;
mod nth_value;
mod validate;

pub use args::{Argument, ArgumentList};
pub use flags::{CallFlags, Direction};
pub use validate::Arity;

use crate::arena::{CallId, ExprId, WindowFunctionCall};
use crate::context::BuildContext;
use crate::error::BuildError;
use crate::name::FunctionName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validate::{check_arity, take_positional};
#[cfg(feature = "tracing")]
use tracing::debug;

/// Which builder variant produced a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BuilderKind {
    Arg0,
    Arg1,
    Arg2,
    Arg3,
    NthValue,
}

impl BuilderKind {
    pub fn arity(self) -> Arity {
        match self {
            Self::Arg0 => Arity::Exact(0),
            Self::Arg1 => Arity::Exact(1),
            Self::Arg2 => Arity::Exact(2),
            Self::Arg3 => Arity::Exact(3),
            Self::NthValue => Arity::Between { min: 3, max: 4 },
        }
    }
}

/// Typed construction step, one shape per arity.
///
/// Receives the already validated argument expressions, never the list.
#[derive(Clone, Copy)]
enum Construct {
    Arg0(fn(FunctionName, CallFlags) -> WindowFunctionCall),
    Arg1(fn(FunctionName, ExprId, CallFlags) -> WindowFunctionCall),
    Arg2(fn(FunctionName, ExprId, ExprId, CallFlags) -> WindowFunctionCall),
    Arg3(fn(FunctionName, ExprId, ExprId, ExprId, CallFlags) -> WindowFunctionCall),
    NthValue(fn(FunctionName, [ExprId; 3], CallFlags) -> WindowFunctionCall),
}

/// A stateless window-function builder.
#[derive(Clone, Copy)]
pub struct Builder {
    kind: BuilderKind,
    construct: Construct,
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder").field("kind", &self.kind).finish()
    }
}

/// Builder for functions taking no arguments (ROW_NUMBER, RANK, ...).
pub static ARG0: Builder = Builder {
    kind: BuilderKind::Arg0,
    construct: Construct::Arg0(construct_arg0),
};

/// Builder for functions taking exactly one argument (NTILE, FIRST_VALUE, ...).
pub static ARG1: Builder = Builder {
    kind: BuilderKind::Arg1,
    construct: Construct::Arg1(construct_arg1),
};

/// Builder for functions taking exactly two arguments.
///
/// No registered name maps here: LAG and LEAD are padded to three arguments
/// before lookup, so this builder is only reached by calling it directly.
pub static ARG2: Builder = Builder {
    kind: BuilderKind::Arg2,
    construct: Construct::Arg2(construct_arg2),
};

/// Builder for functions taking exactly three arguments (LAG and LEAD once
/// the grammar has filled in their defaults).
pub static ARG3: Builder = Builder {
    kind: BuilderKind::Arg3,
    construct: Construct::Arg3(construct_arg3),
};

/// Builder for NTH_VALUE: three positional arguments and an optional
/// direction selector.
pub static NTH_VALUE: Builder = Builder {
    kind: BuilderKind::NthValue,
    construct: Construct::NthValue(construct_nth_value),
};

impl Builder {
    pub fn kind(&self) -> BuilderKind {
        self.kind
    }

    pub fn arity(&self) -> Arity {
        self.kind.arity()
    }

    /// Validates `arguments` and allocates the call node.
    ///
    /// `None` stands for a call written without an argument list and counts
    /// as zero arguments. On failure the error is reported through `ctx` and
    /// returned; the arena is left untouched.
    pub fn create(
        &self,
        ctx: &mut BuildContext<'_>,
        name: &FunctionName,
        arguments: Option<ArgumentList>,
        flags: CallFlags,
    ) -> Result<CallId, BuildError> {
        let arguments = arguments.unwrap_or_default();

        #[cfg(feature = "tracing")]
        debug!(
            function = name.as_str(),
            builder = ?self.kind,
            arguments = arguments.len(),
            "building window function call"
        );

        match self.build(ctx, name, arguments, flags) {
            Ok(call) => Ok(ctx.arena_mut().alloc_call(call)),
            Err(error) => {
                #[cfg(feature = "tracing")]
                debug!(function = name.as_str(), %error, "window function call rejected");
                Err(ctx.report(error))
            }
        }
    }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        name: &FunctionName,
        mut arguments: ArgumentList,
        flags: CallFlags,
    ) -> Result<WindowFunctionCall, BuildError> {
        check_arity(name, self.arity(), &arguments)?;

        let call = match self.construct {
            Construct::Arg0(construct) => construct(name.clone(), flags),
            Construct::Arg1(construct) => {
                let [a] = take_positional::<1>(name, &mut arguments)?;
                construct(name.clone(), a, flags)
            }
            Construct::Arg2(construct) => {
                let [a, b] = take_positional::<2>(name, &mut arguments)?;
                construct(name.clone(), a, b, flags)
            }
            Construct::Arg3(construct) => {
                let [a, b, c] = take_positional::<3>(name, &mut arguments)?;
                construct(name.clone(), a, b, c, flags)
            }
            Construct::NthValue(construct) => {
                let positional = take_positional::<3>(name, &mut arguments)?;
                // The selector is not an expression argument, so it may carry an alias.
                // A handle from another arena resolves to no expression; it is
                // reported as an unusable selector since no value can be read.
                let direction = match arguments.pop_front() {
                    Some(selector) => {
                        let expr = ctx.arena().expr(selector.expr()).ok_or_else(|| {
                            BuildError::InvalidDirectionSelector { name: name.clone() }
                        })?;
                        nth_value::direction_from_selector(name, expr)?
                    }
                    None => flags.direction,
                };
                construct(name.clone(), positional, flags.with_direction(direction))
            }
        };

        Ok(call)
    }
}

fn construct_arg0(name: FunctionName, flags: CallFlags) -> WindowFunctionCall {
    WindowFunctionCall::new(name, BuilderKind::Arg0, Vec::new(), flags)
}

fn construct_arg1(name: FunctionName, a: ExprId, flags: CallFlags) -> WindowFunctionCall {
    WindowFunctionCall::new(name, BuilderKind::Arg1, vec![a], flags)
}

fn construct_arg2(name: FunctionName, a: ExprId, b: ExprId, flags: CallFlags) -> WindowFunctionCall {
    WindowFunctionCall::new(name, BuilderKind::Arg2, vec![a, b], flags)
}

fn construct_arg3(
    name: FunctionName,
    a: ExprId,
    b: ExprId,
    c: ExprId,
    flags: CallFlags,
) -> WindowFunctionCall {
    WindowFunctionCall::new(name, BuilderKind::Arg3, vec![a, b, c], flags)
}

fn construct_nth_value(
    name: FunctionName,
    arguments: [ExprId; 3],
    flags: CallFlags,
) -> WindowFunctionCall {
    WindowFunctionCall::new(name, BuilderKind::NthValue, arguments.to_vec(), flags)
}
