//! Name → builder lookup tables.
//!
//! Both tables are built once per process and never change. A miss is not an
//! error here: it tells the grammar the name is not a window function of
//! that kind, and the grammar decides whether to try something else or to
//! report an unknown function.

use crate::builder::{Builder, ARG0, ARG1, ARG3, NTH_VALUE};
use crate::name::FunctionName;
use std::collections::HashMap;
use std::sync::LazyLock;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Builders for plain window-function calls, keyed by upper-case name.
static WINDOW_FUNCTION_BUILDERS: LazyLock<HashMap<&'static str, &'static Builder>> =
    LazyLock::new(|| {
        let mut builders: HashMap<&'static str, &'static Builder> = HashMap::new();

        // Ranking functions: no arguments.
        builders.insert("ROW_NUMBER", &ARG0);
        builders.insert("RANK", &ARG0);
        builders.insert("DENSE_RANK", &ARG0);
        builders.insert("PERCENT_RANK", &ARG0);
        builders.insert("CUME_DIST", &ARG0);

        builders.insert("NTILE", &ARG1);
        builders.insert("FIRST_VALUE", &ARG1);
        builders.insert("LAST_VALUE", &ARG1);
        builders.insert("MEDIAN", &ARG1);
        builders.insert("PERCENTILE_CONT", &ARG1);
        builders.insert("PERCENTILE_DISC", &ARG1);

        // LAG(expr, offset, default): the grammar fills omitted trailing arguments.
        builders.insert("LAG", &ARG3);
        builders.insert("LEAD", &ARG3);

        builders.insert("NTH_VALUE", &NTH_VALUE);

        builders
    });

/// Builders for calls written with RESPECT NULLS or IGNORE NULLS.
static NULLS_AWARE_BUILDERS: LazyLock<HashMap<&'static str, &'static Builder>> =
    LazyLock::new(|| {
        let mut builders: HashMap<&'static str, &'static Builder> = HashMap::new();
        builders.insert("FIRST_VALUE", &ARG1);
        builders.insert("LAST_VALUE", &ARG1);
        builders.insert("LAG", &ARG3);
        builders.insert("LEAD", &ARG3);
        builders.insert("NTH_VALUE", &NTH_VALUE);
        builders
    });

/// Finds the builder for a plain window-function call.
pub fn find_window_function_builder(name: &FunctionName) -> Option<&'static Builder> {
    lookup(&WINDOW_FUNCTION_BUILDERS, name)
}

/// Finds the builder for a call written with explicit RESPECT/IGNORE NULLS.
///
/// Only functions whose result depends on null handling are registered here.
pub fn find_window_function_builder_respecting_nulls(
    name: &FunctionName,
) -> Option<&'static Builder> {
    lookup(&NULLS_AWARE_BUILDERS, name)
}

/// Names accepted by [`find_window_function_builder`], sorted.
pub fn window_function_names() -> Vec<&'static str> {
    let mut names: Vec<_> = WINDOW_FUNCTION_BUILDERS.keys().copied().collect();
    names.sort_unstable();
    names
}

fn lookup(
    table: &HashMap<&'static str, &'static Builder>,
    name: &FunctionName,
) -> Option<&'static Builder> {
    let found = table.get(name.lookup_key().as_str()).copied();

    #[cfg(feature = "tracing")]
    trace!(function = name.as_str(), found = found.is_some(), "window builder lookup");

    found
}
