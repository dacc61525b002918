//! JSON output formatting.

use wincall_core::ResolveResult;

/// Format the resolve result as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(result: &ResolveResult, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(result)
    } else {
        serde_json::to_string_pretty(result)
    }
}
