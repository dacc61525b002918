use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Counting direction selected by FROM FIRST / FROM LAST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    #[default]
    FromFirst,
    FromLast,
}

/// Per-call configuration handed to [`Builder::create`](super::Builder::create).
///
/// Flags belong to one call. Builders never keep them between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallFlags {
    /// RESPECT NULLS (true) or IGNORE NULLS (false)
    pub respect_nulls: bool,
    pub direction: Direction,
}

impl Default for CallFlags {
    fn default() -> Self {
        Self {
            respect_nulls: true,
            direction: Direction::FromFirst,
        }
    }
}

impl CallFlags {
    pub fn with_respect_nulls(mut self, respect_nulls: bool) -> Self {
        self.respect_nulls = respect_nulls;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}
