use serde::{Deserialize, Serialize};

/// How callers that find the catalog cache empty behave when they run concurrently.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PopulationPolicy {
    /// One in-flight catalog fetch, shared by every caller waiting on it.
    #[default]
    Coalesced,
    /// Every caller that sees an empty cache fetches and overwrites it.
    Unguarded,
}

impl PopulationPolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coalesced => "coalesced",
            Self::Unguarded => "unguarded",
        }
    }
}
