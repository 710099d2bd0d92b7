//! Consumer-facing block settings.
//!
//! A settings change never triggers a fetch by itself: `style`, `locale` and
//! `sort` only force bibliography regeneration, while `query` + `validated`
//! drive the fetch state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort order applied to a normalized item collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Descending by year, undated items last.
    #[default]
    Newest,
    /// Ascending by year, undated items last.
    Oldest,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

/// User-settable configuration for one embedded bibliography block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSettings {
    /// User-authored query string, opaque to this system.
    pub query: String,
    /// Set once per edit session when the user explicitly submits the query.
    pub validated: bool,
    /// Citation style identifier, e.g. "apa".
    pub style: String,
    /// Locale identifier, e.g. "en-US". May be rewritten to the default when
    /// the requested locale is unsupported.
    pub locale: String,
    /// Sort order for the item collection.
    pub sort: SortKey,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self {
            query: String::new(),
            validated: false,
            style: "apa".to_string(),
            locale: "en-US".to_string(),
            sort: SortKey::Newest,
        }
    }
}

impl BlockSettings {
    /// Settings for a query that the user has already submitted.
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            validated: true,
            ..Self::default()
        }
    }
}
