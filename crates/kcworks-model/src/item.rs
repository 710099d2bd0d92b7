//! Bibliographic item records produced by normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single normalized bibliographic record.
///
/// `id` is unique within a collection. `year` is extracted for sorting;
/// `record` keeps the raw proxy record so a citation engine can look up any
/// field it needs. Items are immutable once normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibliographicItem {
    pub id: String,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub record: Value,
}

impl BibliographicItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            year: None,
            record: Value::Null,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_record(mut self, record: Value) -> Self {
        self.record = record;
        self
    }
}

/// Ordered sequence of items; insertion order is the sort order.
pub type ItemCollection = Vec<BibliographicItem>;
