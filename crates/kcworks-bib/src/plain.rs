//! Built-in plain-text engine.
//!
//! Formats one `Title (year).` line per item. It does not interpret the
//! style or locale documents, which keeps the toolkit usable where no real
//! CSL processor is linked in; swap in a [`CitationEngine`] backed by an
//! actual processor for styled output.

use crate::engine::{CitationEngine, EngineSys};
use crate::error::EngineError;

/// Marker used for items without a publication year.
const NO_DATE: &str = "n.d.";

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextEngine;

impl CitationEngine for PlainTextEngine {
    fn make_bibliography(
        &self,
        sys: &dyn EngineSys,
        _style_xml: &str,
        item_ids: &[String],
    ) -> Result<Vec<String>, EngineError> {
        item_ids
            .iter()
            .map(|id| {
                let item = sys
                    .retrieve_item(id)
                    .ok_or_else(|| EngineError(format!("unknown item id: {id}")))?;
                let title = item.title.as_deref().unwrap_or("Untitled");
                let year = item
                    .year
                    .map_or_else(|| NO_DATE.to_string(), |y| y.to_string());
                Ok(format!("{title} ({year})."))
            })
            .collect()
    }
}
