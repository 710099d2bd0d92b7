//! The citation engine capability boundary.
//!
//! A concrete engine (a CSL processor, or the built-in plain-text formatter)
//! is driven through [`CitationEngine`]; everything it needs from the host
//! comes through [`EngineSys`]. Keeping both as traits makes the engine
//! swappable and mockable.

use kcworks_model::BibliographicItem;

use crate::error::EngineError;

/// Host callbacks available to a citation engine while formatting.
pub trait EngineSys {
    /// Serialized locale document for `locale_id`, if resolvable.
    fn retrieve_locale(&self, locale_id: &str) -> Option<String>;

    /// Item lookup by id, backed by the registered collection.
    fn retrieve_item(&self, id: &str) -> Option<&BibliographicItem>;
}

/// A bibliography-producing citation engine.
pub trait CitationEngine {
    /// Format one bibliography entry per registered id, in registration
    /// order unless the style itself re-sorts.
    ///
    /// `style_xml` is the serialized style document; items and locale
    /// documents are pulled through `sys` on demand.
    fn make_bibliography(
        &self,
        sys: &dyn EngineSys,
        style_xml: &str,
        item_ids: &[String],
    ) -> Result<Vec<String>, EngineError>;
}
