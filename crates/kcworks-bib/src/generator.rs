//! Wires the asset resolver, an item collection and a citation engine
//! together into bibliography text.

use kcworks_assets::{AssetResolver, DEFAULT_LOCALE};
use kcworks_model::BibliographicItem;
use tracing::{debug, warn};

use crate::engine::{CitationEngine, EngineSys};
use crate::error::BibError;

/// Separator between formatted entries in the final text block.
const ENTRY_SEPARATOR: &str = "\n";

/// Result of one bibliography generation run.
///
/// `locale` is the locale actually used; it differs from the requested one
/// exactly when the resolver substituted the default, and callers should copy
/// it back into their displayed locale setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBibliography {
    pub text: String,
    pub locale: String,
}

/// Drives a [`CitationEngine`] over a normalized item collection.
///
/// Generation is wholesale: any change of items, style, or locale upstream
/// re-invokes [`BibliographyGenerator::generate`] from scratch. Item counts
/// are query-result sized, so there is no incremental path.
#[derive(Debug)]
pub struct BibliographyGenerator<E> {
    resolver: AssetResolver,
    engine: E,
}

impl<E: CitationEngine> BibliographyGenerator<E> {
    pub fn new(resolver: AssetResolver, engine: E) -> Self {
        Self { resolver, engine }
    }

    pub fn resolver(&self) -> &AssetResolver {
        &self.resolver
    }

    /// Generate bibliography text for `items` in their current order.
    ///
    /// Style and locale resolution completes before the engine is invoked.
    /// An absent style id yields empty text rather than an error; a missing
    /// style document is [`BibError::Asset`].
    pub fn generate(
        &self,
        items: &[BibliographicItem],
        style_id: Option<&str>,
        locale_id: Option<&str>,
    ) -> Result<GeneratedBibliography, BibError> {
        let fallback_locale = || {
            locale_id
                .filter(|id| self.resolver.metadata().is_supported(id))
                .unwrap_or(DEFAULT_LOCALE)
                .to_string()
        };

        let Some(style) = self.resolver.resolve_style(style_id)? else {
            return Ok(GeneratedBibliography {
                text: String::new(),
                locale: fallback_locale(),
            });
        };

        // Resolve the requested locale up front so substitution is visible
        // to the caller even if the engine never asks for it.
        let locale = match self.resolver.resolve_locale(locale_id)? {
            Some(resolved) => {
                if resolved.substituted() {
                    debug!(
                        requested = %resolved.requested,
                        used = %resolved.resolved,
                        "locale substituted during generation"
                    );
                }
                resolved.resolved
            }
            None => fallback_locale(),
        };

        let item_ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        let sys = ResolverSys {
            resolver: &self.resolver,
            items,
        };
        let entries = self.engine.make_bibliography(&sys, &style.xml, &item_ids)?;
        Ok(GeneratedBibliography {
            text: entries.join(ENTRY_SEPARATOR),
            locale,
        })
    }
}

/// [`EngineSys`] backed by the asset resolver and a borrowed item slice.
struct ResolverSys<'a> {
    resolver: &'a AssetResolver,
    items: &'a [BibliographicItem],
}

impl EngineSys for ResolverSys<'_> {
    fn retrieve_locale(&self, locale_id: &str) -> Option<String> {
        match self.resolver.resolve_locale(Some(locale_id)) {
            Ok(resolved) => resolved.map(|locale| locale.xml),
            Err(error) => {
                warn!(locale_id, %error, "locale retrieval failed");
                None
            }
        }
    }

    fn retrieve_item(&self, id: &str) -> Option<&BibliographicItem> {
        self.items.iter().find(|item| item.id == id)
    }
}
