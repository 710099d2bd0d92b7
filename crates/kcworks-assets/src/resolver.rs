//! Style and locale document resolution.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::AssetError;
use crate::metadata::LocaleMetadata;
use crate::paths::{
    STYLE_EXT, locale_metadata_path, locale_path, locales_dir, style_path, styles_dir,
};

/// Locale substituted when a requested locale is unsupported.
pub const DEFAULT_LOCALE: &str = "en-US";

/// A resolved citation style document.
#[derive(Debug, Clone)]
pub struct StyleDocument {
    pub id: String,
    pub xml: String,
}

impl StyleDocument {
    /// Human-readable style title from the document's `<title>` element.
    pub fn title(&self) -> Option<String> {
        let mut reader = Reader::from_str(&self.xml);
        reader.config_mut().trim_text(true);
        let mut in_title = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) if start.local_name().as_ref() == b"title" => {
                    in_title = true;
                }
                Ok(Event::Text(text)) if in_title => {
                    return text.decode().ok().map(|s| s.into_owned());
                }
                Ok(Event::End(end)) if end.local_name().as_ref() == b"title" => {
                    in_title = false;
                }
                Ok(Event::Eof) | Err(_) => return None,
                _ => {}
            }
        }
    }
}

/// A resolved locale document.
///
/// `requested` is what the caller asked for; `resolved` is what was actually
/// loaded. The two differ exactly when the fallback policy substituted the
/// default locale, and callers are expected to check [`ResolvedLocale::substituted`]
/// so their displayed locale setting stays consistent.
#[derive(Debug, Clone)]
pub struct ResolvedLocale {
    pub requested: String,
    pub resolved: String,
    pub xml: String,
}

impl ResolvedLocale {
    pub fn substituted(&self) -> bool {
        self.requested != self.resolved
    }
}

/// Resolves style and locale documents from an on-disk assets root.
///
/// Resolution is synchronous file IO; each resolver instance is independent
/// and holds only the parsed locale metadata.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
    metadata: LocaleMetadata,
}

impl AssetResolver {
    /// Create a resolver for the given assets root, loading `locales.json`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let root = root.into();
        let metadata = LocaleMetadata::load(&locale_metadata_path(&root))?;
        Ok(Self { root, metadata })
    }

    /// Create a resolver for the default assets root.
    pub fn from_default_root() -> Result<Self, AssetError> {
        Self::new(crate::paths::assets_root())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn metadata(&self) -> &LocaleMetadata {
        &self.metadata
    }

    /// Resolve a style document by identifier.
    ///
    /// An absent identifier is a valid input and yields `Ok(None)`; an
    /// unknown identifier is [`AssetError::StyleNotFound`].
    pub fn resolve_style(&self, style_id: Option<&str>) -> Result<Option<StyleDocument>, AssetError> {
        let Some(style_id) = style_id else {
            return Ok(None);
        };
        let path = style_path(&self.root, style_id);
        if !path.is_file() {
            return Err(AssetError::StyleNotFound {
                style_id: style_id.to_string(),
                path,
            });
        }
        let xml = std::fs::read_to_string(&path).map_err(|source| AssetError::io(&path, source))?;
        Ok(Some(StyleDocument {
            id: style_id.to_string(),
            xml,
        }))
    }

    /// Resolve a locale document by identifier.
    ///
    /// An absent identifier yields `Ok(None)`. An identifier outside the
    /// supported set silently resolves [`DEFAULT_LOCALE`] instead; that is a
    /// policy decision, not an error, and is observable via
    /// [`ResolvedLocale::substituted`]. A supported identifier whose document
    /// file is missing is [`AssetError::LocaleNotFound`].
    pub fn resolve_locale(
        &self,
        locale_id: Option<&str>,
    ) -> Result<Option<ResolvedLocale>, AssetError> {
        let Some(requested) = locale_id else {
            return Ok(None);
        };
        let resolved = if self.metadata.is_supported(requested) {
            requested.to_string()
        } else {
            debug!(
                requested,
                fallback = DEFAULT_LOCALE,
                "unsupported locale, substituting default"
            );
            DEFAULT_LOCALE.to_string()
        };
        let path = locale_path(&self.root, &resolved);
        if !path.is_file() {
            return Err(AssetError::LocaleNotFound {
                locale_id: resolved,
                path,
            });
        }
        let xml = std::fs::read_to_string(&path).map_err(|source| AssetError::io(&path, source))?;
        Ok(Some(ResolvedLocale {
            requested: requested.to_string(),
            resolved,
            xml,
        }))
    }

    /// Style identifiers available under `styles/`, sorted.
    pub fn list_styles(&self) -> Result<Vec<String>, AssetError> {
        list_by_extension(&styles_dir(&self.root), STYLE_EXT, |stem| {
            Some(stem.to_string())
        })
    }

    /// Locale identifiers with a document under `locales/`, sorted.
    pub fn list_locales(&self) -> Result<Vec<String>, AssetError> {
        list_by_extension(&locales_dir(&self.root), "xml", |stem| {
            stem.strip_prefix("locales-").map(str::to_string)
        })
    }
}

fn list_by_extension(
    dir: &Path,
    ext: &str,
    map_stem: impl Fn(&str) -> Option<String>,
) -> Result<Vec<String>, AssetError> {
    let mut ids = Vec::new();
    if !dir.is_dir() {
        return Ok(ids);
    }
    let entries = std::fs::read_dir(dir).map_err(|source| AssetError::io(dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::io(dir, source))?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        if let Some(id) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(&map_stem)
        {
            ids.push(id);
        }
    }
    ids.sort();
    Ok(ids)
}
