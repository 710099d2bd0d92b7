//! Locale metadata: which locale identifiers are directly supported.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::AssetError;

/// Parsed `locales.json` companion document.
///
/// `primary-dialects` maps a language code to its canonical dialect
/// (e.g. `"en" -> "en-US"`); the dialect values are the locale identifiers
/// that can be resolved directly. Anything else falls back to the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleMetadata {
    #[serde(rename = "primary-dialects", default)]
    pub primary_dialects: BTreeMap<String, String>,
    #[serde(rename = "language-names", default)]
    pub language_names: BTreeMap<String, Vec<String>>,
}

impl LocaleMetadata {
    /// Load metadata from `locales/locales.json` under the assets root.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| AssetError::io(path, source))?;
        serde_json::from_str(&text).map_err(|err| AssetError::Metadata {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// True when `locale_id` can be resolved without fallback.
    ///
    /// A locale is supported when it appears as a primary dialect, either as
    /// a key (`"en-US"` style metadata) or as a mapped value (`"en" ->
    /// "en-US"` style metadata).
    pub fn is_supported(&self, locale_id: &str) -> bool {
        self.primary_dialects.contains_key(locale_id)
            || self.primary_dialects.values().any(|v| v == locale_id)
    }

    /// All directly supported locale identifiers, sorted and deduplicated.
    pub fn supported_locales(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .primary_dialects
            .keys()
            .chain(self.primary_dialects.values())
            .cloned()
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_checks_keys_and_values() {
        let metadata: LocaleMetadata = serde_json::from_str(
            r#"{ "primary-dialects": { "en": "en-US", "de": "de-DE" } }"#,
        )
        .expect("parse metadata");
        assert!(metadata.is_supported("en"));
        assert!(metadata.is_supported("en-US"));
        assert!(metadata.is_supported("de-DE"));
        assert!(!metadata.is_supported("xx-XX"));
    }

    #[test]
    fn supported_locales_sorted() {
        let metadata: LocaleMetadata = serde_json::from_str(
            r#"{ "primary-dialects": { "en": "en-US", "de": "de-DE" } }"#,
        )
        .expect("parse metadata");
        assert_eq!(
            metadata.supported_locales(),
            vec!["de", "de-DE", "en", "en-US"]
        );
    }
}
