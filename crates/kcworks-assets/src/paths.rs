//! Assets directory path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the assets directory.
pub const ASSETS_ENV_VAR: &str = "KCWORKS_ASSETS_DIR";

/// File extension for style documents.
pub const STYLE_EXT: &str = "csl";

/// Get the assets root directory.
///
/// Resolution order:
/// 1. `KCWORKS_ASSETS_DIR` environment variable
/// 2. `assets/` directory relative to the workspace root
pub fn assets_root() -> PathBuf {
    if let Ok(root) = std::env::var(ASSETS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../assets")
}

/// Directory holding style documents.
pub fn styles_dir(root: &Path) -> PathBuf {
    root.join("styles")
}

/// Directory holding locale documents and metadata.
pub fn locales_dir(root: &Path) -> PathBuf {
    root.join("locales")
}

/// Path of a style document: `styles/<styleId>.csl`.
pub fn style_path(root: &Path, style_id: &str) -> PathBuf {
    styles_dir(root).join(format!("{style_id}.{STYLE_EXT}"))
}

/// Path of a locale document: `locales/locales-<localeId>.xml`.
pub fn locale_path(root: &Path, locale_id: &str) -> PathBuf {
    locales_dir(root).join(format!("locales-{locale_id}.xml"))
}

/// Path of the locale metadata document: `locales/locales.json`.
pub fn locale_metadata_path(root: &Path) -> PathBuf {
    locales_dir(root).join("locales.json")
}
