#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("style not found: {style_id} (looked in {path})")]
    StyleNotFound { style_id: String, path: PathBuf },

    #[error("locale not found: {locale_id} (looked in {path})")]
    LocaleNotFound { locale_id: String, path: PathBuf },

    #[error("failed to parse locale metadata {path}: {message}")]
    Metadata { path: PathBuf, message: String },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
