//! Citation style and locale assets.
//!
//! Style documents live at `styles/<styleId>.csl` and locale documents at
//! `locales/locales-<localeId>.xml` under a fixed assets root; the companion
//! `locales/locales.json` enumerates which locale identifiers are directly
//! supported. [`AssetResolver`] loads these documents and applies the
//! fallback policy: an unsupported locale resolves to [`DEFAULT_LOCALE`]
//! instead of failing.

pub mod error;
pub mod metadata;
pub mod paths;
pub mod resolver;

pub use error::AssetError;
pub use metadata::LocaleMetadata;
pub use paths::{ASSETS_ENV_VAR, assets_root};
pub use resolver::{AssetResolver, DEFAULT_LOCALE, ResolvedLocale, StyleDocument};
