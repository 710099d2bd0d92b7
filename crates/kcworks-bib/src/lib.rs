//! Bibliography generation over normalized KCWorks records.
//!
//! [`BibliographyGenerator`] resolves the style and locale documents, builds
//! the engine context (locale retrieval plus item lookup callbacks),
//! registers item ids in collection order, and joins the engine's formatted
//! entries into one text block.

pub mod engine;
pub mod error;
pub mod generator;
pub mod plain;

pub use engine::{CitationEngine, EngineSys};
pub use error::{BibError, EngineError};
pub use generator::{BibliographyGenerator, GeneratedBibliography};
pub use plain::PlainTextEngine;
