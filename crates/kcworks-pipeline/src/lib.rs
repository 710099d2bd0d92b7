//! Query pipeline for embedded KCWorks bibliographies.
//!
//! Data flow: user-supplied query -> validation -> remote fetch ->
//! normalization and sort -> citation engine -> bibliography text. The
//! pipeline owns the `Idle / Loading / Error / Ready` state machine, applies
//! fetch results in submission order via a generation counter, and
//! regenerates the bibliography whenever the items, style, locale, or sort
//! order change. Failures are recovered into the error state, never thrown.

pub mod pipeline;
pub mod state;
pub mod validate;

pub use pipeline::{BIBLIOGRAPHY_PLACEHOLDER, FetchTicket, QueryPipeline};
pub use state::{FailureKind, PipelineFailure, PipelineState};
pub use validate::{ValidationError, validate_query};
