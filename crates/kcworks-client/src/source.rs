//! The fetch seam between the pipeline and the remote proxy.

use serde_json::Value;

use crate::error::Result;

/// Source of raw bibliographic query results.
///
/// The pipeline talks to the proxy only through this trait so tests can
/// substitute a scripted source. Implementations return the raw JSON payload;
/// normalization happens downstream.
pub trait RecordSource {
    /// Fetch the raw payload for `query`.
    fn fetch_records(&self, query: &str) -> Result<Value>;
}
