//! Query validation hook.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid query: {0}")]
pub struct ValidationError(pub String);

/// Validate a submitted query before any network call.
///
/// Currently accepts every non-empty query; the state machine short-circuits
/// empty queries before this is called. The hook stays so stricter rules can
/// land here without touching the state machine.
pub fn validate_query(_query: &str) -> Result<(), ValidationError> {
    Ok(())
}
