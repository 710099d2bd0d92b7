use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The payload was parseable JSON but not a recognizable result set.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
