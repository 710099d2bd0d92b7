use thiserror::Error;

use kcworks_assets::AssetError;

/// Failure reported by a citation engine implementation.
#[derive(Debug, Error)]
#[error("citation engine error: {0}")]
pub struct EngineError(pub String);

/// Errors that can occur while generating a bibliography.
#[derive(Debug, Error)]
pub enum BibError {
    /// A style or locale document could not be resolved.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The engine rejected the request.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
