//! Pipeline state and failure taxonomy.
//!
//! One tagged variant replaces the original pile of independent
//! loading/error/fetched flags, so illegal combinations (ready and loading at
//! once) cannot be represented.

use std::fmt;

use kcworks_client::FetchError;
use kcworks_model::ItemCollection;
use kcworks_normalize::NormalizeError;

use crate::validate::ValidationError;

/// What a query session is currently doing. Exactly one state holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Nothing fetched and nothing in flight.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch failed; requires explicit resubmission to retry.
    Error(PipelineFailure),
    /// A fetch completed; the collection is normalized and sorted.
    Ready(ItemCollection),
}

impl PipelineState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The ready collection, if any.
    pub fn items(&self) -> Option<&ItemCollection> {
        match self {
            Self::Ready(items) => Some(items),
            _ => None,
        }
    }

    /// The failure, if the pipeline is in the error state.
    pub fn failure(&self) -> Option<&PipelineFailure> {
        match self {
            Self::Error(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Category of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The query was rejected before any network call.
    Validation,
    /// Transport failure or non-success proxy status.
    Fetch,
    /// A response arrived but could not be turned into items.
    Payload,
}

/// A recovered pipeline failure, surfaced to the consumer instead of thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FailureKind::Validation => "validation",
            FailureKind::Fetch => "fetch",
            FailureKind::Payload => "payload",
        };
        write!(f, "{kind} failure: {}", self.message)
    }
}

impl From<ValidationError> for PipelineFailure {
    fn from(err: ValidationError) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for PipelineFailure {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::MalformedPayload(_) => FailureKind::Payload,
            _ => FailureKind::Fetch,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<NormalizeError> for PipelineFailure {
    fn from(err: NormalizeError) -> Self {
        Self {
            kind: FailureKind::Payload,
            message: err.to_string(),
        }
    }
}
