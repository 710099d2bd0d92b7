//! Remote fetch boundary for KCWorks bibliographic queries.
//!
//! The proxy endpoint takes a single query parameter and returns a JSON
//! payload whose shape is owned by the proxy, not by this crate. No request
//! is retried automatically; a failed fetch surfaces as a [`FetchError`] and
//! requires an explicit resubmission upstream.

pub mod error;
pub mod proxy;
pub mod source;

pub use error::FetchError;
pub use proxy::{PROXY_PATH, ProxyClient, QUERY_PARAM};
pub use source::RecordSource;
