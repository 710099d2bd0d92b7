//! Record normalization: raw proxy payload in, ordered item collection out.
//!
//! Two stages: [`extract_items`] tolerates malformed individual records
//! (skipping them with a warning) so one bad entry never drops the whole
//! batch, and [`sort_items`] produces a deterministic total order with ties
//! broken by item id.

pub mod error;
pub mod extract;
pub mod sort;

pub use error::NormalizeError;
pub use extract::extract_items;
pub use sort::sort_items;
