pub mod item;
pub mod settings;

pub use item::{BibliographicItem, ItemCollection};
pub use settings::{BlockSettings, SortKey, UnknownSortKey};
