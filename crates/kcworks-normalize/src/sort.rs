//! Deterministic ordering of item collections.

use std::cmp::Ordering;

use kcworks_model::{BibliographicItem, ItemCollection, SortKey};

/// Sort a collection in place according to `key`.
///
/// The order is total and reproducible: undated items always sort after
/// dated ones, and every tie is broken by id ascending. Sorting an already
/// sorted collection is a no-op.
pub fn sort_items(items: &mut ItemCollection, key: SortKey) {
    items.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &BibliographicItem, b: &BibliographicItem, key: SortKey) -> Ordering {
    by_year(a, b, key).then_with(|| a.id.cmp(&b.id))
}

fn by_year(a: &BibliographicItem, b: &BibliographicItem, key: SortKey) -> Ordering {
    match (a.year, b.year) {
        (Some(ya), Some(yb)) => match key {
            SortKey::Newest => yb.cmp(&ya),
            SortKey::Oldest => ya.cmp(&yb),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
