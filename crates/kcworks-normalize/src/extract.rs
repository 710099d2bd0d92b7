//! Extraction of bibliographic items from the raw proxy payload.

use serde_json::Value;
use tracing::warn;

use kcworks_model::{BibliographicItem, ItemCollection};

use crate::error::NormalizeError;

/// Convert a raw proxy payload into an ordered item collection.
///
/// Accepted shapes, tried in order:
/// - KCWorks search response: `{"hits": {"hits": [...]}}`
/// - flat result set: `{"items": [...]}`
/// - a top-level array of records
///
/// Item-level tolerance: a record without a string `id` is skipped with a
/// warning rather than failing the batch, and duplicate ids keep the first
/// occurrence. Only the payload-level shape is validated here; record fields
/// beyond what sorting needs stay untouched in [`BibliographicItem::record`].
pub fn extract_items(payload: &Value) -> Result<ItemCollection, NormalizeError> {
    let records = find_records(payload).ok_or_else(|| {
        NormalizeError::MalformedPayload("no result array found in payload".to_string())
    })?;

    let mut items: ItemCollection = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        match extract_item(record) {
            Some(item) => {
                if items.iter().any(|existing| existing.id == item.id) {
                    warn!(id = %item.id, index, "duplicate record id, keeping first");
                    continue;
                }
                items.push(item);
            }
            None => {
                warn!(index, "skipping record without a string id");
            }
        }
    }
    Ok(items)
}

fn find_records(payload: &Value) -> Option<&Vec<Value>> {
    if let Some(array) = payload.as_array() {
        return Some(array);
    }
    if let Some(hits) = payload.pointer("/hits/hits").and_then(Value::as_array) {
        return Some(hits);
    }
    payload.get("items").and_then(Value::as_array)
}

fn extract_item(record: &Value) -> Option<BibliographicItem> {
    let id = record.get("id").and_then(Value::as_str)?;
    Some(BibliographicItem {
        id: id.to_string(),
        title: extract_title(record),
        year: extract_year(record),
        record: record.clone(),
    })
}

fn extract_title(record: &Value) -> Option<String> {
    record
        .get("title")
        .or_else(|| record.pointer("/metadata/title"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Best-effort publication year: a numeric `year` field, or the leading year
/// of an ISO-ish `publication_date` string (`2022`, `2022-05`, `2022-05-01`).
fn extract_year(record: &Value) -> Option<i32> {
    if let Some(year) = record.get("year").and_then(Value::as_i64) {
        return i32::try_from(year).ok();
    }
    let date = record
        .get("publication_date")
        .or_else(|| record.pointer("/metadata/publication_date"))
        .and_then(Value::as_str)?;
    parse_year_prefix(date)
}

fn parse_year_prefix(date: &str) -> Option<i32> {
    let prefix = date.split(['-', '/']).next()?.trim();
    if prefix.len() != 4 {
        return None;
    }
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_prefix_parsing() {
        assert_eq!(parse_year_prefix("2022-05-01"), Some(2022));
        assert_eq!(parse_year_prefix("2022"), Some(2022));
        assert_eq!(parse_year_prefix("2022/2023"), Some(2022));
        assert_eq!(parse_year_prefix("May 2022"), None);
        assert_eq!(parse_year_prefix(""), None);
    }
}
