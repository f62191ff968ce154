//! Normalization of the list envelopes the backend wraps collections in.
//!
//! Three shapes are in use across endpoints:
//!
//! - nested: `{ "data": { "data": [...], "totalPages": 3 } }`
//! - flat: `{ "data": [...], "totalPages": 3 }`
//! - bare: `[...]`
//!
//! The page count may also sit under a `pagination` object. Any other shape
//! is [`Envelope::Unrecognized`] and normalizes to an empty page.

use serde_json::{Map, Value};

/// One page of raw records with the page count the backend reported, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub records: Vec<Value>,
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    NestedData {
        records: Vec<Value>,
        total_pages: Option<u32>,
    },
    FlatData {
        records: Vec<Value>,
        total_pages: Option<u32>,
    },
    BareArray(Vec<Value>),
    Unrecognized,
}

const TOTAL_PAGES_KEYS: [&str; 2] = ["totalPages", "total_pages"];

fn as_page_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Look for a page count beside the array, then under `pagination`.
fn find_total_pages(map: &Map<String, Value>) -> Option<u32> {
    let direct = TOTAL_PAGES_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(as_page_count));
    direct.or_else(|| match map.get("pagination") {
        Some(Value::Object(pagination)) => TOTAL_PAGES_KEYS
            .iter()
            .find_map(|key| pagination.get(*key).and_then(as_page_count)),
        _ => None,
    })
}

impl Envelope {
    pub fn classify(body: Value) -> Envelope {
        match body {
            Value::Array(records) => Envelope::BareArray(records),
            Value::Object(mut outer) => match outer.remove("data") {
                Some(Value::Object(mut inner)) => match inner.remove("data") {
                    Some(Value::Array(records)) => {
                        let total_pages =
                            find_total_pages(&inner).or_else(|| find_total_pages(&outer));
                        Envelope::NestedData {
                            records,
                            total_pages,
                        }
                    }
                    _ => Envelope::Unrecognized,
                },
                Some(Value::Array(records)) => Envelope::FlatData {
                    records,
                    total_pages: find_total_pages(&outer),
                },
                _ => Envelope::Unrecognized,
            },
            _ => Envelope::Unrecognized,
        }
    }

    pub fn into_page(self) -> Page {
        match self {
            Envelope::NestedData {
                records,
                total_pages,
            }
            | Envelope::FlatData {
                records,
                total_pages,
            } => Page {
                records,
                total_pages,
            },
            Envelope::BareArray(records) => Page {
                records,
                total_pages: None,
            },
            Envelope::Unrecognized => Page::default(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Envelope::Unrecognized)
    }
}

/// Unwrap a single-item response: `{ "data": {...} }` or the bare object.
pub fn unwrap_item(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_shape_with_pagination_object() {
        let env = Envelope::classify(json!({
            "success": true,
            "data": { "data": [{ "id": 1 }, { "id": 2 }], "pagination": { "totalPages": 4 } }
        }));
        assert!(matches!(env, Envelope::NestedData { .. }));
        let page = env.into_page();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.total_pages, Some(4));
    }

    #[test]
    fn flat_shape_with_snake_case_count() {
        let page = Envelope::classify(json!({ "data": [{ "id": 1 }], "total_pages": "2" })).into_page();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.total_pages, Some(2));
    }

    #[test]
    fn bare_array_has_no_count() {
        let env = Envelope::classify(json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }]));
        assert_eq!(env, Envelope::BareArray(vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]));
        assert_eq!(env.into_page().total_pages, None);
    }

    #[test]
    fn unknown_shapes_are_empty() {
        for body in [
            json!({ "items": [1, 2] }),
            json!({ "data": "oops" }),
            json!({ "data": { "rows": [] } }),
            json!("text"),
            Value::Null,
        ] {
            let env = Envelope::classify(body);
            assert!(!env.is_recognized());
            assert_eq!(env.into_page(), Page::default());
        }
    }

    #[test]
    fn unwrap_item_shapes() {
        assert_eq!(unwrap_item(json!({ "data": { "id": 7 } })), json!({ "id": 7 }));
        assert_eq!(unwrap_item(json!({ "id": 7 })), json!({ "id": 7 }));
    }
}
