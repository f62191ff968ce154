//! Sequential accumulation of every page of a list endpoint.

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{Envelope, Page};
use crate::error::Result;

/// Something that can hand back page `n` (1-based) of a collection as raw JSON.
///
/// The REST client implements this per endpoint; tests implement it over
/// canned pages.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Name used in log lines.
    fn label(&self) -> &str;

    async fn fetch_page(&self, page: u32) -> Result<Value>;
}

/// Deserialize raw records one by one, skipping the ones that do not fit `T`.
pub fn decode_records<T: DeserializeOwned>(records: Vec<Value>, label: &str) -> Vec<T> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("[LAB] {}: dropping record {}: {}", label, i, e);
                None
            }
        })
        .collect()
}

/// Fetch pages 1, 2, 3, ... strictly in order and concatenate their records.
///
/// Stops after the page whose number reaches the reported page count, after
/// the first page that contributes no records, or at `max_pages`. Any error
/// aborts the whole accumulation and nothing gathered so far is returned.
pub async fn fetch_all_pages<T, S>(source: &S, max_pages: u32) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    S: PageSource,
{
    let mut collected = Vec::new();
    let mut page = 1u32;

    loop {
        let body = source.fetch_page(page).await?;
        let envelope = Envelope::classify(body);
        if !envelope.is_recognized() {
            warn!(
                "[LAB] {}: page {} has an unrecognized envelope, treating as empty",
                source.label(),
                page
            );
        }
        let Page {
            records,
            total_pages,
        } = envelope.into_page();
        let received = records.len();
        collected.extend(decode_records::<T>(records, source.label()));

        info!(
            "[LAB] {}: page {}/{} -> {} records ({} total)",
            source.label(),
            page,
            total_pages.map_or("?".to_string(), |t| t.to_string()),
            received,
            collected.len()
        );

        if received == 0 {
            break;
        }
        if total_pages.is_some_and(|total| page >= total) {
            break;
        }
        if page >= max_pages {
            warn!(
                "[LAB] {}: stopping at page cap {} without an end marker",
                source.label(),
                max_pages
            );
            break;
        }
        page += 1;
    }

    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;
    use crate::sample::Sample;
    use serde_json::json;
    use std::cell::RefCell;

    /// Canned backend. Pages past the end come back as an empty bare array.
    struct FakePages {
        pages: Vec<Result<Value>>,
        requested: RefCell<Vec<u32>>,
    }

    impl FakePages {
        fn new(pages: Vec<Result<Value>>) -> Self {
            Self {
                pages,
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageSource for FakePages {
        fn label(&self) -> &str {
            "fake"
        }

        async fn fetch_page(&self, page: u32) -> Result<Value> {
            self.requested.borrow_mut().push(page);
            match self.pages.get(page as usize - 1) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(_)) => Err(LabError::Status {
                    status: 503,
                    message: "unavailable".into(),
                }),
                None => Ok(json!([])),
            }
        }
    }

    fn samples(start: usize, count: usize) -> Vec<Value> {
        (start..start + count)
            .map(|i| json!({ "_id": format!("M-{:03}", i), "estado": "Recibida" }))
            .collect()
    }

    fn nested(records: Vec<Value>, total_pages: u32) -> Value {
        json!({ "data": { "data": records, "totalPages": total_pages } })
    }

    #[tokio::test]
    async fn three_nested_pages_yield_sixty_unique_records() {
        let source = FakePages::new(vec![
            Ok(nested(samples(0, 25), 3)),
            Ok(nested(samples(25, 25), 3)),
            Ok(nested(samples(50, 10), 3)),
        ]);
        let all: Vec<Sample> = fetch_all_pages(&source, 100).await.unwrap();
        assert_eq!(all.len(), 60);
        let ids: Vec<String> = all.iter().map(|s| s.id.clone().unwrap()).collect();
        let expected: Vec<String> = (0..60).map(|i| format!("M-{:03}", i)).collect();
        assert_eq!(ids, expected);
        assert_eq!(*source.requested.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn bare_array_pages_match_nested_pages() {
        let nested_source = FakePages::new(vec![
            Ok(nested(samples(0, 2), 2)),
            Ok(nested(samples(2, 1), 2)),
        ]);
        let bare_source = FakePages::new(vec![
            Ok(Value::Array(samples(0, 2))),
            Ok(Value::Array(samples(2, 1))),
        ]);
        let from_nested: Vec<Sample> = fetch_all_pages(&nested_source, 100).await.unwrap();
        let from_bare: Vec<Sample> = fetch_all_pages(&bare_source, 100).await.unwrap();
        assert_eq!(from_nested, from_bare);
        // Without a page count the loop probes one page past the data.
        assert_eq!(*bare_source.requested.borrow(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unrecognized_envelope_ends_loop_without_error() {
        let source = FakePages::new(vec![
            Ok(json!({ "resultado": samples(0, 5) })),
            Ok(nested(samples(5, 5), 2)),
        ]);
        let all: Vec<Sample> = fetch_all_pages(&source, 100).await.unwrap();
        assert!(all.is_empty());
        assert_eq!(*source.requested.borrow(), vec![1]);
    }

    #[tokio::test]
    async fn error_mid_way_discards_partial_results() {
        let source = FakePages::new(vec![
            Ok(nested(samples(0, 25), 3)),
            Err(LabError::Cancelled),
            Ok(nested(samples(50, 10), 3)),
        ]);
        let outcome: Result<Vec<Sample>> = fetch_all_pages(&source, 100).await;
        assert!(matches!(outcome, Err(LabError::Status { status: 503, .. })));
        assert_eq!(*source.requested.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn page_cap_stops_a_backend_that_ignores_paging() {
        let same = Value::Array(samples(0, 3));
        let source = FakePages::new(vec![Ok(same.clone()), Ok(same.clone()), Ok(same.clone()), Ok(same)]);
        let all: Vec<Sample> = fetch_all_pages(&source, 2).await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(*source.requested.borrow(), vec![1, 2]);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped() {
        let source = FakePages::new(vec![Ok(json!({
            "data": [{ "estado": "Recibida" }, "not-an-object", { "estado": "Finalizada" }],
            "totalPages": 1
        }))]);
        let all: Vec<Sample> = fetch_all_pages(&source, 100).await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
