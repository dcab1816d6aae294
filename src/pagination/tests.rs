//! Tests for pagination module

use super::*;
use crate::error::Error;
use crate::http::RateLimitedClient;
use crate::test_support::{config, response, ScriptedTransport};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

fn collector(
    transport: ScriptedTransport,
) -> (PaginatedCollector<Arc<ScriptedTransport>>, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let client = RateLimitedClient::with_transport(config(), Arc::clone(&transport)).unwrap();
    (PaginatedCollector::new(client), transport)
}

fn page(items: Value, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({"_results": items, "_pagination": {"next": next}}),
        None => json!({"_results": items, "_pagination": {}}),
    }
}

// ============================================================================
// Page decoding
// ============================================================================

#[test]
fn test_page_from_value() {
    let body = page(json!([{"id": "a"}, {"id": "b"}]), Some("https://api.test/x?page_token=2"));
    let page: Page<Value> = Page::from_value(body, &PageLayout::default()).unwrap();

    assert_eq!(page.items, vec![json!({"id": "a"}), json!({"id": "b"})]);
    assert_eq!(page.next.as_deref(), Some("https://api.test/x?page_token=2"));
}

#[test]
fn test_page_missing_or_null_fields() {
    let page: Page<Value> = Page::from_value(json!({}), &PageLayout::default()).unwrap();
    assert!(page.items.is_empty());
    assert!(page.next.is_none());

    let page: Page<Value> = Page::from_value(
        json!({"_results": null, "_pagination": {"next": null}}),
        &PageLayout::default(),
    )
    .unwrap();
    assert!(page.items.is_empty());
    assert!(page.next.is_none());
}

#[test]
fn test_page_empty_cursor_is_last_page() {
    let page: Page<Value> =
        Page::from_value(page(json!([1]), Some("")), &PageLayout::default()).unwrap();
    assert!(page.next.is_none());
}

#[test]
fn test_page_items_not_an_array() {
    let err = Page::<Value>::from_value(json!({"_results": {"id": 1}}), &PageLayout::default())
        .unwrap_err();
    assert_eq!(err, "expected an array at '_results', found an object");
}

#[test]
fn test_page_custom_layout() {
    let layout = PageLayout::new("$.data.items", "links.next");
    let body = json!({
        "data": {"items": [1, 2, 3]},
        "links": {"next": "https://api.test/items?cursor=abc"}
    });
    let page: Page<u32> = Page::from_value(body, &layout).unwrap();

    assert_eq!(page.items, vec![1, 2, 3]);
    assert_eq!(page.next.as_deref(), Some("https://api.test/items?cursor=abc"));
}

#[test]
fn test_page_typed_item_mismatch() {
    let err = Page::<u32>::from_value(json!({"_results": [1, "two"]}), &PageLayout::default())
        .unwrap_err();
    assert!(err.starts_with("item 1 at '_results'"));
}

// ============================================================================
// Collector
// ============================================================================

#[tokio::test]
async fn test_collect_preserves_order_across_pages() {
    let (collector, transport) = collector(
        ScriptedTransport::new()
            .respond(response(
                200,
                &[],
                page(json!(["a1", "a2"]), Some("https://api.test/inboxes?page_token=p2")),
            ))
            .respond(response(
                200,
                &[],
                page(json!(["a3"]), Some("https://api.test/inboxes?page_token=p3")),
            ))
            .respond(response(200, &[], page(json!(["a4", "a5", "a6"]), None))),
    );

    let items: Vec<String> = collector.collect_all("/inboxes").await.unwrap();
    assert_eq!(items, vec!["a1", "a2", "a3", "a4", "a5", "a6"]);

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "https://api.test/inboxes",
            "https://api.test/inboxes?page_token=p2",
            "https://api.test/inboxes?page_token=p3",
        ]
    );
}

#[tokio::test]
async fn test_collect_empty_collection() {
    let (collector, transport) =
        collector(ScriptedTransport::new().respond(response(200, &[], json!({"_results": []}))));

    let items: Vec<Value> = collector.collect_all("/inboxes").await.unwrap();
    assert!(items.is_empty());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_collect_continues_past_empty_page() {
    let (collector, transport) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([]), Some("https://api.test/c?page_token=2"))))
            .respond(response(200, &[], page(json!([{"id": "cnv_1"}]), None))),
    );

    let items: Vec<Value> = collector.collect_all("/c").await.unwrap();
    assert_eq!(items, vec![json!({"id": "cnv_1"})]);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_collect_into_appends_to_existing() {
    let (collector, _) =
        collector(ScriptedTransport::new().respond(response(200, &[], page(json!([3, 4]), None))));

    let items: Vec<u32> = collector.collect_into("/numbers", vec![1, 2]).await.unwrap();
    assert_eq!(items, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_collect_does_not_deduplicate() {
    let (collector, _) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([1, 1]), Some("https://api.test/n?p=2"))))
            .respond(response(200, &[], page(json!([1]), None))),
    );

    let items: Vec<u32> = collector.collect_all("/n").await.unwrap();
    assert_eq!(items, vec![1, 1, 1]);
}

#[tokio::test]
async fn test_collect_many_pages() {
    let mut transport = ScriptedTransport::new();
    for i in 0..2_000u32 {
        let next = format!("https://api.test/big?page_token={}", i + 1);
        transport = transport.respond(response(200, &[], page(json!([i]), Some(next.as_str()))));
    }
    let (collector, _) = collector(transport.respond(response(200, &[], page(json!([]), None))));

    let items: Vec<u32> = collector.collect_all("/big").await.unwrap();
    assert_eq!(items.len(), 2_000);
    assert_eq!(items.first(), Some(&0));
    assert_eq!(items.last(), Some(&1_999));
}

#[tokio::test(start_paused = true)]
async fn test_collect_waits_through_rate_limit() {
    let (collector, transport) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([1]), Some("https://api.test/n?p=2"))))
            .respond(response(429, &[("retry-after", "2")], json!({})))
            .respond(response(200, &[], page(json!([2]), None))),
    );

    let items: Vec<u32> = collector.collect_all("/n").await.unwrap();
    assert_eq!(items, vec![1, 2]);

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].url, requests[2].url);
}

#[tokio::test]
async fn test_error_status_aborts_by_default() {
    let (collector, transport) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([1]), Some("https://api.test/n?p=2"))))
            .respond(response(500, &[], json!({"_error": {"message": "boom"}}))),
    );

    let err = collector.collect_all::<u32>("/n").await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_error_status_read_as_page_when_lenient() {
    let (collector, _) = collector(
        ScriptedTransport::new().respond(response(404, &[], json!({"_error": {"status": 404}}))),
    );
    let collector = collector.fail_on_error_status(false);

    let items: Vec<Value> = collector.collect_all("/gone").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let (collector, _) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([1]), Some("https://api.test/n?p=2"))))
            .fail(Error::Timeout { timeout_ms: 10 }),
    );

    let err = collector.collect_all::<u32>("/n").await.unwrap_err();
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_malformed_page_reports_url() {
    let (collector, _) = collector(
        ScriptedTransport::new().respond(response(200, &[], json!({"_results": "nope"}))),
    );

    let err = collector.collect_all::<Value>("/bad").await.unwrap_err();
    match err {
        Error::PageDecode { url, message } => {
            assert_eq!(url, "/bad");
            assert!(message.contains("found a string"));
        }
        other => panic!("Expected PageDecode, got {other:?}"),
    }
}

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: String,
}

#[tokio::test]
async fn test_collect_typed_items() {
    let (collector, _) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([{"id": "inb_1", "extra": true}]), None))),
    );

    let items: Vec<Item> = collector.collect_all("/inboxes").await.unwrap();
    assert_eq!(
        items,
        vec![Item {
            id: "inb_1".to_string()
        }]
    );
}

#[tokio::test]
async fn test_independent_fetches_run_concurrently() {
    let (collector, _) = collector(
        ScriptedTransport::new()
            .respond(response(200, &[], page(json!([1]), None)))
            .respond(response(200, &[], page(json!([2]), None))),
    );

    let (a, b) = tokio::join!(
        collector.collect_all::<u32>("/a"),
        collector.collect_all::<u32>("/b")
    );
    let mut all = a.unwrap();
    all.extend(b.unwrap());
    all.sort_unstable();
    assert_eq!(all, vec![1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_wait_only_suspends_its_own_fetch() {
    let (limited, limited_transport) = collector(
        ScriptedTransport::new()
            .respond(response(429, &[("retry-after", "10")], json!({})))
            .respond(response(200, &[], page(json!([1]), None))),
    );
    let (clear, _) =
        collector(ScriptedTransport::new().respond(response(200, &[], page(json!([2]), None))));

    let start = tokio::time::Instant::now();
    let ((a, a_done), (b, b_done)) = tokio::join!(
        async {
            let items = limited.collect_all::<u32>("/a").await;
            (items, tokio::time::Instant::now())
        },
        async {
            let items = clear.collect_all::<u32>("/b").await;
            (items, tokio::time::Instant::now())
        }
    );

    assert_eq!(a.unwrap(), vec![1]);
    assert_eq!(b.unwrap(), vec![2]);
    assert!(b_done - start < std::time::Duration::from_secs(1));
    assert!(a_done - start >= std::time::Duration::from_secs(10));

    let retry_sent = limited_transport.requests()[1].at;
    assert!(b_done < retry_sent);
}
