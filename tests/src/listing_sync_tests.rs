//! Integration tests for the listing synchronizer.
//!
//! Covers the event-to-object resolution pipeline: type-mismatch filtering
//! of consumed listings, cursor pagination over the event stream, partial
//! tolerance of malformed events, and the empty-page / failed-query
//! distinction.

use std::sync::Arc;

use suimarket_app::{ChainGateway, ListingSynchronizer, PAGE_SIZE};
use suimarket_types::EventCursor;

use crate::utils::{cursor, list_event, listing_object, test_config, FakeGateway, LISTING_TYPE, NFT_TYPE};

fn synchronizer(gateway: &Arc<FakeGateway>) -> ListingSynchronizer {
    ListingSynchronizer::new(
        Arc::clone(gateway) as Arc<dyn ChainGateway>,
        Arc::new(test_config()),
    )
}

#[tokio::test]
async fn test_page_contains_only_live_listings() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(
        None,
        vec![
            list_event("E1", Some("0xl1")),
            list_event("E2", Some("0xl2")),
            list_event("E3", Some("0xl3")),
        ],
        None,
    );
    // l1 is alive, l2 was deleted outright, l3 was consumed by a buy and its
    // id now resolves to a plain NFT object.
    gateway.put_object(listing_object("0xl1", LISTING_TYPE, "0xseller", 5));
    gateway.put_object(listing_object("0xl3", NFT_TYPE, "0xseller", 5));

    let page = synchronizer(&gateway).fetch_page(None).await?;

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].object_id.as_str(), "0xl1");
    Ok(())
}

#[tokio::test]
async fn test_pagination_over_ten_events() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());

    let first: Vec<_> = (0..PAGE_SIZE)
        .map(|i| list_event(&format!("E{i}"), Some(&format!("0xl{i}"))))
        .collect();
    let second: Vec<_> = (PAGE_SIZE..10)
        .map(|i| list_event(&format!("E{i}"), Some(&format!("0xl{i}"))))
        .collect();
    gateway.stage_event_page(None, first, Some("E7"));
    gateway.stage_event_page(Some("E7"), second, None);
    for i in 0..10 {
        gateway.put_object(listing_object(
            &format!("0xl{i}"),
            LISTING_TYPE,
            "0xseller",
            100 + i as u64,
        ));
    }

    let sync = synchronizer(&gateway);

    let page1 = sync.fetch_page(None).await?;
    assert_eq!(page1.items.len(), 8);
    let next = page1.next_cursor.clone().expect("first page must report a cursor");
    assert_eq!(next, cursor("E7"));

    let page2 = sync.fetch_page(Some(next)).await?;
    assert_eq!(page2.items.len(), 2);
    assert!(page2.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn test_refetch_with_same_cursor_is_idempotent() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(None, vec![list_event("E1", Some("0xl1"))], None);
    gateway.put_object(listing_object("0xl1", LISTING_TYPE, "0xseller", 9));

    let sync = synchronizer(&gateway);
    let a = sync.fetch_page(None).await?;
    let b = sync.fetch_page(None).await?;
    assert_eq!(a, b);
    Ok(())
}

#[tokio::test]
async fn test_malformed_event_skipped_without_failing_page() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(
        None,
        vec![
            list_event("E1", None), // payload lacks listing_id
            list_event("E2", Some("0xl2")),
        ],
        None,
    );
    gateway.put_object(listing_object("0xl2", LISTING_TYPE, "0xseller", 3));

    let page = synchronizer(&gateway).fetch_page(None).await?;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].object_id.as_str(), "0xl2");
    Ok(())
}

#[tokio::test]
async fn test_zero_events_is_valid_empty_page() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(None, vec![], None);

    let page = synchronizer(&gateway).fetch_page(None).await?;
    assert!(page.is_empty());
    assert!(page.next_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn test_gateway_outage_is_an_error_not_an_empty_page() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.fail_event_query(None, "connection refused");

    let result = synchronizer(&gateway).fetch_page(None).await;
    assert!(result.is_err(), "an outage must stay distinguishable from zero matches");
}

#[tokio::test]
async fn test_listing_bought_between_event_and_resolution() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(None, vec![list_event("E1", Some("0xl1"))], None);
    gateway.put_object(listing_object("0xl1", LISTING_TYPE, "0xseller", 7));

    let sync = synchronizer(&gateway);
    assert_eq!(sync.fetch_page(None).await?.items.len(), 1);

    // The buy consumes the listing object; the event remains in the stream.
    gateway.remove_object("0xl1");
    assert!(sync.fetch_page(None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_decoded_listing_carries_snapshot_fields() -> anyhow::Result<()> {
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(None, vec![list_event("E1", Some("0xl1"))], None);
    gateway.put_object(listing_object("0xl1", LISTING_TYPE, "0xSeller", 1_500_000_000));

    let page = synchronizer(&gateway).fetch_page(None).await?;
    let listing = &page.items[0];
    assert_eq!(listing.price, 1_500_000_000);
    assert_eq!(listing.seller.as_str(), "0xSeller");
    assert_eq!(listing.nft.name, "NFT 0xl1");
    Ok(())
}

#[tokio::test]
async fn test_cursor_round_trips_unmodified() -> anyhow::Result<()> {
    // The cursor handed back by one query must be passed on verbatim.
    let gateway = Arc::new(FakeGateway::new());
    gateway.stage_event_page(None, vec![], Some("Opaque/Token=="));

    let sync = synchronizer(&gateway);
    let page = sync.fetch_page(None).await?;
    assert_eq!(
        page.next_cursor,
        Some(EventCursor {
            tx_digest: "Opaque/Token==".into(),
            event_seq: "0".into(),
        })
    );
    Ok(())
}
