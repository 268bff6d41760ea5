//! Listing synchronization.
//!
//! Pagination advances over the *event stream* (listing-created events,
//! newest first); the object set is re-resolved live on every page. A
//! listing whose backing object has been consumed by a buy or cancel simply
//! stops matching the expected struct type and drops out of the page —
//! absence is the signal, not an error.

use std::sync::Arc;
use suimarket_types::{EventCursor, Listing, NftSnapshot, ObjectId, Page, SuiAddress};
use tracing::debug;

use crate::config::MarketConfig;
use crate::error::Error;
use crate::gateway::{ChainGateway, ObjectRecord};

/// Fixed event-page size.
pub const PAGE_SIZE: usize = 8;

/// Polls the gateway for listing events and resolves them to live listings.
pub struct ListingSynchronizer {
    gateway: Arc<dyn ChainGateway>,
    config: Arc<MarketConfig>,
}

impl ListingSynchronizer {
    pub fn new(gateway: Arc<dyn ChainGateway>, config: Arc<MarketConfig>) -> Self {
        Self { gateway, config }
    }

    /// Fetch one page of alive listings starting at `cursor` (`None` for the
    /// first page). Idempotent; safe to re-invoke with the same cursor.
    pub async fn fetch_page(
        &self,
        cursor: Option<EventCursor>,
    ) -> Result<Page<Listing>, Error> {
        let events = self
            .gateway
            .query_events(&self.config.list_event_type(), cursor, PAGE_SIZE, true)
            .await?;

        let listing_ids: Vec<ObjectId> = events
            .items
            .iter()
            .filter_map(|event| {
                match event.parsed_json.get("listing_id").and_then(|v| v.as_str()) {
                    Some(id) if !id.is_empty() => Some(ObjectId::new(id)),
                    _ => {
                        debug!(cursor = ?event.id, "Event payload lacks listing_id, skipping");
                        None
                    }
                }
            })
            .collect();

        if listing_ids.is_empty() {
            return Ok(Page::empty(events.next_cursor));
        }

        let objects = self.gateway.multi_get_objects(&listing_ids).await?;

        let expected_type = self.config.listing_struct_type();
        let items = objects
            .into_iter()
            .flatten()
            .filter(|record| record.type_tag == expected_type)
            .filter_map(|record| decode_listing(&record))
            .collect();

        Ok(Page {
            items,
            next_cursor: events.next_cursor,
        })
    }
}

/// Decode a listing object's Move fields. Records missing the seller or
/// price are malformed and skipped; NFT metadata falls back to empty
/// strings so one bad snapshot can't hide a live listing.
fn decode_listing(record: &ObjectRecord) -> Option<Listing> {
    let fields = &record.fields;
    let seller = fields.get("seller")?.as_str()?;
    let price = match fields.get("price")? {
        serde_json::Value::String(s) => s.parse().ok()?,
        serde_json::Value::Number(n) => n.as_u64()?,
        _ => return None,
    };

    let nft = fields
        .get("nft")
        .and_then(|n| n.get("fields"))
        .cloned()
        .unwrap_or_default();
    let text = |key: &str| {
        nft.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Some(Listing {
        object_id: record.object_id.clone(),
        seller: SuiAddress::new(seller),
        price,
        nft: NftSnapshot {
            name: text("name"),
            description: text("description"),
            image_url: text("url"),
        },
    })
}

// --- Poll slots ---

/// Ticket for one issued poll. Not copyable: applying it consumes it.
#[derive(Debug)]
pub struct Ticket(u64);

/// Generation-counted slot for a polled read.
///
/// Issuing a poll bumps the generation; only the response carrying the
/// latest ticket may be applied, so a slow in-flight read from before a
/// newer poll can never overwrite the newer result. A failed read records
/// its error but keeps the previously displayed value, and an empty result
/// stays distinguishable from a failed query.
#[derive(Debug)]
pub struct PollSlot<T> {
    issued: u64,
    applied: u64,
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for PollSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PollSlot<T> {
    pub fn new() -> Self {
        Self {
            issued: 0,
            applied: 0,
            value: None,
            error: None,
        }
    }

    /// Start a new poll. Supersedes every ticket issued before.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Apply a successful read. Returns false (and changes nothing) if a
    /// newer poll was issued after this ticket.
    pub fn apply_ok(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.applied = ticket.0;
        self.value = Some(value);
        self.error = None;
        true
    }

    /// Record a failed read. The last good value stays in place.
    pub fn apply_err(&mut self, ticket: Ticket, message: String) -> bool {
        if ticket.0 != self.issued {
            return false;
        }
        self.applied = ticket.0;
        self.error = Some(message);
        true
    }

    /// Latest applied value, if any poll has succeeded yet.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Error from the latest applied poll, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while an issued poll has not been applied yet.
    pub fn is_loading(&self) -> bool {
        self.issued != self.applied
    }
}
