//! Chain Query Gateway client.
//!
//! Read-only JSON-RPC 2.0 access to the chain indexer: event queries, object
//! resolution, owned-object enumeration, balance lookup. Eventually
//! consistent — callers re-query after a mutating action instead of assuming
//! read-after-write.
//!
//! Decode happens here, at the boundary: a JSON-RPC `error` member or a
//! response that does not match the expected shape fails fast as
//! `Error::Gateway` / `Error::Decode`. Individual malformed items inside an
//! otherwise well-formed response (an event without the expected payload, an
//! object the indexer reports as deleted) are skipped, not fatal.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use suimarket_types::{EventCursor, ObjectId, Page, SuiAddress};
use tracing::warn;

use crate::error::Error;

/// One event from the event stream: its cursor-position id plus the
/// contract-defined JSON payload.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub id: EventCursor,
    pub parsed_json: Value,
}

/// A live on-chain object with content. `type_tag` is the full struct type
/// string; `fields` is the raw Move-field JSON, decoded further by the
/// component that asked for the object.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    pub object_id: ObjectId,
    pub type_tag: String,
    pub fields: Value,
}

/// The read surface this front-end consumes. Object-safe so views and the
/// synchronizer can be driven by a test double.
#[async_trait]
pub trait ChainGateway: Send + Sync {
    /// Query events of one Move event type, paginated by opaque cursor.
    async fn query_events(
        &self,
        event_type: &str,
        cursor: Option<EventCursor>,
        limit: usize,
        descending: bool,
    ) -> Result<Page<EventRecord>, Error>;

    /// Batch-resolve object ids. One slot per requested id, in order;
    /// `None` means the object no longer exists with readable content.
    async fn multi_get_objects(&self, ids: &[ObjectId]) -> Result<Vec<Option<ObjectRecord>>, Error>;

    /// Resolve a single object id.
    async fn get_object(&self, id: &ObjectId) -> Result<Option<ObjectRecord>, Error>;

    /// Objects owned by `owner`, filtered to one struct type.
    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        struct_type: &str,
    ) -> Result<Vec<ObjectRecord>, Error>;

    /// Total coin balance of `owner`, in MIST.
    async fn get_balance(&self, owner: &SuiAddress) -> Result<u64, Error>;
}

/// Concrete gateway over HTTP JSON-RPC. One endpoint, one attempt per call —
/// a failed read surfaces to the caller, who decides whether to re-poll.
pub struct JsonRpcGateway {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcGateway {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, Error> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(method, error = %e, "Gateway request failed");
                Error::Gateway(format!("{method}: {e}"))
            })?;

        let envelope: Value = response.json().await.map_err(|e| {
            warn!(method, error = %e, "Gateway returned non-JSON body");
            Error::Gateway(format!("{method}: invalid response body: {e}"))
        })?;

        if let Some(err) = envelope.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            warn!(method, code, message, "Gateway returned JSON-RPC error");
            return Err(Error::Gateway(format!("{method}: [{code}] {message}")));
        }

        envelope
            .get("result")
            .cloned()
            .ok_or_else(|| Error::Decode(format!("{method}: response missing result")))
    }
}

#[async_trait]
impl ChainGateway for JsonRpcGateway {
    async fn query_events(
        &self,
        event_type: &str,
        cursor: Option<EventCursor>,
        limit: usize,
        descending: bool,
    ) -> Result<Page<EventRecord>, Error> {
        let params = json!([
            { "MoveEventType": event_type },
            cursor,
            limit,
            descending,
        ]);
        let result = self.call("suix_queryEvents", params).await?;
        decode_event_page(result)
    }

    async fn multi_get_objects(&self, ids: &[ObjectId]) -> Result<Vec<Option<ObjectRecord>>, Error> {
        let params = json!([ids, { "showContent": true }]);
        let result = self.call("sui_multiGetObjects", params).await?;
        let entries: Vec<Value> = serde_json::from_value(result)
            .map_err(|e| Error::Decode(format!("multiGetObjects: {e}")))?;
        Ok(entries.into_iter().map(decode_object_record).collect())
    }

    async fn get_object(&self, id: &ObjectId) -> Result<Option<ObjectRecord>, Error> {
        let params = json!([id, { "showContent": true }]);
        let result = self.call("sui_getObject", params).await?;
        Ok(decode_object_record(result))
    }

    async fn get_owned_objects(
        &self,
        owner: &SuiAddress,
        struct_type: &str,
    ) -> Result<Vec<ObjectRecord>, Error> {
        let params = json!([
            owner,
            {
                "filter": { "StructType": struct_type },
                "options": { "showContent": true },
            },
            null,
            OWNED_OBJECTS_LIMIT,
        ]);
        let result = self.call("suix_getOwnedObjects", params).await?;
        let data = result
            .get("data")
            .cloned()
            .ok_or_else(|| Error::Decode("getOwnedObjects: response missing data".into()))?;
        let entries: Vec<Value> = serde_json::from_value(data)
            .map_err(|e| Error::Decode(format!("getOwnedObjects: {e}")))?;
        Ok(entries.into_iter().filter_map(decode_object_record).collect())
    }

    async fn get_balance(&self, owner: &SuiAddress) -> Result<u64, Error> {
        let result = self.call("suix_getBalance", json!([owner])).await?;
        let total = result
            .get("totalBalance")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Decode("getBalance: missing totalBalance".into()))?;
        total
            .parse()
            .map_err(|_| Error::Decode(format!("getBalance: non-numeric totalBalance {total:?}")))
    }
}

/// Single-page cap for the owned-objects view.
const OWNED_OBJECTS_LIMIT: usize = 50;

// --- Decode boundary ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEventPage {
    #[serde(default)]
    data: Vec<Value>,
    next_cursor: Option<EventCursor>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: EventCursor,
    #[serde(default)]
    parsed_json: Value,
}

/// Decode an event-query result. The page shape must match; individual
/// events that don't are skipped.
fn decode_event_page(result: Value) -> Result<Page<EventRecord>, Error> {
    let raw: RawEventPage =
        serde_json::from_value(result).map_err(|e| Error::Decode(format!("queryEvents: {e}")))?;
    let items = raw
        .data
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawEvent>(entry) {
            Ok(ev) => Some(EventRecord {
                id: ev.id,
                parsed_json: ev.parsed_json,
            }),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable event entry");
                None
            }
        })
        .collect();
    Ok(Page {
        items,
        next_cursor: raw.next_cursor,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectData {
    object_id: String,
    content: Option<RawObjectContent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectContent {
    data_type: String,
    #[serde(rename = "type")]
    type_tag: String,
    #[serde(default)]
    fields: Value,
}

/// Decode one object-fetch entry. Deleted/missing objects (the indexer
/// reports those under an `error` member) and non-Move content come back as
/// `None` — absence is the expected "consumed" signal, not a failure.
fn decode_object_record(entry: Value) -> Option<ObjectRecord> {
    let data = entry.get("data")?.clone();
    let raw: RawObjectData = serde_json::from_value(data).ok()?;
    let content = raw.content?;
    if content.data_type != "moveObject" {
        return None;
    }
    Some(ObjectRecord {
        object_id: ObjectId::new(raw.object_id),
        type_tag: content.type_tag,
        fields: content.fields,
    })
}
