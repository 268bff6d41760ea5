//! Read-only projections of on-chain marketplace state.
//!
//! Every value here is re-derived wholesale from a gateway query and replaced
//! on the next successful poll — never patched in place.

use serde::{Deserialize, Serialize};

use crate::ids::{ObjectId, SuiAddress};

/// Metadata snapshot of the NFT held inside a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftSnapshot {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

/// A live marketplace listing: an escrowed NFT, its seller, and the asking
/// price in MIST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub object_id: ObjectId,
    pub seller: SuiAddress,
    pub price: u64,
    pub nft: NftSnapshot,
}

/// An NFT owned by the connected account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nft {
    pub object_id: ObjectId,
    pub name: String,
    pub description: String,
    pub url: String,
}

/// Opaque pagination token from the event stream. Passed back to the
/// gateway unmodified to continue where the previous page stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCursor {
    pub tx_digest: String,
    pub event_seq: String,
}

/// One page of query results. `next_cursor == None` means no further pages
/// existed as of the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<EventCursor>,
}

impl<T> Page<T> {
    pub fn empty(next_cursor: Option<EventCursor>) -> Self {
        Self { items: Vec::new(), next_cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Accrued fees held by the marketplace singleton, available to the admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceBalance {
    pub available_mist: u64,
}
