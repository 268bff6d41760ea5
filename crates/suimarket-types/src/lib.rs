//! Shared types and pure-logic utilities for the suimarket front-end.
//! Zero chain-SDK dependency — plain serde shapes usable by any consumer.

mod ids;
mod mist;
mod model;

pub use ids::{ObjectId, SuiAddress};
pub use mist::{format_sui, format_sui_fixed, parse_sui, to_sui_string, AmountError, MIST_PER_SUI};
pub use model::{EventCursor, Listing, MarketplaceBalance, Nft, NftSnapshot, Page};
