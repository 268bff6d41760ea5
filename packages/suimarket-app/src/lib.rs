//! # Suimarket App
//!
//! Client-side core for the Sui NFT marketplace front-end. Connects an
//! account, keeps listing/balance/NFT state in sync with a chain-indexing
//! JSON-RPC gateway, and turns user actions into fully-specified contract
//! call intents for a wallet to sign and execute.
//!
//! ## Quick Start
//! ```bash
//! cargo run --bin suimarket-watch
//! ```
//!
//! The marketplace contract itself is a black box behind fixed entry points;
//! this crate owns only the read synchronization and the intent construction.

pub mod config;
mod controller;
mod error;
pub mod gateway;
pub mod intent;
pub mod sync;
pub mod views;
mod wallet;

pub use config::MarketConfig;
pub use controller::{ActionController, ActionStatus, Refresh};
pub use error::Error;
pub use gateway::{ChainGateway, EventRecord, JsonRpcGateway, ObjectRecord};
pub use intent::{CallArg, TransactionIntent};
pub use sync::{ListingSynchronizer, PollSlot, Ticket, PAGE_SIZE};
pub use wallet::{ExecuteReceipt, WalletConnector};
