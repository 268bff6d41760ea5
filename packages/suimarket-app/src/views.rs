//! View-models.
//!
//! The typed state behind each screen of the front-end: wallet overview,
//! owned collection (with the mint / list-for-sale / burn affordances), the
//! marketplace listing grid, and the admin fee panel. No rendering — just
//! the read slots, form fields, gating rules, and submission plumbing a
//! renderer binds to.
//!
//! Form rules, shared by every action: a submission that fails keeps the
//! user-entered values so the action can be retried without re-typing; a
//! successful one clears them.

use std::collections::HashMap;
use std::sync::Arc;

use suimarket_types::{
    format_sui, format_sui_fixed, EventCursor, Listing, MarketplaceBalance, Nft, ObjectId, Page,
    SuiAddress,
};

use crate::config::MarketConfig;
use crate::controller::{ActionController, ActionStatus, Refresh};
use crate::error::Error;
use crate::gateway::{ChainGateway, ObjectRecord};
use crate::intent;
use crate::sync::{ListingSynchronizer, PollSlot};
use crate::wallet::WalletConnector;

// --- Wallet overview ---

/// Connected account + SUI balance.
#[derive(Default)]
pub struct WalletOverview {
    pub balance: PollSlot<u64>,
}

impl WalletOverview {
    /// Re-query the balance for `account`. Owner-scoped reads are disabled
    /// while no wallet is connected.
    pub async fn refresh(&mut self, gateway: &dyn ChainGateway, account: Option<&SuiAddress>) {
        let Some(owner) = account else { return };
        let ticket = self.balance.issue();
        match gateway.get_balance(owner).await {
            Ok(mist) => self.balance.apply_ok(ticket, mist),
            Err(e) => self.balance.apply_err(ticket, e.to_string()),
        };
    }

    /// Display string, thousands-grouped, up to 6 fractional digits.
    pub fn balance_display(&self) -> String {
        format_sui(self.balance.value().copied().unwrap_or(0), 6)
    }
}

// --- Mint form ---

/// The three-field mint form.
#[derive(Default)]
pub struct MintForm {
    pub name: String,
    pub description: String,
    pub url: String,
    controller: ActionController,
}

impl MintForm {
    pub fn status(&self) -> ActionStatus {
        self.controller.status()
    }

    pub async fn submit(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
    ) -> Result<Refresh, Error> {
        if self.controller.is_pending() {
            return Err(Error::Validation("Action already in progress".into()));
        }
        let intent = intent::mint_nft(config, &self.name, &self.description, &self.url)?;
        let refresh = self
            .controller
            .submit(wallet, intent, Refresh::OwnedObjects)
            .await?;
        self.name.clear();
        self.description.clear();
        self.url.clear();
        Ok(refresh)
    }
}

// --- List-for-sale form ---

/// Per-NFT listing form; `price` is the user-entered decimal SUI amount.
pub struct ListForSaleForm {
    pub nft_id: ObjectId,
    pub price: String,
    controller: ActionController,
}

impl ListForSaleForm {
    pub fn new(nft_id: ObjectId) -> Self {
        Self {
            nft_id,
            price: String::new(),
            controller: ActionController::new(),
        }
    }

    pub fn status(&self) -> ActionStatus {
        self.controller.status()
    }

    pub async fn submit(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
    ) -> Result<Refresh, Error> {
        if self.controller.is_pending() {
            return Err(Error::Validation("Action already in progress".into()));
        }
        let intent = intent::list_nft(config, &self.nft_id, &self.price)?;
        let refresh = self
            .controller
            .submit(wallet, intent, Refresh::OwnedObjects)
            .await?;
        self.price.clear();
        Ok(refresh)
    }
}

// --- Owned collection ---

/// The connected account's NFTs plus the mint form and per-NFT actions.
#[derive(Default)]
pub struct OwnedCollection {
    pub nfts: PollSlot<Vec<Nft>>,
    pub mint: MintForm,
    burns: HashMap<ObjectId, ActionController>,
}

impl OwnedCollection {
    /// Re-query the owned NFT set for `account`.
    pub async fn refresh(
        &mut self,
        gateway: &dyn ChainGateway,
        config: &MarketConfig,
        account: Option<&SuiAddress>,
    ) {
        let Some(owner) = account else { return };
        let ticket = self.nfts.issue();
        match gateway
            .get_owned_objects(owner, &config.nft_struct_type())
            .await
        {
            Ok(records) => {
                let nfts = records.iter().map(decode_nft).collect();
                self.nfts.apply_ok(ticket, nfts)
            }
            Err(e) => self.nfts.apply_err(ticket, e.to_string()),
        };
    }

    pub fn burn_status(&self, nft_id: &ObjectId) -> ActionStatus {
        self.burns
            .get(nft_id)
            .map(|c| c.status())
            .unwrap_or_default()
    }

    pub async fn burn(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
        nft_id: &ObjectId,
    ) -> Result<Refresh, Error> {
        let intent = intent::burn_nft(config, nft_id);
        self.burns
            .entry(nft_id.clone())
            .or_default()
            .submit(wallet, intent, Refresh::OwnedObjects)
            .await
    }
}

fn decode_nft(record: &ObjectRecord) -> Nft {
    let text = |key: &str| {
        record
            .fields
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };
    Nft {
        object_id: record.object_id.clone(),
        name: text("name"),
        description: text("description"),
        url: text("url"),
    }
}

// --- Marketplace ---

/// The listing grid: current page, pagination cursor, and one action
/// controller per listing row (buys and cancels on different rows may
/// overlap in time).
#[derive(Default)]
pub struct MarketplaceView {
    pub page: PollSlot<Page<Listing>>,
    cursor: Option<EventCursor>,
    rows: HashMap<ObjectId, ActionController>,
}

impl MarketplaceView {
    /// Re-fetch the current page.
    pub async fn refresh(&mut self, synchronizer: &ListingSynchronizer) {
        let ticket = self.page.issue();
        match synchronizer.fetch_page(self.cursor.clone()).await {
            Ok(page) => self.page.apply_ok(ticket, page),
            Err(e) => self.page.apply_err(ticket, e.to_string()),
        };
    }

    /// Advance to the next page, if the last fetch reported one.
    pub fn load_more(&mut self) -> bool {
        match self.page.value().and_then(|p| p.next_cursor.clone()) {
            Some(cursor) => {
                self.cursor = Some(cursor);
                true
            }
            None => false,
        }
    }

    /// Reset pagination to the newest page.
    pub fn rewind(&mut self) {
        self.cursor = None;
    }

    pub fn can_buy(listing: &Listing, account: Option<&SuiAddress>) -> bool {
        account.is_some_and(|a| !listing.seller.matches(a))
    }

    pub fn can_cancel(listing: &Listing, account: Option<&SuiAddress>) -> bool {
        account.is_some_and(|a| listing.seller.matches(a))
    }

    pub fn row_status(&self, listing_id: &ObjectId) -> ActionStatus {
        self.rows
            .get(listing_id)
            .map(|c| c.status())
            .unwrap_or_default()
    }

    pub async fn buy(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
        listing: &Listing,
    ) -> Result<Refresh, Error> {
        let buyer = wallet
            .account()
            .ok_or_else(|| Error::Validation("Connect a wallet first".into()))?;
        let intent = intent::buy_nft(config, listing, &buyer)?;
        self.row(listing)
            .submit(wallet, intent, Refresh::Listings)
            .await
    }

    pub async fn cancel(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
        listing: &Listing,
    ) -> Result<Refresh, Error> {
        let caller = wallet
            .account()
            .ok_or_else(|| Error::Validation("Connect a wallet first".into()))?;
        let intent = intent::cancel_listing(config, listing, &caller)?;
        self.row(listing)
            .submit(wallet, intent, Refresh::Listings)
            .await
    }

    fn row(&mut self, listing: &Listing) -> &ActionController {
        self.rows.entry(listing.object_id.clone()).or_default()
    }
}

/// Listing price in whole SUI for display.
pub fn price_display(listing: &Listing) -> String {
    format_sui(listing.price, 6)
}

// --- Admin panel ---

/// Fee management, gated on the configured admin address.
#[derive(Default)]
pub struct AdminPanel {
    pub amount: String,
    pub balance: PollSlot<MarketplaceBalance>,
    controller: ActionController,
}

impl AdminPanel {
    pub fn is_admin(config: &MarketConfig, account: Option<&SuiAddress>) -> bool {
        account.is_some_and(|a| config.admin().matches(a))
    }

    pub fn status(&self) -> ActionStatus {
        self.controller.status()
    }

    /// Accrued fees as of the last applied poll, 4 fixed decimals.
    pub fn balance_display(&self) -> String {
        format_sui_fixed(
            self.balance.value().map(|b| b.available_mist).unwrap_or(0),
            4,
        )
    }

    /// Re-read the marketplace singleton's fee balance.
    pub async fn refresh_balance(
        &mut self,
        gateway: &dyn ChainGateway,
        config: &MarketConfig,
    ) {
        let ticket = self.balance.issue();
        match read_marketplace_balance(gateway, config).await {
            Ok(balance) => self.balance.apply_ok(ticket, balance),
            Err(e) => self.balance.apply_err(ticket, e.to_string()),
        };
    }

    pub async fn withdraw(
        &mut self,
        config: &MarketConfig,
        wallet: &dyn WalletConnector,
    ) -> Result<Refresh, Error> {
        if self.controller.is_pending() {
            return Err(Error::Validation("Action already in progress".into()));
        }
        let caller = wallet
            .account()
            .ok_or_else(|| Error::Validation("Unauthorized: Admin access required".into()))?;
        let available = self
            .balance
            .value()
            .map(|b| b.available_mist)
            .unwrap_or(0);
        let intent = intent::withdraw_fees(config, &caller, &self.amount, available)?;
        let refresh = self
            .controller
            .submit(wallet, intent, Refresh::MarketplaceBalance)
            .await?;
        self.amount.clear();
        Ok(refresh)
    }
}

/// Fetch the marketplace singleton and decode its accrued-fee balance.
pub async fn read_marketplace_balance(
    gateway: &dyn ChainGateway,
    config: &MarketConfig,
) -> Result<MarketplaceBalance, Error> {
    let record = gateway
        .get_object(&config.marketplace_object())
        .await?
        .ok_or_else(|| Error::Decode("marketplace object not found".into()))?;
    let available_mist = match record.fields.get("balance") {
        Some(serde_json::Value::String(s)) => s
            .parse()
            .map_err(|_| Error::Decode(format!("marketplace balance not numeric: {s:?}")))?,
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| Error::Decode("marketplace balance out of range".into()))?,
        _ => return Err(Error::Decode("marketplace object missing balance field".into())),
    };
    Ok(MarketplaceBalance { available_mist })
}

/// Shared handle bundling what every view needs: configuration, gateway,
/// and the listing synchronizer built over both.
pub struct AppHandle {
    pub config: Arc<MarketConfig>,
    pub gateway: Arc<dyn ChainGateway>,
    pub synchronizer: ListingSynchronizer,
}

impl AppHandle {
    pub fn new(config: MarketConfig, gateway: Arc<dyn ChainGateway>) -> Self {
        let config = Arc::new(config);
        let synchronizer = ListingSynchronizer::new(Arc::clone(&gateway), Arc::clone(&config));
        Self {
            config,
            gateway,
            synchronizer,
        }
    }
}
