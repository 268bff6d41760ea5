//! Transaction intent construction.
//!
//! Pure mapping from a validated user action to a fully-specified contract
//! call: target `package::module::function` plus an ordered, encoding-tagged
//! argument list. Argument order must match the deployed entry signatures
//! exactly — this module is the single place where that order lives.
//!
//! Every builder validates its inputs first and returns
//! `Error::Validation` without constructing an intent when they fail; no
//! network traffic happens on a rejected action.

use suimarket_types::{parse_sui, Listing, ObjectId, SuiAddress};

use crate::config::MarketConfig;
use crate::error::Error;

pub const MINT_METHOD: &str = "mint_to_sender";
pub const LIST_METHOD: &str = "list_nft_for_sale";
pub const BUY_METHOD: &str = "buy_nft";
pub const BURN_METHOD: &str = "burn_nft";
pub const CANCEL_METHOD: &str = "cancel_listing";
pub const UPDATE_DESCRIPTION_METHOD: &str = "update_nft_description";
pub const WITHDRAW_METHOD: &str = "withdraw_marketplace_fees";

/// One call argument, tagged with its on-chain encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Reference to an owned or shared object.
    Object(ObjectId),
    /// A coin split off the gas coin for exactly this many MIST.
    SplitFromGas(u64),
    /// Pure unsigned 64-bit integer.
    PureU64(u64),
    /// Pure address.
    PureAddress(SuiAddress),
    /// Pure UTF-8 string.
    PureString(String),
}

/// A fully-specified, not-yet-signed contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    pub target: String,
    pub args: Vec<CallArg>,
}

/// Mint a new NFT to the sender. All three metadata strings are required.
pub fn mint_nft(
    config: &MarketConfig,
    name: &str,
    description: &str,
    image_url: &str,
) -> Result<TransactionIntent, Error> {
    let name = required(name, "Name is required")?;
    let description = required(description, "Description is required")?;
    let image_url = required(image_url, "Image URL is required")?;

    Ok(TransactionIntent {
        target: config.target(MINT_METHOD),
        args: vec![
            CallArg::PureString(name),
            CallArg::PureString(description),
            CallArg::PureString(image_url),
            CallArg::Object(config.marketplace_object()),
        ],
    })
}

/// List an owned NFT for sale. `price_sui` is the user-entered decimal
/// whole-SUI amount; it must convert to at least 1 MIST.
pub fn list_nft(
    config: &MarketConfig,
    nft_id: &ObjectId,
    price_sui: &str,
) -> Result<TransactionIntent, Error> {
    let price_mist = parse_sui(price_sui)
        .map_err(|_| Error::Validation("Price must be greater than 0 SUI".into()))?;
    if price_mist == 0 {
        return Err(Error::Validation("Price must be greater than 0 SUI".into()));
    }

    Ok(TransactionIntent {
        target: config.target(LIST_METHOD),
        args: vec![
            CallArg::Object(nft_id.clone()),
            CallArg::PureU64(price_mist),
        ],
    })
}

/// Buy a listed NFT. The payment coin is split from gas for exactly the
/// listing price. Sellers cannot buy their own listing.
pub fn buy_nft(
    config: &MarketConfig,
    listing: &Listing,
    buyer: &SuiAddress,
) -> Result<TransactionIntent, Error> {
    if listing.seller.matches(buyer) {
        return Err(Error::Validation("Cannot buy your own listing".into()));
    }

    Ok(TransactionIntent {
        target: config.target(BUY_METHOD),
        args: vec![
            CallArg::Object(listing.object_id.clone()),
            CallArg::SplitFromGas(listing.price),
            CallArg::Object(config.marketplace_object()),
        ],
    })
}

/// Cancel a listing. Only the seller may cancel.
pub fn cancel_listing(
    config: &MarketConfig,
    listing: &Listing,
    caller: &SuiAddress,
) -> Result<TransactionIntent, Error> {
    if !listing.seller.matches(caller) {
        return Err(Error::Validation(
            "Only the seller can cancel a listing".into(),
        ));
    }

    Ok(TransactionIntent {
        target: config.target(CANCEL_METHOD),
        args: vec![CallArg::Object(listing.object_id.clone())],
    })
}

/// Burn an owned NFT.
pub fn burn_nft(config: &MarketConfig, nft_id: &ObjectId) -> TransactionIntent {
    TransactionIntent {
        target: config.target(BURN_METHOD),
        args: vec![CallArg::Object(nft_id.clone())],
    }
}

/// Replace an owned NFT's description.
pub fn update_description(
    config: &MarketConfig,
    nft_id: &ObjectId,
    description: &str,
) -> Result<TransactionIntent, Error> {
    let description = required(description, "Description is required")?;

    Ok(TransactionIntent {
        target: config.target(UPDATE_DESCRIPTION_METHOD),
        args: vec![
            CallArg::Object(nft_id.clone()),
            CallArg::PureString(description),
        ],
    })
}

/// Withdraw accrued marketplace fees to the caller. Requires the configured
/// admin identity (case-insensitive), a positive amount, and enough balance
/// in the marketplace object as of the last read.
pub fn withdraw_fees(
    config: &MarketConfig,
    caller: &SuiAddress,
    amount_sui: &str,
    available_mist: u64,
) -> Result<TransactionIntent, Error> {
    if !config.admin().matches(caller) {
        return Err(Error::Validation(
            "Unauthorized: Admin access required".into(),
        ));
    }
    let amount_mist = parse_sui(amount_sui)
        .map_err(|_| Error::Validation("Amount must be greater than 0".into()))?;
    if amount_mist == 0 {
        return Err(Error::Validation("Amount must be greater than 0".into()));
    }
    if amount_mist > available_mist {
        return Err(Error::Validation(
            "Insufficient balance in marketplace".into(),
        ));
    }

    Ok(TransactionIntent {
        target: config.target(WITHDRAW_METHOD),
        args: vec![
            CallArg::Object(config.marketplace_object()),
            CallArg::PureU64(amount_mist),
            CallArg::PureAddress(caller.clone()),
        ],
    })
}

fn required(value: &str, message: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::Validation(message.into()))
    } else {
        Ok(trimmed.to_string())
    }
}
