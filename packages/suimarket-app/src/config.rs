//! Front-end configuration.
//!
//! Built once at process start and passed explicitly to every component that
//! needs it. The contract identifiers and admin address are opaque strings —
//! the only validation they get is non-emptiness.

use serde::Deserialize;
use suimarket_types::{ObjectId, SuiAddress};

use crate::error::Error;

/// Configuration for the marketplace front-end.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "defaults::rpc_url")]
    pub rpc_url: String,

    /// Package id of the deployed marketplace contract.
    #[serde(default = "defaults::package_id")]
    pub package_id: String,

    /// Module name inside the package.
    #[serde(default = "defaults::module_name")]
    pub module_name: String,

    /// The marketplace singleton object (fee escrow).
    #[serde(default = "defaults::marketplace_id")]
    pub marketplace_id: String,

    /// Address allowed to withdraw accrued fees.
    #[serde(default = "defaults::admin_address")]
    pub admin_address: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            rpc_url: defaults::rpc_url(),
            package_id: defaults::package_id(),
            module_name: defaults::module_name(),
            marketplace_id: defaults::marketplace_id(),
            admin_address: defaults::admin_address(),
        }
    }
}

impl MarketConfig {
    /// Reject empty identifiers up front; everything else stays opaque.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("rpc_url", &self.rpc_url),
            ("package_id", &self.package_id),
            ("module_name", &self.module_name),
            ("marketplace_id", &self.marketplace_id),
            ("admin_address", &self.admin_address),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Fully-qualified call target `package::module::function`.
    pub fn target(&self, function: &str) -> String {
        format!("{}::{}::{}", self.package_id, self.module_name, function)
    }

    /// Struct type of a live listing object.
    pub fn listing_struct_type(&self) -> String {
        format!("{}::{}::Listing", self.package_id, self.module_name)
    }

    /// Struct type of an NFT owned by an account.
    pub fn nft_struct_type(&self) -> String {
        format!("{}::{}::NFT", self.package_id, self.module_name)
    }

    /// Move event type emitted when an NFT is listed for sale.
    pub fn list_event_type(&self) -> String {
        format!("{}::{}::ListNFTEvent", self.package_id, self.module_name)
    }

    pub fn marketplace_object(&self) -> ObjectId {
        ObjectId::new(self.marketplace_id.clone())
    }

    pub fn admin(&self) -> SuiAddress {
        SuiAddress::new(self.admin_address.clone())
    }
}

mod defaults {
    fn env_or(var: &str, fallback: &str) -> String {
        match std::env::var(var) {
            Ok(v) if !v.is_empty() => v,
            _ => fallback.into(),
        }
    }

    pub fn rpc_url() -> String {
        let net = std::env::var("SUIMARKET_NETWORK").unwrap_or_else(|_| "testnet".into());
        let fallback = if net.contains("mainnet") {
            "https://fullnode.mainnet.sui.io:443"
        } else {
            "https://fullnode.testnet.sui.io:443"
        };
        env_or("SUIMARKET_RPC_URL", fallback)
    }

    pub fn package_id() -> String {
        env_or(
            "SUIMARKET_PACKAGE_ID",
            "0x23afd63a5cd674ed90e24b8c69da3fdc2996d97dfea470c1d5e301fc655fe179",
        )
    }

    pub fn module_name() -> String {
        env_or("SUIMARKET_MODULE_NAME", "nft_marketplace")
    }

    pub fn marketplace_id() -> String {
        env_or(
            "SUIMARKET_MARKETPLACE_ID",
            "0x6bc5e931c750fccaf577559fd46d02859eac5f3dcf459282ca41038392f5e1e6",
        )
    }

    pub fn admin_address() -> String {
        env_or(
            "SUIMARKET_ADMIN_ADDRESS",
            "0xc835ecbb489cdfd4dd4dc80608a8ca5cab4df5b8c545ebe549f173aa9ce1e3a7",
        )
    }
}
