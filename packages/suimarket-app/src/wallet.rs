//! Wallet connector seam.
//!
//! Key management and signing live outside this crate. The connector
//! exposes the currently connected account (if any) and a single-attempt
//! sign-and-execute call; completion is asynchronous and cannot be
//! cancelled once started.

use async_trait::async_trait;
use suimarket_types::SuiAddress;

use crate::error::Error;
use crate::intent::TransactionIntent;

/// Receipt for a successfully executed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteReceipt {
    pub digest: String,
}

/// External wallet: account accessor + sign/execute. One attempt per call;
/// failures carry the wallet's reason verbatim in [`Error::Execution`].
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Currently connected account, or `None` when no wallet is connected.
    fn account(&self) -> Option<SuiAddress>;

    /// Sign and execute a prepared intent, suspending until the wallet
    /// reports completion.
    async fn sign_and_execute(&self, intent: &TransactionIntent) -> Result<ExecuteReceipt, Error>;
}
