//! Action control.
//!
//! One controller per action instance (one mint form, one listing row's
//! buy/cancel, one withdrawal). The pending flag is the only mutual
//! exclusion and is scoped to its instance — actions on different listings
//! overlap freely. No automatic retry: every failure is terminal for the
//! attempt and the user re-triggers explicitly.

use std::sync::Mutex;
use tracing::{info, warn};

use crate::error::Error;
use crate::intent::TransactionIntent;
use crate::wallet::WalletConnector;

/// Lifecycle of one action instance: `Idle -> Pending -> (Success | Error)`.
/// Both terminal states accept a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

impl ActionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionStatus::Pending)
    }
}

/// Which read a completed action invalidates. The caller re-queries that
/// read; the gateway is eventually consistent, so nothing assumes
/// read-after-write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Listings,
    OwnedObjects,
    WalletBalance,
    MarketplaceBalance,
}

/// Per-instance submission state machine.
#[derive(Debug, Default)]
pub struct ActionController {
    status: Mutex<ActionStatus>,
}

impl ActionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ActionStatus {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_pending(&self) -> bool {
        self.status().is_pending()
    }

    /// Submit a prepared intent through the wallet. While a previous
    /// submission on this instance is still pending, a new one is rejected
    /// with no side effects. On success returns the read to refresh; on
    /// failure the wallet's message is kept verbatim in the status and the
    /// error is returned.
    pub async fn submit(
        &self,
        wallet: &dyn WalletConnector,
        intent: TransactionIntent,
        refresh: Refresh,
    ) -> Result<Refresh, Error> {
        {
            let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
            if status.is_pending() {
                return Err(Error::Validation("Action already in progress".into()));
            }
            *status = ActionStatus::Pending;
        }

        info!(target = %intent.target, "Submitting transaction intent");
        let outcome = wallet.sign_and_execute(&intent).await;

        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        match outcome {
            Ok(receipt) => {
                info!(target = %intent.target, digest = %receipt.digest, "Transaction executed");
                *status = ActionStatus::Success;
                Ok(refresh)
            }
            Err(e) => {
                warn!(target = %intent.target, error = %e, "Transaction failed");
                let message = match &e {
                    Error::Execution(msg) => msg.clone(),
                    other => other.to_string(),
                };
                *status = ActionStatus::Error(message);
                Err(e)
            }
        }
    }

    /// Acknowledge a terminal status, returning the instance to idle.
    pub fn reset(&self) {
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        if !status.is_pending() {
            *status = ActionStatus::Idle;
        }
    }
}
