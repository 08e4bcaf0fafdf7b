//! Wallet capability seam and the connector that signals the session.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::WalletError,
    notice::{Notice, NoticeKind},
    session::SessionController,
};

/// A wallet able to hand out the user's public key after the user approves.
///
/// Key custody and signing stay inside the wallet; this client only ever sees
/// the public key.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request_public_key(&self) -> Result<String, WalletError>;
}

/// Stand-in used when no wallet is available on this machine.
pub struct MissingWallet;

#[async_trait]
impl WalletProvider for MissingWallet {
    async fn request_public_key(&self) -> Result<String, WalletError> {
        Err(WalletError::NotInstalled)
    }
}

/// Wallet backed by a configured public key (watch-only).
pub struct StaticWallet {
    public_key: String,
}

impl StaticWallet {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn request_public_key(&self) -> Result<String, WalletError> {
        Ok(self.public_key.clone())
    }
}

pub fn wallet_from_public_key(public_key: Option<&str>) -> Arc<dyn WalletProvider> {
    match public_key.map(str::trim).filter(|key| !key.is_empty()) {
        Some(key) => Arc::new(StaticWallet::new(key)),
        None => Arc::new(MissingWallet),
    }
}

pub struct WalletConnector {
    provider: Arc<dyn WalletProvider>,
}

impl WalletConnector {
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self { provider }
    }

    /// One confirmation attempt; a failure needs a fresh user action.
    pub async fn connect(&self, session: &mut SessionController) -> Notice {
        let result = self.provider.request_public_key().await;
        Self::complete_connect(session, result)
    }

    /// Applies the outcome of a wallet prompt that was run elsewhere.
    pub fn complete_connect(
        session: &mut SessionController,
        result: Result<String, WalletError>,
    ) -> Notice {
        let result = result.and_then(|key| {
            let key = key.trim().to_string();
            if key.is_empty() {
                Err(WalletError::Failed("wallet returned an empty public key".into()))
            } else {
                Ok(key)
            }
        });

        match result {
            Ok(public_key) => {
                tracing::info!(wallet = %public_key, "wallet connected");
                session.attach_wallet(public_key);
                Notice::info("Wallet connected")
            }
            Err(WalletError::Rejected) => {
                tracing::info!("wallet connection cancelled by user");
                Notice::new(NoticeKind::Cancelled, WalletError::Rejected.to_string())
            }
            Err(err) => {
                tracing::warn!("wallet connection failed: {err}");
                Notice::new(NoticeKind::Precondition, err.to_string())
            }
        }
    }

    pub fn disconnect(session: &mut SessionController) -> Notice {
        session.detach_wallet();
        tracing::info!("wallet disconnected");
        Notice::info("Wallet disconnected")
    }
}

#[cfg(test)]
#[path = "tests/wallet_tests.rs"]
mod tests;
