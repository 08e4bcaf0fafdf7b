//! Wallet identity and the top-level view selector.

use shared::domain::View;

use crate::error::PreconditionError;

/// Single source of truth for wallet identity and the current view.
///
/// Identity changes only through [`crate::wallet::WalletConnector`]; views change
/// only through [`SessionController::go_to`].
#[derive(Debug, Default, Clone)]
pub struct SessionController {
    wallet_address: Option<String>,
    public_key: Option<String>,
    current_view: View,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet_address.is_some()
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// The view to render. A disconnected session always renders the landing view.
    pub fn current_view(&self) -> View {
        if self.is_connected() {
            self.current_view
        } else {
            View::Landing
        }
    }

    pub fn go_to(&mut self, view: View) -> Result<(), PreconditionError> {
        if view == View::Swap && !self.is_connected() {
            tracing::debug!("rejected navigation to swap view without a wallet");
            return Err(PreconditionError::WalletNotConnected);
        }
        self.current_view = view;
        Ok(())
    }

    pub(crate) fn attach_wallet(&mut self, public_key: String) {
        self.wallet_address = Some(public_key.clone());
        self.public_key = Some(public_key);
        self.current_view = View::Swap;
    }

    pub(crate) fn detach_wallet(&mut self) {
        self.wallet_address = None;
        self.public_key = None;
        self.current_view = View::Landing;
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
