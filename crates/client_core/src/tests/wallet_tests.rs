use super::*;

use shared::domain::View;

struct RejectingWallet;

#[async_trait]
impl WalletProvider for RejectingWallet {
    async fn request_public_key(&self) -> Result<String, WalletError> {
        Err(WalletError::Rejected)
    }
}

const PUBKEY: &str = "GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI";

#[tokio::test]
async fn connect_sets_identity_and_switches_to_swap() {
    let connector = WalletConnector::new(Arc::new(StaticWallet::new(PUBKEY)));
    let mut session = SessionController::new();

    let notice = connector.connect(&mut session).await;

    assert_eq!(notice, Notice::info("Wallet connected"));
    assert!(session.is_connected());
    assert_eq!(session.wallet_address(), Some(PUBKEY));
    assert_eq!(session.public_key(), Some(PUBKEY));
    assert_eq!(session.current_view(), View::Swap);
}

#[tokio::test]
async fn cancelled_prompt_leaves_session_untouched() {
    let connector = WalletConnector::new(Arc::new(RejectingWallet));
    let mut session = SessionController::new();

    let notice = connector.connect(&mut session).await;

    assert_eq!(notice.kind, NoticeKind::Cancelled);
    assert_eq!(notice.message, "Wallet connection was cancelled");
    assert!(!session.is_connected());
    assert_eq!(session.current_view(), View::Landing);
}

#[tokio::test]
async fn missing_wallet_asks_for_installation() {
    let connector = WalletConnector::new(wallet_from_public_key(Some("   ")));
    let mut session = SessionController::new();

    let notice = connector.connect(&mut session).await;

    assert_eq!(notice.kind, NoticeKind::Precondition);
    assert!(notice.message.contains("install"));
    assert!(!session.is_connected());
}

#[test]
fn empty_public_key_is_not_accepted() {
    let mut session = SessionController::new();
    let notice = WalletConnector::complete_connect(&mut session, Ok("  ".to_string()));
    assert_eq!(notice.kind, NoticeKind::Precondition);
    assert!(!session.is_connected());
}

#[tokio::test]
async fn disconnect_resets_identity_and_view() {
    let connector = WalletConnector::new(wallet_from_public_key(Some(PUBKEY)));
    let mut session = SessionController::new();
    connector.connect(&mut session).await;

    let notice = WalletConnector::disconnect(&mut session);

    assert_eq!(notice, Notice::info("Wallet disconnected"));
    assert!(!session.is_connected());
    assert_eq!(session.public_key(), None);
    assert_eq!(session.current_view(), View::Landing);
    assert!(session.go_to(View::Swap).is_err());
}
