//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{Notice, NoticeKind, SessionController};
use crossbeam_channel::{Sender, TrySendError};
use shared::domain::View;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

#[derive(Debug)]
pub enum Navigation {
    Unchanged,
    Moved { load_tokens: bool },
    /// The session refused the view; the error carries the user-facing notice.
    Blocked(UiError),
}

/// Moves `session` to `view`. `tokens_missing` asks for a token list load once
/// the swap view is reached.
pub fn navigate(session: &mut SessionController, view: View, tokens_missing: bool) -> Navigation {
    if view == session.current_view() {
        return Navigation::Unchanged;
    }
    match session.go_to(view) {
        Ok(()) => Navigation::Moved {
            load_tokens: view == View::Swap && tokens_missing,
        },
        Err(err) => {
            let notice = Notice::new(NoticeKind::Precondition, err.to_string());
            Navigation::Blocked(UiError::from_notice(UiErrorContext::Navigation, &notice))
        }
    }
}

/// Queues `cmd` for the backend worker. Returns `false` and fills `status` when
/// the command could not be queued.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker disconnected (possible startup failure); restart the app"
                .to_string();
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiErrorCategory;
    use crossbeam_channel::bounded;

    #[test]
    fn disconnected_swap_navigation_is_blocked_with_notice() {
        let mut session = SessionController::new();

        let Navigation::Blocked(err) = navigate(&mut session, View::Swap, true) else {
            panic!("navigation should be blocked");
        };

        assert_eq!(err.message(), "Please connect your wallet first");
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::Navigation);
        assert_eq!(session.current_view(), View::Landing);
    }

    #[test]
    fn landing_navigation_is_a_no_op_when_already_there() {
        let mut session = SessionController::new();
        assert!(matches!(
            navigate(&mut session, View::Landing, true),
            Navigation::Unchanged
        ));
    }

    #[test]
    fn connected_swap_navigation_requests_missing_tokens() {
        let mut session = SessionController::new();
        client_core::WalletConnector::complete_connect(
            &mut session,
            Ok("GBZXN7PIRZGNMHGA7MUUUF4GWPY5AYPV6LY4UV2GL6VJGIQRXFDNMADI".to_string()),
        );
        session.go_to(View::Landing).expect("landing");

        assert!(matches!(
            navigate(&mut session, View::Swap, true),
            Navigation::Moved { load_tokens: true }
        ));
        assert_eq!(session.current_view(), View::Swap);
    }

    #[test]
    fn queues_command_when_there_is_room() {
        let (tx, rx) = bounded(1);
        let mut status = String::new();

        assert!(dispatch_backend_command(&tx, BackendCommand::ConnectWallet, &mut status));
        assert!(status.is_empty());
        assert!(matches!(rx.try_recv(), Ok(BackendCommand::ConnectWallet)));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let mut status = String::new();
        dispatch_backend_command(&tx, BackendCommand::ConnectWallet, &mut status);

        assert!(!dispatch_backend_command(&tx, BackendCommand::ConnectWallet, &mut status));
        assert_eq!(status, "UI command queue is full; please retry");
    }

    #[test]
    fn reports_disconnected_worker() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let mut status = String::new();

        assert!(!dispatch_backend_command(&tx, BackendCommand::ConnectWallet, &mut status));
        assert!(status.starts_with("Backend worker disconnected"));
    }
}
