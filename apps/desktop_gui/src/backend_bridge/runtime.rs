//! Backend worker: owns the tokio runtime and performs every remote call the UI queues.

use std::{sync::Arc, thread};

use client_core::{AggregatorApi, TradeExecutor, WalletProvider};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Collaborators the worker talks to. The UI thread keeps its own handles to the
/// same instances inside the swap workflow.
#[derive(Clone)]
pub struct BackendServices {
    pub api: Arc<dyn AggregatorApi>,
    pub executor: Arc<dyn TradeExecutor>,
    pub wallet: Arc<dyn WalletProvider>,
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, services: BackendServices) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                // commands run concurrently; stale results are dropped by ticket on the ui side
                let services = services.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = run_command(&services, cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!("ui event receiver dropped; discarding backend result");
                    }
                });
            }
            tracing::info!("backend command channel closed; worker exiting");
        });
    });
}

async fn run_command(services: &BackendServices, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ConnectWallet => {
            let result = services.wallet.request_public_key().await;
            UiEvent::WalletResolved(result)
        }
        BackendCommand::LoadTokens { ticket } => {
            let result = services.api.asset_list().await;
            UiEvent::TokensLoaded { ticket, result }
        }
        BackendCommand::FetchQuote { ticket } => {
            let result = services.api.quote(ticket.request()).await;
            UiEvent::QuoteFetched { ticket, result }
        }
        BackendCommand::ExecuteTrade { ticket } => {
            let result = services.executor.execute(ticket.request().clone()).await;
            UiEvent::TradeFinished { ticket, result }
        }
    }
}
