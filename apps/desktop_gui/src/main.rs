use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{
    load_settings, wallet_from_public_key, AggregatorClient, SimulatedTradeExecutor, SwapWorkflow,
    TradeExecutor,
};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::{
    commands::BackendCommand,
    runtime::{launch, BackendServices},
};
use crate::controller::events::UiEvent;
use crate::ui::SwapDeskApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop token swap client")]
struct Args {
    /// Settings file; defaults to ./swap.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref())?;
    let api = AggregatorClient::shared(&settings)?;
    let executor: Arc<dyn TradeExecutor> =
        Arc::new(SimulatedTradeExecutor::new(settings.execution_delay()));
    let wallet = wallet_from_public_key(settings.wallet_public_key.as_deref());
    tracing::info!(
        api = %settings.api_base_url,
        network = %settings.network,
        "starting swap desktop"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    launch(
        cmd_rx,
        ui_tx,
        BackendServices {
            api: Arc::clone(&api),
            executor: Arc::clone(&executor),
            wallet,
        },
    );

    let workflow = SwapWorkflow::new(api, executor);
    let network = settings.network.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Token Swap")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Token Swap",
        options,
        Box::new(move |_cc| Ok(Box::new(SwapDeskApp::new(cmd_tx, ui_rx, workflow, network)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop ui: {err}"))
}
