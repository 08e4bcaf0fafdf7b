use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, wallet_from_public_key, AggregatorClient, SessionController,
    SimulatedTradeExecutor, SwapWorkflow, TokenSource, WalletConnector,
};
use shared::domain::View;

#[derive(Parser, Debug)]
#[command(about = "Quote and simulate token swaps from the terminal")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    /// Public key of the wallet to act for; overrides the settings file.
    #[arg(long)]
    public_key: Option<String>,
    #[arg(long, default_value = "USDC")]
    from: String,
    #[arg(long, default_value = "XLM")]
    to: String,
    #[arg(long)]
    amount: Option<String>,
    /// Run the (simulated) swap after printing the quote.
    #[arg(long)]
    execute: bool,
    #[arg(long)]
    list_tokens: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(public_key) = args.public_key {
        settings.wallet_public_key = Some(public_key);
    }

    let connector = WalletConnector::new(wallet_from_public_key(
        settings.wallet_public_key.as_deref(),
    ));
    let mut session = SessionController::new();
    let notice = connector.connect(&mut session).await;
    if !session.is_connected() {
        bail!("{}", notice.message);
    }
    session.go_to(View::Swap)?;
    println!("{} ({})", notice.message, session.wallet_address().unwrap_or_default());

    let mut workflow = SwapWorkflow::new(
        AggregatorClient::shared(&settings)?,
        Arc::new(SimulatedTradeExecutor::new(settings.execution_delay())),
    );
    if workflow.load_tokens(&session).await? == TokenSource::Fallback {
        if let Some(advisory) = workflow.advisory() {
            println!("{advisory}");
        }
    }

    if args.list_tokens {
        for token in workflow.tokens() {
            println!(
                "{:<8} {:<24} {:>2} {}",
                token.symbol, token.name, token.decimals, token.address
            );
        }
    }

    let Some(amount) = args.amount else {
        return Ok(());
    };

    let from = workflow
        .find_token_by_symbol(&args.from)
        .map(|token| token.address.clone())
        .with_context(|| format!("unknown token '{}'", args.from))?;
    let to = workflow
        .find_token_by_symbol(&args.to)
        .map(|token| token.address.clone())
        .with_context(|| format!("unknown token '{}'", args.to))?;
    workflow.select_from_token(from);
    workflow.select_to_token(to);
    workflow.set_amount(amount);

    workflow.get_quote(&session).await?;
    if let Some(breakdown) = workflow.breakdown() {
        for (label, value) in breakdown.rows() {
            println!("{label:<20} {value}");
        }
    }

    if args.execute {
        let summary = workflow.execute(&session).await?;
        println!("{summary} (reference {})", summary.receipt.reference);
    }

    Ok(())
}
