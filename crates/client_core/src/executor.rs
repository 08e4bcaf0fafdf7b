//! Trade execution seam.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{error::ExecutionError, swap::Quote};

#[derive(Debug, Clone)]
pub struct TradeRequest {
    pub public_key: String,
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeReceipt {
    pub reference: Uuid,
    pub completed_at: DateTime<Utc>,
    /// True when nothing was signed, broadcast or settled.
    pub simulated: bool,
}

/// Carries a quoted trade to completion.
///
/// Implementations receive the quote exactly as it was shown to the user and the
/// connected wallet's public key. They return a receipt once the trade is final
/// or an error describing why it was not performed; they must not touch
/// controller state.
#[async_trait]
pub trait TradeExecutor: Send + Sync {
    async fn execute(&self, request: TradeRequest) -> Result<TradeReceipt, ExecutionError>;
}

/// Stand-in executor: waits a fixed delay in place of submission and confirmation,
/// then reports success. It performs no signing, no broadcast and no on-chain
/// mutation.
pub struct SimulatedTradeExecutor {
    delay: Duration,
}

impl SimulatedTradeExecutor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TradeExecutor for SimulatedTradeExecutor {
    async fn execute(&self, request: TradeRequest) -> Result<TradeReceipt, ExecutionError> {
        tracing::info!(
            wallet = %request.public_key,
            asset_in = %request.quote.input.from,
            asset_out = %request.quote.input.to,
            amount_in = %request.quote.input.amount_in,
            "simulating swap execution"
        );
        tokio::time::sleep(self.delay).await;

        Ok(TradeReceipt {
            reference: Uuid::new_v4(),
            completed_at: Utc::now(),
            simulated: true,
        })
    }
}
