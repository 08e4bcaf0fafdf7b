//! Backend commands queued from UI to backend worker.

use client_core::{ExecuteTicket, QuoteTicket, TokenListTicket};

pub enum BackendCommand {
    ConnectWallet,
    LoadTokens { ticket: TokenListTicket },
    FetchQuote { ticket: QuoteTicket },
    ExecuteTrade { ticket: ExecuteTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectWallet => "connect_wallet",
            Self::LoadTokens { .. } => "load_tokens",
            Self::FetchQuote { .. } => "fetch_quote",
            Self::ExecuteTrade { .. } => "execute_trade",
        }
    }
}
