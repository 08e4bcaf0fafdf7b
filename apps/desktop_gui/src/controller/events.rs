//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{
    AggregatorError, ExecuteTicket, ExecutionError, Notice, NoticeKind, QuoteTicket,
    TokenListTicket, TradeReceipt, WalletError,
};
use shared::protocol::{AssetListResponse, QuoteResponse};

pub enum UiEvent {
    WalletResolved(Result<String, WalletError>),
    TokensLoaded {
        ticket: TokenListTicket,
        result: Result<AssetListResponse, AggregatorError>,
    },
    QuoteFetched {
        ticket: QuoteTicket,
        result: Result<QuoteResponse, AggregatorError>,
    },
    TradeFinished {
        ticket: ExecuteTicket,
        result: Result<TradeReceipt, ExecutionError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    Transport,
    Validation,
    Cancelled,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Wallet,
    TokenList,
    Quote,
    Execute,
    Navigation,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_notice(context: UiErrorContext, notice: &Notice) -> Self {
        let category = match notice.kind {
            NoticeKind::Precondition => UiErrorCategory::Validation,
            NoticeKind::Cancelled => UiErrorCategory::Cancelled,
            NoticeKind::Remote => classify(&notice.message),
            NoticeKind::Info | NoticeKind::Degraded => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: notice.message.clone(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            category: classify(&message),
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn classify(message: &str) -> UiErrorCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("(401)")
        || lower.contains("(403)")
        || lower.contains("unauthorized")
        || lower.contains("forbidden")
        || lower.contains("api key")
    {
        UiErrorCategory::Auth
    } else if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connection")
        || lower.contains("network")
        || lower.contains("disconnect")
        || lower.contains("dns")
    {
        UiErrorCategory::Transport
    } else if lower.contains("invalid") || lower.contains("please") {
        UiErrorCategory::Validation
    } else {
        UiErrorCategory::Unknown
    }
}

pub fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Authentication",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::Validation => "Check input",
        UiErrorCategory::Cancelled => "Cancelled",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
