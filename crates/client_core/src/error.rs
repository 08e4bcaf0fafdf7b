//! Error types for the aggregator client and the swap controllers.

use thiserror::Error;

use crate::notice::{Notice, NoticeKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregatorError {
    #[error("{endpoint} request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("{endpoint} request failed ({status}): {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },
    #[error("unexpected {endpoint} response: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
    #[error("invalid aggregator url: {0}")]
    Url(String),
}

impl AggregatorError {
    pub fn transport(endpoint: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            endpoint,
            message: err.to_string(),
        }
    }

    pub fn decode(endpoint: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            endpoint,
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("No wallet found. Please install a compatible wallet to connect.")]
    NotInstalled,
    #[error("Wallet connection was cancelled")]
    Rejected,
    #[error("Wallet error: {0}")]
    Failed(String),
}

/// Local checks that block an operation before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("Please connect your wallet first")]
    WalletNotConnected,
    #[error("Please select both tokens")]
    TokensNotSelected,
    #[error("Please enter a valid amount")]
    InvalidAmount,
    #[error("Please select different tokens")]
    SameToken,
    #[error("Amount is smaller than the smallest unit of {symbol}")]
    AmountBelowUnit { symbol: String },
    #[error("No quote available. Get a quote first.")]
    NoQuote,
    #[error("A swap is already being executed")]
    ExecutionInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error("swap execution failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),
    #[error(transparent)]
    Remote(#[from] AggregatorError),
    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl WorkflowError {
    pub fn kind(&self) -> NoticeKind {
        match self {
            Self::Precondition(_) => NoticeKind::Precondition,
            Self::Remote(_) | Self::Execution(_) => NoticeKind::Remote,
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::new(self.kind(), self.to_string())
    }
}
