//! Swap workflow: token list, quote retrieval, simulated execution and the price
//! breakdown shown next to a quote.
//!
//! Every remote-backed operation comes in two halves. `begin_*` validates
//! preconditions, raises the loading flag and hands out a ticket; `finish_*`
//! applies the response for that ticket. Every ticket carries a sequence number,
//! and a response whose ticket is no longer the latest issued for its kind is
//! dropped without touching state. The async `load_tokens`, `get_quote` and
//! `execute` methods run both halves back to back.

use std::{fmt, sync::Arc};

use shared::{
    amount::{exchange_rate, format_amount, DecimalAmount, BASE_UNIT_DECIMALS},
    domain::{fallback_tokens, Token, TokenAddress},
    protocol::{
        AssetListResponse, QuoteRequest, QuoteResponse, PLATFORM_FEE_BPS, SLIPPAGE_TOLERANCE_BPS,
    },
};
use tracing::{debug, info, warn};

use crate::{
    error::{AggregatorError, ExecutionError, PreconditionError, WorkflowError},
    executor::{TradeExecutor, TradeReceipt, TradeRequest},
    notice::{Notice, NoticeKind},
    session::SessionController,
    AggregatorApi,
};

pub const DEGRADED_TOKEN_LIST_NOTICE: &str =
    "Token list unavailable; showing a default set of tokens.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapForm {
    pub from_token: Option<TokenAddress>,
    pub to_token: Option<TokenAddress>,
    pub amount_text: String,
}

/// The exact form values a quote was produced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedInput {
    pub from: TokenAddress,
    pub to: TokenAddress,
    pub amount_text: String,
    pub amount_in: u128,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub input: QuotedInput,
    pub response: QuoteResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenListTicket {
    seq: u64,
}

impl TokenListTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTicket {
    seq: u64,
    input: QuotedInput,
    request: QuoteRequest,
}

impl QuoteTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &QuoteRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub struct ExecuteTicket {
    seq: u64,
    request: TradeRequest,
    from_symbol: String,
    to_symbol: String,
    to_decimals: u32,
}

impl ExecuteTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> &TradeRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSummary {
    pub amount_in: String,
    pub from_symbol: String,
    pub amount_out: String,
    pub to_symbol: String,
    pub receipt: TradeReceipt,
}

impl fmt::Display for TradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swapped {} {} for {} {}",
            self.amount_in, self.from_symbol, self.amount_out, self.to_symbol
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteBreakdown {
    pub you_pay: String,
    pub you_receive: String,
    pub minimum_received: String,
    pub price_impact: String,
    pub platform: String,
    pub exchange_rate: Option<String>,
    pub slippage_tolerance: String,
    pub platform_fee: String,
}

impl QuoteBreakdown {
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("You pay", self.you_pay.clone()),
            ("You receive", self.you_receive.clone()),
            ("Minimum received", self.minimum_received.clone()),
            ("Price impact", self.price_impact.clone()),
            ("Route", self.platform.clone()),
        ];
        if let Some(rate) = &self.exchange_rate {
            rows.push(("Rate", rate.clone()));
        }
        rows.push(("Slippage tolerance", self.slippage_tolerance.clone()));
        rows.push(("Platform fee", self.platform_fee.clone()));
        rows
    }
}

fn format_bps(bps: u32) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

pub struct SwapWorkflow {
    api: Arc<dyn AggregatorApi>,
    executor: Arc<dyn TradeExecutor>,
    tokens: Vec<Token>,
    form: SwapForm,
    quote: Option<Quote>,
    loading_tokens: bool,
    loading_quote: bool,
    executing: bool,
    details_open: bool,
    error: Option<String>,
    advisory: Option<Notice>,
    token_seq: u64,
    quote_seq: u64,
    exec_seq: u64,
}

impl SwapWorkflow {
    pub fn new(api: Arc<dyn AggregatorApi>, executor: Arc<dyn TradeExecutor>) -> Self {
        Self {
            api,
            executor,
            tokens: Vec::new(),
            form: SwapForm::default(),
            quote: None,
            loading_tokens: false,
            loading_quote: false,
            executing: false,
            details_open: false,
            error: None,
            advisory: None,
            token_seq: 0,
            quote_seq: 0,
            exec_seq: 0,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn form(&self) -> &SwapForm {
        &self.form
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn is_loading_tokens(&self) -> bool {
        self.loading_tokens
    }

    pub fn is_loading_quote(&self) -> bool {
        self.loading_quote
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn details_open(&self) -> bool {
        self.details_open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn advisory(&self) -> Option<&str> {
        self.advisory.as_ref().map(|notice| notice.message.as_str())
    }

    /// Set while the token list is the built-in fallback set.
    pub fn advisory_notice(&self) -> Option<&Notice> {
        self.advisory.as_ref()
    }

    pub fn token(&self, address: &TokenAddress) -> Option<&Token> {
        self.tokens.iter().find(|token| &token.address == address)
    }

    pub fn find_token_by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(symbol.trim()))
    }

    pub fn token_symbol(&self, address: &TokenAddress) -> String {
        self.token(address)
            .map(|token| token.symbol.clone())
            .unwrap_or_else(|| address.short())
    }

    pub fn token_name(&self, address: &TokenAddress) -> String {
        self.token(address)
            .map(|token| token.name.clone())
            .unwrap_or_else(|| address.short())
    }

    fn token_decimals(&self, address: &TokenAddress) -> u32 {
        self.token(address)
            .map(|token| token.decimals)
            .unwrap_or(BASE_UNIT_DECIMALS)
    }

    /// Base-unit amount of `address` rendered with that token's decimals.
    pub fn display_amount(&self, base_units: &str, address: &TokenAddress) -> String {
        format_amount(base_units, self.token_decimals(address))
    }

    pub fn select_from_token(&mut self, address: TokenAddress) {
        if self.form.from_token.as_ref() != Some(&address) {
            self.form.from_token = Some(address);
            self.invalidate_quote();
        }
    }

    pub fn select_to_token(&mut self, address: TokenAddress) {
        if self.form.to_token.as_ref() != Some(&address) {
            self.form.to_token = Some(address);
            self.invalidate_quote();
        }
    }

    pub fn set_amount(&mut self, amount_text: impl Into<String>) {
        let amount_text = amount_text.into();
        if self.form.amount_text != amount_text {
            self.form.amount_text = amount_text;
            self.invalidate_quote();
        }
    }

    /// Swaps direction. A quote never survives a reversal.
    pub fn reverse_tokens(&mut self) {
        std::mem::swap(&mut self.form.from_token, &mut self.form.to_token);
        self.invalidate_quote();
    }

    pub fn toggle_details(&mut self) {
        self.details_open = self.quote.is_some() && !self.details_open;
    }

    /// Back to the freshly constructed state, used when the wallet disconnects.
    pub fn reset(&mut self) {
        let token_seq = self.token_seq + 1;
        let quote_seq = self.quote_seq + 1;
        let exec_seq = self.exec_seq + 1;
        *self = Self::new(Arc::clone(&self.api), Arc::clone(&self.executor));
        self.token_seq = token_seq;
        self.quote_seq = quote_seq;
        self.exec_seq = exec_seq;
    }

    fn invalidate_quote(&mut self) {
        self.quote = None;
        self.details_open = false;
        if self.loading_quote {
            // the in-flight response was requested for values that no longer exist
            self.quote_seq += 1;
            self.loading_quote = false;
        }
    }

    fn fail<T>(&mut self, err: impl Into<WorkflowError>) -> Result<T, WorkflowError> {
        let err = err.into();
        self.error = Some(err.to_string());
        Err(err)
    }

    pub fn begin_load_tokens(
        &mut self,
        session: &SessionController,
    ) -> Result<TokenListTicket, WorkflowError> {
        self.error = None;
        if !session.is_connected() {
            return self.fail(PreconditionError::WalletNotConnected);
        }

        self.token_seq += 1;
        self.loading_tokens = true;
        Ok(TokenListTicket {
            seq: self.token_seq,
        })
    }

    /// Returns `None` when a newer token-list request has been issued since.
    pub fn finish_load_tokens(
        &mut self,
        ticket: TokenListTicket,
        result: Result<AssetListResponse, AggregatorError>,
    ) -> Option<TokenSource> {
        if ticket.seq != self.token_seq {
            debug!(
                seq = ticket.seq,
                latest = self.token_seq,
                "discarding stale token list response"
            );
            return None;
        }
        self.loading_tokens = false;
        Some(self.apply_token_list(result))
    }

    fn apply_token_list(
        &mut self,
        result: Result<AssetListResponse, AggregatorError>,
    ) -> TokenSource {
        let remote = match result {
            Ok(list) => {
                let tokens: Vec<Token> = list.assets.iter().filter_map(Token::from_asset).collect();
                if tokens.is_empty() {
                    warn!(
                        entries = list.assets.len(),
                        "token list had no usable entries; using fallback set"
                    );
                }
                tokens
            }
            Err(err) => {
                warn!("token list request failed; using fallback set: {err}");
                Vec::new()
            }
        };

        let source = if remote.is_empty() {
            self.tokens = fallback_tokens();
            self.advisory = Some(Notice::new(
                NoticeKind::Degraded,
                DEGRADED_TOKEN_LIST_NOTICE,
            ));
            TokenSource::Fallback
        } else {
            info!(count = remote.len(), "loaded token list");
            self.tokens = remote;
            self.advisory = None;
            TokenSource::Remote
        };

        if self.form.from_token.is_none() {
            self.form.from_token = self.tokens.first().map(|t| t.address.clone());
        }
        if self.form.to_token.is_none() {
            self.form.to_token = self.tokens.get(1).map(|t| t.address.clone());
        }

        source
    }

    pub async fn load_tokens(
        &mut self,
        session: &SessionController,
    ) -> Result<TokenSource, WorkflowError> {
        let _ticket = self.begin_load_tokens(session)?;
        let result = self.api.asset_list().await;
        self.loading_tokens = false;
        Ok(self.apply_token_list(result))
    }

    /// Checks, in order: wallet, both tokens, a positive amount, distinct tokens.
    pub fn begin_quote(&mut self, session: &SessionController) -> Result<QuoteTicket, WorkflowError> {
        self.error = None;
        if !session.is_connected() {
            return self.fail(PreconditionError::WalletNotConnected);
        }

        let (Some(from), Some(to)) = (self.form.from_token.clone(), self.form.to_token.clone())
        else {
            return self.fail(PreconditionError::TokensNotSelected);
        };

        let amount = match self.form.amount_text.parse::<DecimalAmount>() {
            Ok(amount) if !amount.is_zero() => amount,
            _ => return self.fail(PreconditionError::InvalidAmount),
        };

        if from == to {
            return self.fail(PreconditionError::SameToken);
        }

        let amount_in = match amount.to_base_units(BASE_UNIT_DECIMALS) {
            Ok(0) => {
                let symbol = self.token_symbol(&from);
                return self.fail(PreconditionError::AmountBelowUnit { symbol });
            }
            Ok(amount_in) => amount_in,
            Err(_) => return self.fail(PreconditionError::InvalidAmount),
        };

        self.quote_seq += 1;
        self.loading_quote = true;

        let request = QuoteRequest::exact_in(from.0.clone(), to.0.clone(), amount_in);
        info!(
            seq = self.quote_seq,
            asset_in = %from,
            asset_out = %to,
            amount_in = %amount_in,
            "requesting quote"
        );

        Ok(QuoteTicket {
            seq: self.quote_seq,
            input: QuotedInput {
                from,
                to,
                amount_text: self.form.amount_text.trim().to_string(),
                amount_in,
            },
            request,
        })
    }

    /// Returns `None` when the response belongs to a superseded request; such
    /// responses never reach the visible state.
    pub fn finish_quote(
        &mut self,
        ticket: QuoteTicket,
        result: Result<QuoteResponse, AggregatorError>,
    ) -> Option<Result<(), WorkflowError>> {
        if ticket.seq != self.quote_seq {
            debug!(
                seq = ticket.seq,
                latest = self.quote_seq,
                "discarding stale quote response"
            );
            return None;
        }
        self.loading_quote = false;
        Some(self.apply_quote(ticket.input, result))
    }

    fn apply_quote(
        &mut self,
        input: QuotedInput,
        result: Result<QuoteResponse, AggregatorError>,
    ) -> Result<(), WorkflowError> {
        match result {
            Ok(response) => {
                info!(
                    amount_out = %response.amount_out,
                    platform = %response.platform,
                    "quote received"
                );
                self.quote = Some(Quote { input, response });
                self.details_open = true;
                Ok(())
            }
            Err(err) => {
                warn!("quote request failed: {err}");
                self.quote = None;
                self.details_open = false;
                self.fail(err)
            }
        }
    }

    pub async fn get_quote(&mut self, session: &SessionController) -> Result<(), WorkflowError> {
        let ticket = self.begin_quote(session)?;
        let result = self.api.quote(ticket.request()).await;
        self.loading_quote = false;
        self.apply_quote(ticket.input, result)
    }

    pub fn breakdown(&self) -> Option<QuoteBreakdown> {
        let quote = self.quote.as_ref()?;
        let input = &quote.input;
        let from_symbol = self.token_symbol(&input.from);
        let to_symbol = self.token_symbol(&input.to);
        let to_decimals = self.token_decimals(&input.to);

        let exchange_rate = quote
            .response
            .amount_out
            .trim()
            .parse::<u128>()
            .ok()
            .and_then(|out| exchange_rate(input.amount_in, BASE_UNIT_DECIMALS, out, to_decimals))
            .map(|rate| format!("1 {from_symbol} ≈ {rate} {to_symbol}"));

        Some(QuoteBreakdown {
            you_pay: format!("{} {from_symbol}", input.amount_text),
            you_receive: format!(
                "{} {to_symbol}",
                format_amount(&quote.response.amount_out, to_decimals)
            ),
            minimum_received: format!(
                "{} {to_symbol}",
                format_amount(&quote.response.other_amount_threshold, to_decimals)
            ),
            price_impact: format!("{}%", quote.response.price_impact_pct),
            platform: quote.response.platform.clone(),
            exchange_rate,
            slippage_tolerance: format_bps(SLIPPAGE_TOLERANCE_BPS),
            platform_fee: format_bps(PLATFORM_FEE_BPS),
        })
    }

    pub fn begin_execute(
        &mut self,
        session: &SessionController,
    ) -> Result<ExecuteTicket, WorkflowError> {
        self.error = None;
        let Some(quote) = self.quote.clone() else {
            return self.fail(PreconditionError::NoQuote);
        };
        if self.executing {
            return self.fail(PreconditionError::ExecutionInProgress);
        }
        let Some(public_key) = session.public_key().map(str::to_string) else {
            return self.fail(PreconditionError::WalletNotConnected);
        };

        self.exec_seq += 1;
        self.executing = true;
        Ok(ExecuteTicket {
            seq: self.exec_seq,
            from_symbol: self.token_symbol(&quote.input.from),
            to_symbol: self.token_symbol(&quote.input.to),
            to_decimals: self.token_decimals(&quote.input.to),
            request: TradeRequest { public_key, quote },
        })
    }

    /// Returns `None` when the workflow was reset after `ticket` was issued; the
    /// result then belongs to a session that no longer exists.
    pub fn finish_execute(
        &mut self,
        ticket: ExecuteTicket,
        result: Result<TradeReceipt, ExecutionError>,
    ) -> Option<Result<TradeSummary, WorkflowError>> {
        if ticket.seq != self.exec_seq {
            debug!(
                seq = ticket.seq,
                latest = self.exec_seq,
                "discarding stale execution result"
            );
            return None;
        }
        Some(self.apply_execution(ticket, result))
    }

    fn apply_execution(
        &mut self,
        ticket: ExecuteTicket,
        result: Result<TradeReceipt, ExecutionError>,
    ) -> Result<TradeSummary, WorkflowError> {
        self.executing = false;
        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!("swap execution failed: {err}");
                return self.fail(err);
            }
        };

        let quote = ticket.request.quote;
        let summary = TradeSummary {
            amount_in: quote.input.amount_text.clone(),
            from_symbol: ticket.from_symbol,
            amount_out: format_amount(&quote.response.amount_out, ticket.to_decimals),
            to_symbol: ticket.to_symbol,
            receipt,
        };
        info!(
            reference = %summary.receipt.reference,
            simulated = summary.receipt.simulated,
            "{summary}"
        );

        self.form.amount_text.clear();
        self.invalidate_quote();
        Ok(summary)
    }

    pub async fn execute(
        &mut self,
        session: &SessionController,
    ) -> Result<TradeSummary, WorkflowError> {
        let ticket = self.begin_execute(session)?;
        let result = self.executor.execute(ticket.request().clone()).await;
        self.apply_execution(ticket, result)
    }
}

#[cfg(test)]
#[path = "tests/swap_tests.rs"]
mod tests;
