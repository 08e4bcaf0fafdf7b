use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::protocol::{AssetListResponse, QuoteRequest, QuoteResponse};
use tracing::{debug, warn};
use url::Url;

pub mod config;
pub mod error;
pub mod executor;
pub mod notice;
pub mod session;
pub mod swap;
pub mod wallet;

pub use config::{load_settings, Settings};
pub use error::{AggregatorError, ExecutionError, PreconditionError, WalletError, WorkflowError};
pub use executor::{SimulatedTradeExecutor, TradeExecutor, TradeReceipt, TradeRequest};
pub use notice::{Notice, NoticeKind};
pub use session::SessionController;
pub use swap::{
    ExecuteTicket, Quote, QuoteBreakdown, QuoteTicket, SwapForm, SwapWorkflow, TokenListTicket,
    TokenSource, TradeSummary,
};
pub use wallet::{wallet_from_public_key, MissingWallet, StaticWallet, WalletConnector, WalletProvider};

const ASSET_LIST_ENDPOINT: &str = "asset-list";
const QUOTE_ENDPOINT: &str = "quote";

/// The remote swap-aggregation service. Routing, pricing and settlement happen
/// on the other side of this seam.
#[async_trait]
pub trait AggregatorApi: Send + Sync {
    async fn asset_list(&self) -> Result<AssetListResponse, AggregatorError>;
    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, AggregatorError>;
}

pub struct AggregatorClient {
    http: Client,
    base_url: Url,
    api_key: String,
    network: String,
    asset_list_name: String,
}

impl AggregatorClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let base_url = Url::parse(settings.api_base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
        if settings.api_key.trim().is_empty() {
            warn!("no aggregator api key configured; requests will likely be rejected");
        }

        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
            network: settings.network.clone(),
            asset_list_name: settings.asset_list_name.clone(),
        })
    }

    pub fn shared(settings: &Settings) -> Result<Arc<dyn AggregatorApi>> {
        Ok(Arc::new(Self::new(settings)?))
    }

    fn endpoint(&self, path: &str, query: (&str, &str)) -> Result<Url, AggregatorError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|err| AggregatorError::Url(err.to_string()))?;
        url.query_pairs_mut().append_pair(query.0, query.1);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, AggregatorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AggregatorError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| AggregatorError::transport(endpoint, err))?;
        serde_json::from_slice(&body).map_err(|err| AggregatorError::decode(endpoint, err))
    }
}

#[async_trait]
impl AggregatorApi for AggregatorClient {
    async fn asset_list(&self) -> Result<AssetListResponse, AggregatorError> {
        let url = self.endpoint(ASSET_LIST_ENDPOINT, ("name", &self.asset_list_name))?;
        debug!(%url, "fetching asset list");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|err| AggregatorError::transport(ASSET_LIST_ENDPOINT, err))?;
        Self::read_json(ASSET_LIST_ENDPOINT, response).await
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, AggregatorError> {
        let url = self.endpoint(QUOTE_ENDPOINT, ("network", &self.network))?;
        debug!(%url, "requesting quote");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|err| AggregatorError::transport(QUOTE_ENDPOINT, err))?;
        Self::read_json(QUOTE_ENDPOINT, response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
