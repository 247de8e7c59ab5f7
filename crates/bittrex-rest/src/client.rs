//! Main REST client implementation

use crate::dispatch::dispatch;
use crate::endpoints::{AccountEndpoints, MarketEndpoints, PublicEndpoints};
use crate::error::RestResult;
use crate::request::{build_request, RequestDescriptor};
use crate::types::{BalanceResult, OrderBookResult, PlaceOrderResult, TickerResult};
use bittrex_auth::{AuthResult, Credentials};
use reqwest::redirect::Policy;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;

/// Bittrex v1.1 API root
pub const DEFAULT_BASE_URL: &str = "https://bittrex.com/api/v1.1";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bittrex REST API client
///
/// Holds the HTTP client, base URL and credentials. Every call builds and
/// signs its own request; nothing else is shared between calls.
///
/// # Example
///
/// ```no_run
/// use bittrex_rest::{BittrexRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BittrexRestClient::new()?;
///     let ticker = client.get_ticker("BTC-LTC").await?;
///
///     // With credentials for market and account endpoints
///     let auth_client = BittrexRestClient::with_credentials(Credentials::from_env()?)?;
///     let balances = auth_client.get_balances().await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BittrexRestClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl BittrexRestClient {
    /// Create a new client without credentials
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("bittrex-rest/{}", env!("CARGO_PKG_VERSION")));

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .redirect(Policy::none())
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(base_url = %base_url, "Created Bittrex REST client");

        Ok(Self {
            http_client,
            base_url,
            credentials: config.credentials,
        })
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        !self.credentials.is_empty()
    }

    /// API root this client sends requests to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build, sign and send one request, decoding the payload as `T`
    ///
    /// Use this for endpoints the typed wrappers don't cover.
    pub async fn call<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> RestResult<T> {
        let request = build_request(&self.base_url, descriptor, &self.credentials);
        dispatch(&self.http_client, &request).await
    }

    // ========================================================================
    // Public Endpoints
    // ========================================================================

    /// Get public endpoints
    pub fn public(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(self)
    }

    /// Get the ticker for a market, e.g. `"BTC-LTC"`
    pub async fn get_ticker(&self, market: &str) -> RestResult<TickerResult> {
        self.public().get_ticker(market).await
    }

    /// Get both sides of the order book for a market
    pub async fn get_order_book(&self, market: &str) -> RestResult<OrderBookResult> {
        self.public().get_order_book(market).await
    }

    // ========================================================================
    // Market Endpoints
    // ========================================================================

    /// Get order placement endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Place a limit buy order
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<PlaceOrderResult> {
        self.market().buy_limit(market, quantity, rate).await
    }

    /// Place a limit sell order
    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<PlaceOrderResult> {
        self.market().sell_limit(market, quantity, rate).await
    }

    /// Cancel an open order by uuid
    pub async fn cancel_order(&self, uuid: &str) -> RestResult<()> {
        self.market().cancel(uuid).await
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get balances for all currencies
    pub async fn get_balances(&self) -> RestResult<Vec<BalanceResult>> {
        self.account().get_balances().await
    }
}

impl std::fmt::Debug for BittrexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BittrexRestClient")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// API credentials, empty for public-only use
    pub credentials: Credentials,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: Credentials::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration with credentials read from the environment
    ///
    /// Reads `BITTREX_API_KEY` and `BITTREX_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        Ok(Self::default().with_credentials(Credentials::from_env()?))
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a client from this configuration
    pub fn build(self) -> RestResult<BittrexRestClient> {
        BittrexRestClient::with_config(self)
    }
}
