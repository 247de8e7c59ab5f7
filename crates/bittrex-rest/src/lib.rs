//! REST API client for the Bittrex v1.1 exchange API
//!
//! This crate turns typed calls into signed GET requests and unwraps the
//! `{success, message, result}` envelope every response shares.
//!
//! # Features
//!
//! - **Public**: Markets, currencies, ticker, summaries, order book, trade history
//! - **Market**: Limit buy/sell, cancel, open orders
//! - **Account**: Balances, deposit addresses, withdrawals, order and transfer history
//!
//! # Authentication
//!
//! Methods whose path starts with `public` are sent as-is. Every other method
//! gets `apikey` and `nonce` appended to its query string, and the complete
//! URL is signed with HMAC-SHA512 into the `apisign` header.
//!
//! # Example
//!
//! ```no_run
//! use bittrex_rest::{BittrexRestClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no credentials needed)
//!     let client = BittrexRestClient::new()?;
//!     let ticker = client.get_ticker("BTC-LTC").await?;
//!     println!("BTC-LTC: {:?}", ticker);
//!
//!     // Private endpoints
//!     let auth_client = ClientConfig::from_env()?.build()?;
//!     let balances = auth_client.get_balances().await?;
//!     println!("Balances: {:?}", balances);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call returns [`RestResult`]. Failures are reported once and never
//! retried; see [`RestError`] for the categories.

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod types;

// Re-export main types
pub use bittrex_auth::Credentials;
pub use client::{BittrexRestClient, ClientConfig, DEFAULT_BASE_URL};
pub use dispatch::{decode_envelope, dispatch};
pub use error::{RestError, RestResult};
pub use request::{build_request, RequestDescriptor, SignedRequest};

// Re-export endpoint-specific types
pub use types::{
    // Envelope
    ApiResult,
    // Public
    BookSide, CurrencyResult, MarketHistoryResult, MarketResult, MarketSummaryResult,
    OrderBookEntry, OrderBookResult, TickerResult,
    // Market
    OpenOrderResult, PlaceOrderResult,
    // Account
    BalanceResult, DepositAddressResult, DepositResult, OrderHistoryResult, OrderResult,
    WithdrawResult, WithdrawalResult,
};
