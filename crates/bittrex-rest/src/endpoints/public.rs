//! Public market data endpoints
//!
//! These endpoints are never signed.

use crate::client::BittrexRestClient;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::types::{
    BookSide, CurrencyResult, MarketHistoryResult, MarketResult, MarketSummaryResult,
    OrderBookEntry, OrderBookResult, TickerResult,
};
use tracing::{debug, instrument};

const GET_MARKETS: &str = "public/getmarkets";
const GET_CURRENCIES: &str = "public/getcurrencies";
const GET_TICKER: &str = "public/getticker";
const GET_MARKET_SUMMARIES: &str = "public/getmarketsummaries";
const GET_MARKET_SUMMARY: &str = "public/getmarketsummary";
const GET_ORDER_BOOK: &str = "public/getorderbook";
const GET_MARKET_HISTORY: &str = "public/getmarkethistory";

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    /// Get all markets with their currencies and minimum trade size
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Vec<MarketResult>> {
        debug!("Fetching markets");
        self.client.call(&RequestDescriptor::new(GET_MARKETS)).await
    }

    /// Get all supported currencies
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> RestResult<Vec<CurrencyResult>> {
        debug!("Fetching currencies");
        self.client.call(&RequestDescriptor::new(GET_CURRENCIES)).await
    }

    /// Get the current tick values for a market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTC-LTC")
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, market: &str) -> RestResult<TickerResult> {
        debug!("Fetching ticker for {}", market);
        let descriptor = RequestDescriptor::new(GET_TICKER).param("market", market);
        self.client.call(&descriptor).await
    }

    /// Get the last 24 hour summary of all active markets
    #[instrument(skip(self))]
    pub async fn get_market_summaries(&self) -> RestResult<Vec<MarketSummaryResult>> {
        debug!("Fetching market summaries");
        self.client
            .call(&RequestDescriptor::new(GET_MARKET_SUMMARIES))
            .await
    }

    /// Get the last 24 hour summary of one market
    ///
    /// The server wraps the single summary in a list.
    #[instrument(skip(self))]
    pub async fn get_market_summary(&self, market: &str) -> RestResult<Vec<MarketSummaryResult>> {
        debug!("Fetching market summary for {}", market);
        let descriptor = RequestDescriptor::new(GET_MARKET_SUMMARY).param("market", market);
        self.client.call(&descriptor).await
    }

    /// Get both sides of the order book
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, market: &str) -> RestResult<OrderBookResult> {
        debug!("Fetching order book for {}", market);
        let descriptor = RequestDescriptor::new(GET_ORDER_BOOK)
            .param("market", market)
            .param("type", "both");
        self.client.call(&descriptor).await
    }

    /// Get one side of the order book
    ///
    /// With a single side the server returns a bare list instead of the
    /// `buy`/`sell` object.
    #[instrument(skip(self))]
    pub async fn get_order_book_side(
        &self,
        market: &str,
        side: BookSide,
    ) -> RestResult<Vec<OrderBookEntry>> {
        debug!("Fetching {} side of order book for {}", side, market);
        let descriptor = RequestDescriptor::new(GET_ORDER_BOOK)
            .param("market", market)
            .param("type", side);
        self.client.call(&descriptor).await
    }

    /// Get the latest trades for a market
    #[instrument(skip(self))]
    pub async fn get_market_history(&self, market: &str) -> RestResult<Vec<MarketHistoryResult>> {
        debug!("Fetching market history for {}", market);
        let descriptor = RequestDescriptor::new(GET_MARKET_HISTORY).param("market", market);
        self.client.call(&descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_public() {
        for path in [
            GET_MARKETS,
            GET_CURRENCIES,
            GET_TICKER,
            GET_MARKET_SUMMARIES,
            GET_MARKET_SUMMARY,
            GET_ORDER_BOOK,
            GET_MARKET_HISTORY,
        ] {
            assert!(RequestDescriptor::new(path).is_public(), "{path} would be signed");
        }
    }
}
