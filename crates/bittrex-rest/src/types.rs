//! Types for Bittrex REST API responses
//!
//! Payload records mirror the server's PascalCase field names. Every field
//! falls back to its default when absent, and fields the server may send as
//! `null` collapse to their default too.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Decode `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// API Response Wrapper
// ============================================================================

/// Standard Bittrex response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResult<T> {
    /// Whether the server accepted the call
    pub success: bool,
    /// Server message, the rejection reason when `success` is false
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Payload, only meaningful when `success` is true
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResult<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the payload, or the server message if the call was rejected
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.result)
        } else {
            Err(self.message)
        }
    }
}

// ============================================================================
// Public Types
// ============================================================================

/// Market definition from `public/getmarkets`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MarketResult {
    pub market_currency: String,
    pub base_currency: String,
    pub market_currency_long: String,
    pub base_currency_long: String,
    #[serde(deserialize_with = "null_as_default")]
    pub min_trade_size: Decimal,
    pub market_name: String,
    pub is_active: bool,
    pub created: Option<NaiveDateTime>,
    pub notice: Option<String>,
    pub is_sponsored: Option<bool>,
    pub logo_url: Option<String>,
}

/// Currency definition from `public/getcurrencies`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CurrencyResult {
    pub currency: String,
    pub currency_long: String,
    pub min_confirmation: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_fee: Decimal,
    pub is_active: bool,
    pub coin_type: String,
    pub base_address: Option<String>,
    pub notice: Option<String>,
}

/// Current best bid, best ask and last trade for a market
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TickerResult {
    #[serde(deserialize_with = "null_as_default")]
    pub bid: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub ask: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub last: Decimal,
}

impl TickerResult {
    /// Ask minus bid
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }

    /// Average of bid and ask
    pub fn mid_price(&self) -> Decimal {
        (self.ask + self.bid) / Decimal::TWO
    }
}

/// 24 hour summary for a market
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MarketSummaryResult {
    pub market_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub high: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub low: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub volume: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub last: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub base_volume: Decimal,
    pub time_stamp: Option<NaiveDateTime>,
    #[serde(deserialize_with = "null_as_default")]
    pub bid: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub ask: Decimal,
    pub open_buy_orders: u32,
    pub open_sell_orders: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub prev_day: Decimal,
    pub created: Option<NaiveDateTime>,
    pub display_market_name: Option<String>,
}

/// Side of the order book to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSide {
    Buy,
    Sell,
}

impl fmt::Display for BookSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Both sides of an order book
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderBookResult {
    #[serde(deserialize_with = "null_as_default")]
    pub buy: Vec<OrderBookEntry>,
    #[serde(deserialize_with = "null_as_default")]
    pub sell: Vec<OrderBookEntry>,
}

impl OrderBookResult {
    /// Highest bid rate
    pub fn best_bid(&self) -> Option<Decimal> {
        self.buy.iter().map(|entry| entry.rate).max()
    }

    /// Lowest ask rate
    pub fn best_ask(&self) -> Option<Decimal> {
        self.sell.iter().map(|entry| entry.rate).min()
    }
}

/// Aggregated quantity at one rate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderBookEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub rate: Decimal,
}

/// Executed trade from `public/getmarkethistory`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MarketHistoryResult {
    pub id: u64,
    pub time_stamp: Option<NaiveDateTime>,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub total: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub fill_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order_type: String,
}

// ============================================================================
// Market Types
// ============================================================================

/// Identifier of a newly placed order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceOrderResult {
    pub uuid: String,
}

/// Order still resting on the book
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OpenOrderResult {
    pub uuid: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_remaining: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub commission_paid: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: Option<NaiveDateTime>,
    pub closed: Option<NaiveDateTime>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Balance of one currency
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BalanceResult {
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub balance: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub available: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub pending: Decimal,
    pub crypto_address: Option<String>,
    pub requested: bool,
    pub uuid: Option<String>,
}

/// Deposit address for a currency
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DepositAddressResult {
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: String,
}

/// Identifier of a withdrawal request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WithdrawResult {
    pub uuid: String,
}

/// Full detail of a single order from `account/getorder`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderResult {
    pub account_id: Option<String>,
    pub order_uuid: String,
    pub exchange: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_remaining: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub reserved: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub reserve_remaining: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub commission_reserved: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub commission_reserve_remaining: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub commission_paid: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub opened: Option<NaiveDateTime>,
    pub closed: Option<NaiveDateTime>,
    pub is_open: bool,
    pub sentinel: Option<String>,
    pub cancel_initiated: bool,
    pub immediate_or_cancel: bool,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
}

/// Closed order from `account/getorderhistory`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderHistoryResult {
    pub order_uuid: String,
    pub exchange: String,
    pub time_stamp: Option<NaiveDateTime>,
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub limit: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub quantity_remaining: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub commission: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub price: Decimal,
    pub price_per_unit: Option<Decimal>,
    pub is_conditional: bool,
    pub condition: Option<String>,
    pub condition_target: Option<Decimal>,
    pub immediate_or_cancel: bool,
    pub closed: Option<NaiveDateTime>,
}

/// Entry of `account/getwithdrawalhistory`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WithdrawalResult {
    pub payment_uuid: String,
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: Decimal,
    pub address: String,
    pub opened: Option<NaiveDateTime>,
    pub authorized: bool,
    pub pending_payment: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tx_cost: Decimal,
    pub tx_id: Option<String>,
    pub canceled: bool,
    pub invalid_address: bool,
}

/// Entry of `account/getdeposithistory`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DepositResult {
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: Decimal,
    pub currency: String,
    pub confirmations: u32,
    pub last_updated: Option<NaiveDateTime>,
    pub tx_id: Option<String>,
    pub crypto_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ticker_from_floats() {
        let ticker: TickerResult =
            serde_json::from_str(r#"{"Bid":100.5,"Ask":101.0,"Last":100.8}"#).unwrap();
        assert_eq!(ticker.bid, dec!(100.5));
        assert_eq!(ticker.ask, dec!(101.0));
        assert_eq!(ticker.last, dec!(100.8));
        assert_eq!(ticker.spread(), dec!(0.5));
        assert_eq!(ticker.mid_price(), dec!(100.75));
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let ticker: TickerResult = serde_json::from_str(r#"{"Bid":null,"Extra":"x"}"#).unwrap();
        assert_eq!(ticker, TickerResult::default());
    }

    #[test]
    fn test_balance_with_null_address() {
        let balance: BalanceResult = serde_json::from_str(
            r#"{
                "Currency": "DOGE",
                "Balance": 4.21549076,
                "Available": 4.21549076,
                "Pending": 0.0,
                "CryptoAddress": null,
                "Requested": false,
                "Uuid": null
            }"#,
        )
        .unwrap();
        assert_eq!(balance.currency, "DOGE");
        assert_eq!(balance.balance, dec!(4.21549076));
        assert_eq!(balance.crypto_address, None);
    }

    #[test]
    fn test_market_summary_timestamps() {
        let summary: MarketSummaryResult = serde_json::from_str(
            r#"{
                "MarketName": "BTC-888",
                "High": 0.00000919,
                "Low": 0.00000820,
                "Volume": 74339.61396015,
                "Last": 0.00000820,
                "BaseVolume": 0.64966963,
                "TimeStamp": "2014-07-09T07:19:30.15",
                "Bid": 0.00000820,
                "Ask": 0.00000831,
                "OpenBuyOrders": 15,
                "OpenSellOrders": 15,
                "PrevDay": 0.00000821,
                "Created": "2014-03-20T06:00:00",
                "DisplayMarketName": null
            }"#,
        )
        .unwrap();
        assert_eq!(summary.open_buy_orders, 15);
        let expected = chrono::NaiveDate::from_ymd_opt(2014, 7, 9)
            .and_then(|date| date.and_hms_milli_opt(7, 19, 30, 150));
        assert_eq!(summary.time_stamp, expected);
        assert!(summary.created.is_some());
    }

    #[test]
    fn test_order_book_best_prices() {
        let book: OrderBookResult = serde_json::from_str(
            r#"{
                "buy": [{"Quantity": 12.37, "Rate": 0.02525}, {"Quantity": 1.0, "Rate": 0.0252}],
                "sell": [{"Quantity": 32.55, "Rate": 0.02540}, {"Quantity": 60.0, "Rate": 0.0255}]
            }"#,
        )
        .unwrap();
        assert_eq!(book.best_bid(), Some(dec!(0.02525)));
        assert_eq!(book.best_ask(), Some(dec!(0.0254)));
    }

    #[test]
    fn test_order_type_renamed() {
        let order: OrderResult =
            serde_json::from_str(r#"{"OrderUuid":"abc","Type":"LIMIT_BUY","IsOpen":true}"#)
                .unwrap();
        assert_eq!(order.order_type, "LIMIT_BUY");
        assert!(order.is_open);
    }

    #[test]
    fn test_envelope_into_result() {
        let ok: ApiResult<PlaceOrderResult> =
            serde_json::from_str(r#"{"success":true,"message":"","result":{"uuid":"e606d53c"}}"#)
                .unwrap();
        assert!(ok.is_success());
        assert_eq!(ok.into_result().unwrap().unwrap().uuid, "e606d53c");

        let rejected: ApiResult<PlaceOrderResult> =
            serde_json::from_str(r#"{"success":false,"message":"INSUFFICIENT_FUNDS","result":null}"#)
                .unwrap();
        assert_eq!(rejected.into_result().unwrap_err(), "INSUFFICIENT_FUNDS");
    }

    #[test]
    fn test_book_side_display() {
        assert_eq!(BookSide::Buy.to_string(), "buy");
        assert_eq!(BookSide::Sell.to_string(), "sell");
    }
}
