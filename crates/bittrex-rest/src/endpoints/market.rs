//! Order placement and cancellation endpoints
//!
//! These endpoints are signed. Every call, order placement included, is a GET.

use crate::client::BittrexRestClient;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::types::{OpenOrderResult, PlaceOrderResult};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

const BUY_LIMIT: &str = "market/buylimit";
const SELL_LIMIT: &str = "market/selllimit";
const CANCEL: &str = "market/cancel";
const GET_OPEN_ORDERS: &str = "market/getopenorders";

/// Order placement and cancellation endpoints
pub struct MarketEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    /// Place a limit buy order
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTC-LTC")
    /// * `quantity` - Amount to buy
    /// * `rate` - Limit price
    ///
    /// # Returns
    /// The uuid of the new order
    #[instrument(skip(self))]
    pub async fn buy_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<PlaceOrderResult> {
        debug!("Placing limit buy for {} {} at {}", quantity, market, rate);
        self.client
            .call(&limit_order(BUY_LIMIT, market, quantity, rate))
            .await
    }

    /// Place a limit sell order
    #[instrument(skip(self))]
    pub async fn sell_limit(
        &self,
        market: &str,
        quantity: Decimal,
        rate: Decimal,
    ) -> RestResult<PlaceOrderResult> {
        debug!("Placing limit sell for {} {} at {}", quantity, market, rate);
        self.client
            .call(&limit_order(SELL_LIMIT, market, quantity, rate))
            .await
    }

    /// Cancel a buy or sell order
    ///
    /// The server answers with a `null` result on success.
    #[instrument(skip(self))]
    pub async fn cancel(&self, uuid: &str) -> RestResult<()> {
        debug!("Cancelling order {}", uuid);
        let descriptor = RequestDescriptor::new(CANCEL).param("uuid", uuid);
        self.client.call(&descriptor).await
    }

    /// Get open orders, optionally for a single market
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, market: Option<&str>) -> RestResult<Vec<OpenOrderResult>> {
        debug!("Fetching open orders");
        let descriptor = RequestDescriptor::new(GET_OPEN_ORDERS).optional_param("market", market);
        self.client.call(&descriptor).await
    }
}

fn limit_order(method: &str, market: &str, quantity: Decimal, rate: Decimal) -> RequestDescriptor {
    RequestDescriptor::new(method)
        .param("market", market)
        .param("quantity", quantity)
        .param("rate", rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_limit_order_params() {
        let descriptor = limit_order(BUY_LIMIT, "BTC-LTC", dec!(1.5), dec!(0.0123));
        assert_eq!(descriptor.method(), "market/buylimit");
        assert!(!descriptor.is_public());

        let params: Vec<(&str, &str)> = descriptor
            .params()
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![("market", "BTC-LTC"), ("quantity", "1.5"), ("rate", "0.0123")]
        );
    }

    #[test]
    fn test_cancel_has_its_own_path() {
        assert_ne!(CANCEL, SELL_LIMIT);
        assert!(!RequestDescriptor::new(CANCEL).is_public());
    }
}
