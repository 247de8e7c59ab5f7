//! Account endpoints for balances, funding and order history
//!
//! These endpoints are signed.

use crate::client::BittrexRestClient;
use crate::error::RestResult;
use crate::request::RequestDescriptor;
use crate::types::{
    BalanceResult, DepositAddressResult, DepositResult, OrderHistoryResult, OrderResult,
    WithdrawResult, WithdrawalResult,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

const GET_BALANCES: &str = "account/getbalances";
const GET_BALANCE: &str = "account/getbalance";
const GET_DEPOSIT_ADDRESS: &str = "account/getdepositaddress";
const WITHDRAW: &str = "account/withdraw";
const GET_ORDER: &str = "account/getorder";
const GET_ORDER_HISTORY: &str = "account/getorderhistory";
const GET_WITHDRAWAL_HISTORY: &str = "account/getwithdrawalhistory";
const GET_DEPOSIT_HISTORY: &str = "account/getdeposithistory";

/// Account endpoints
pub struct AccountEndpoints<'a> {
    client: &'a BittrexRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a BittrexRestClient) -> Self {
        Self { client }
    }

    /// Get balances for every currency on the account
    #[instrument(skip(self))]
    pub async fn get_balances(&self) -> RestResult<Vec<BalanceResult>> {
        debug!("Fetching balances");
        self.client.call(&RequestDescriptor::new(GET_BALANCES)).await
    }

    /// Get the balance of one currency
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn get_balance(&self, currency: &str) -> RestResult<BalanceResult> {
        debug!("Fetching balance for {}", currency);
        let descriptor = RequestDescriptor::new(GET_BALANCE).param("currency", currency);
        self.client.call(&descriptor).await
    }

    /// Get or generate a deposit address for a currency
    ///
    /// While an address is being generated the server rejects the call with
    /// `ADDRESS_GENERATING`.
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, currency: &str) -> RestResult<DepositAddressResult> {
        debug!("Fetching deposit address for {}", currency);
        let descriptor = RequestDescriptor::new(GET_DEPOSIT_ADDRESS).param("currency", currency);
        self.client.call(&descriptor).await
    }

    /// Withdraw funds to an external address
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    /// * `quantity` - Amount to withdraw
    /// * `address` - Destination address
    /// * `payment_id` - Memo, tag or payment id for currencies that need one
    ///
    /// # Returns
    /// The uuid of the withdrawal
    #[instrument(skip(self))]
    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: Decimal,
        address: &str,
        payment_id: Option<&str>,
    ) -> RestResult<WithdrawResult> {
        debug!("Withdrawing {} {}", quantity, currency);
        let descriptor = RequestDescriptor::new(WITHDRAW)
            .param("currency", currency)
            .param("quantity", quantity)
            .param("address", address)
            .optional_param("paymentid", payment_id);
        self.client.call(&descriptor).await
    }

    /// Get a single order by uuid
    #[instrument(skip(self))]
    pub async fn get_order(&self, uuid: &str) -> RestResult<OrderResult> {
        debug!("Fetching order {}", uuid);
        let descriptor = RequestDescriptor::new(GET_ORDER).param("uuid", uuid);
        self.client.call(&descriptor).await
    }

    /// Get closed orders, optionally for a single market
    #[instrument(skip(self))]
    pub async fn get_order_history(
        &self,
        market: Option<&str>,
    ) -> RestResult<Vec<OrderHistoryResult>> {
        debug!("Fetching order history");
        let descriptor = RequestDescriptor::new(GET_ORDER_HISTORY).optional_param("market", market);
        self.client.call(&descriptor).await
    }

    /// Get past withdrawals, optionally for a single currency
    #[instrument(skip(self))]
    pub async fn get_withdrawal_history(
        &self,
        currency: Option<&str>,
    ) -> RestResult<Vec<WithdrawalResult>> {
        debug!("Fetching withdrawal history");
        let descriptor =
            RequestDescriptor::new(GET_WITHDRAWAL_HISTORY).optional_param("currency", currency);
        self.client.call(&descriptor).await
    }

    /// Get past deposits, optionally for a single currency
    #[instrument(skip(self))]
    pub async fn get_deposit_history(&self, currency: Option<&str>) -> RestResult<Vec<DepositResult>> {
        debug!("Fetching deposit history");
        let descriptor =
            RequestDescriptor::new(GET_DEPOSIT_HISTORY).optional_param("currency", currency);
        self.client.call(&descriptor).await
    }
}
