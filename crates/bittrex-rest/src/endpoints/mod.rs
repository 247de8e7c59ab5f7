//! API endpoint implementations

pub mod account;
pub mod market;
pub mod public;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use public::PublicEndpoints;
