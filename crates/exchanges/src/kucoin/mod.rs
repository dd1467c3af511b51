//! KuCoin Futures integration
//!
//! Signed REST trading client for the KuCoin Futures API: order parameter
//! validation, HMAC request signing, and composite limit/market order
//! placement with optional stop-loss / take-profit legs.

pub mod auth;
pub mod rest;
pub mod types;
pub mod validate;

// Re-export the client surface
pub use auth::{KucoinCredentials, KucoinSigner, SignedRequest, API_KEY_VERSION};
pub use rest::{contracts_from_amount, KucoinConfig, KucoinFuturesClient, API_URL, SANDBOX_API_URL};
pub use types::{
    CompositeOrderAck, ConditionalResult, ConditionalTrigger, ContractInfo, LimitOrderParams,
    MarketOrderParams, OrderAck, OrderPayload, StopDirection, StopPriceType,
};
