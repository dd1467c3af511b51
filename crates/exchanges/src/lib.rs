//! # Peregrine Exchange Integrations
//!
//! Exchange connectivity for the Peregrine trading SDK.
//! Currently focuses on KuCoin Futures REST trading.
//!
//! ## Architecture
//!
//! - **monoio-based HTTP client** - Single-threaded async for maximum performance
//! - **Signed REST requests** - HMAC-SHA256 request signing with passphrase digest
//! - **Client-side validation** - order parameters checked before any network call
//! - **Fixed-point arithmetic** - Exact decimal calculations for contract sizing

pub mod kucoin;
pub mod types;
pub mod errors;
pub mod http;

// Re-export main types
pub use kucoin::{KucoinConfig, KucoinCredentials, KucoinFuturesClient, KucoinSigner};
pub use types::*;
pub use errors::{ExchangeError, Result};
pub use http::HttpsClient;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::kucoin::{KucoinConfig, KucoinCredentials, KucoinFuturesClient, KucoinSigner};
    pub use crate::types::*;
    pub use crate::errors::{ExchangeError, Result};
    pub use crate::http::HttpsClient;
    pub use peregrine_core::prelude::*;
}
