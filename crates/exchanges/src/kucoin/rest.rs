//! KuCoin Futures REST API client using monoio
//!
//! One signed HTTPS request per operation, strictly sequential. The
//! composite order flow is: validate, assemble payload, resolve contract
//! size from notional amount if needed, submit the primary order, then
//! derive and submit the optional stop-loss / take-profit legs.

use crate::errors::{ExchangeError, Result};
use crate::http::{HttpResponse, HttpsClient};
use crate::kucoin::auth::{KucoinCredentials, KucoinSigner};
use crate::kucoin::types::{
    CompositeOrderAck, ConditionalResult, ConditionalTrigger, ContractInfo, LimitOrderParams,
    MarketOrderParams, OrderAck, OrderPayload,
};
use peregrine_core::{ClientOid, Fixed, PerfTimer};
use peregrine_core::{log_error, log_order};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

/// Production REST host
pub const API_URL: &str = "https://api-futures.kucoin.com";
/// Sandbox REST host
pub const SANDBOX_API_URL: &str = "https://api-sandbox-futures.kucoin.com";

const API_V1: &str = "v1";
const SUCCESS_CODE: &str = "200000";

/// KuCoin Futures client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KucoinConfig {
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: String,
    pub base_url: String,
    pub sandbox: bool,
}

impl Default for KucoinConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            api_passphrase: String::new(),
            base_url: API_URL.to_string(),
            sandbox: false,
        }
    }
}

impl KucoinConfig {
    pub fn sandbox() -> Self {
        Self {
            base_url: SANDBOX_API_URL.to_string(),
            sandbox: true,
            ..Default::default()
        }
    }

    pub fn with_credentials(
        mut self,
        api_key: String,
        api_secret: String,
        api_passphrase: String,
    ) -> Self {
        self.api_key = api_key;
        self.api_secret = api_secret;
        self.api_passphrase = api_passphrase;
        self
    }

    pub fn with_env_credentials(mut self) -> Result<Self> {
        let creds = KucoinCredentials::from_env()?;
        self.api_key = creds.api_key;
        self.api_secret = creds.api_secret;
        self.api_passphrase = creds.api_passphrase;
        Ok(self)
    }

    fn credentials(&self) -> KucoinCredentials {
        KucoinCredentials::new(
            self.api_key.clone(),
            self.api_secret.clone(),
            self.api_passphrase.clone(),
        )
    }
}

/// KuCoin Futures REST client
///
/// Holds static credentials and a TLS config; every call builds its own
/// request/response pair, so a shared reference is all callers need.
pub struct KucoinFuturesClient {
    base_url: Url,
    signer: KucoinSigner,
    https_client: HttpsClient,
}

impl KucoinFuturesClient {
    /// Create a new KuCoin Futures REST client
    pub async fn new(config: KucoinConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;

        info!("🔗 KuCoin Futures REST client created");
        info!("   Base URL: {}", base_url);

        let signer = KucoinSigner::new(config.credentials())?;
        let https_client = HttpsClient::new()?;

        Ok(Self {
            base_url,
            signer,
            https_client,
        })
    }

    /// Get server time in milliseconds since epoch
    pub async fn server_time(&self) -> Result<u64> {
        let response = self.send("GET", "timestamp", None, None).await?;

        response
            .as_u64()
            .ok_or_else(|| ExchangeError::InvalidResponse(format!("Missing server time: {response}")))
    }

    /// Get contract metadata for a symbol
    pub async fn contract_info(&self, symbol: &str) -> Result<ContractInfo> {
        let response = self
            .send("GET", &format!("contracts/{symbol}"), None, None)
            .await?;

        serde_json::from_value(response)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))
    }

    /// Place a limit order, with optional attached stop-loss / take-profit.
    ///
    /// Validates client-side, resolves a notional `amount` into a contract
    /// `size` via the symbol's multiplier, submits the primary order, then
    /// each requested conditional leg. Conditional failures are reported in
    /// the returned ack rather than failing the call; nothing is rolled
    /// back.
    pub async fn create_limit_order(
        &self,
        params: &LimitOrderParams<'_>,
    ) -> Result<CompositeOrderAck> {
        let payload = params.build_payload()?;
        self.submit_order(
            payload,
            params.amount,
            params.stop_loss_price,
            params.take_profit_price,
        )
        .await
    }

    /// Place a market order, with optional attached stop-loss / take-profit
    pub async fn create_market_order(
        &self,
        params: &MarketOrderParams<'_>,
    ) -> Result<CompositeOrderAck> {
        let payload = params.build_payload()?;
        self.submit_order(
            payload,
            params.amount,
            params.stop_loss_price,
            params.take_profit_price,
        )
        .await
    }

    /// Cancel an order by exchange order id
    pub async fn cancel_order(&self, order_id: &str) -> Result<Value> {
        self.send("DELETE", &format!("orders/{order_id}"), None, None)
            .await
    }

    /// Query an order by exchange order id
    pub async fn get_order(&self, order_id: &str) -> Result<Value> {
        self.send("GET", &format!("orders/{order_id}"), None, None)
            .await
    }

    /// Submit a validated payload: primary order first, then conditionals
    async fn submit_order(
        &self,
        mut order: OrderPayload,
        amount: Option<Fixed>,
        stop_loss_price: Option<&str>,
        take_profit_price: Option<&str>,
    ) -> Result<CompositeOrderAck> {
        if order.client_oid.is_none() {
            order.client_oid = Some(ClientOid::new().to_string());
        }

        if let Some(amount) = amount {
            let contract = self.contract_info(&order.symbol).await?;
            order.size = Some(contracts_from_amount(amount, contract.multiplier)?);
        }

        let response = self
            .send("POST", "orders", None, Some(serde_json::to_value(&order)?))
            .await?;
        let ack: OrderAck = serde_json::from_value(response)
            .map_err(|e| ExchangeError::SerializationError(e.to_string()))?;
        log_order!("PLACED", ack.order_id, order.symbol);

        let stop_loss = match stop_loss_price {
            Some(price) => Some(
                self.submit_conditional(&order, ConditionalTrigger::StopLoss, price)
                    .await,
            ),
            None => None,
        };
        let take_profit = match take_profit_price {
            Some(price) => Some(
                self.submit_conditional(&order, ConditionalTrigger::TakeProfit, price)
                    .await,
            ),
            None => None,
        };

        Ok(CompositeOrderAck {
            order: ack,
            stop_loss,
            take_profit,
        })
    }

    /// Submit one derived conditional leg; failures are captured, not raised
    async fn submit_conditional(
        &self,
        primary: &OrderPayload,
        trigger: ConditionalTrigger,
        trigger_price: &str,
    ) -> ConditionalResult {
        let exit = primary.conditional(trigger, trigger_price);

        let response = match serde_json::to_value(&exit) {
            Ok(body) => self.send("POST", "orders", None, Some(body)).await,
            Err(e) => Err(e.into()),
        };

        match response.and_then(|value| {
            serde_json::from_value::<OrderAck>(value)
                .map_err(|e| ExchangeError::SerializationError(e.to_string()))
        }) {
            Ok(ack) => {
                log_order!("PLACED", ack.order_id, exit.symbol);
                ConditionalResult::Placed(ack)
            }
            Err(e) => {
                log_error!("conditional order submission", e);
                ConditionalResult::Failed(e)
            }
        }
    }

    /// Build, sign and dispatch one request, interpreting the envelope
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        api_version: Option<&str>,
        body: Option<Value>,
    ) -> Result<Value> {
        let timer = PerfTimer::start(format!("kucoin_{}_{path}", method.to_ascii_lowercase()));

        let full_path = create_path(path, api_version);
        // Serialized exactly once; the signature covers the same bytes that
        // go on the wire.
        let body_str = match &body {
            Some(body) => serde_json::to_string(body)?,
            None => String::new(),
        };

        let signed = self.signer.sign_request(method, &full_path, &body_str)?;

        let mut url = self.base_url.clone();
        url.set_path(&full_path);

        debug!("📡 {} {} (signed)", method, url);

        let request_body = (!body_str.is_empty()).then_some(body_str.as_str());
        let response = self
            .https_client
            .request(method, url.as_str(), request_body, &signed.headers)
            .await?;

        let result = handle_response(response);
        timer.log_elapsed();
        result
    }
}

/// Build the versioned request path; the version defaults to v1
fn create_path(path: &str, api_version: Option<&str>) -> String {
    format!("/api/{}/{}", api_version.unwrap_or(API_V1), path)
}

/// Interpret the exchange response envelope
///
/// Non-2xx statuses and failure envelopes become `Api` errors carrying the
/// raw response; unparsable bodies a distinct `InvalidResponse`. On success
/// the `data` sub-field is unwrapped when present, else the whole body is
/// returned.
fn handle_response(response: HttpResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(ExchangeError::Api {
            status: response.status,
            body: response.body,
        });
    }

    let mut parsed: Value = match serde_json::from_str(&response.body) {
        Ok(parsed) => parsed,
        Err(_) => {
            return Err(ExchangeError::InvalidResponse(format!(
                "Invalid response: {}",
                response.body
            )));
        }
    };

    if let Some(code) = parsed.get("code") {
        if code.as_str() != Some(SUCCESS_CODE) {
            return Err(ExchangeError::Api {
                status: response.status,
                body: response.body,
            });
        }
    }

    if let Some(success) = parsed.get("success").and_then(Value::as_bool) {
        if !success {
            return Err(ExchangeError::Api {
                status: response.status,
                body: response.body,
            });
        }
    }

    if let Some(data) = parsed.get_mut("data") {
        return Ok(data.take());
    }

    Ok(parsed)
}

/// Convert a notional amount into an integral contract count.
///
/// The branch split is deliberate and preserved from the trading desk's
/// sizing rule: amounts of at least one unit against sub-unit multipliers
/// round to nearest, everything else floors.
pub fn contracts_from_amount(amount: Fixed, multiplier: Fixed) -> Result<i64> {
    if multiplier <= Fixed::ZERO {
        return Err(ExchangeError::Internal(format!(
            "contract multiplier must be positive, got {multiplier}"
        )));
    }

    let ratio = amount / multiplier;
    let size = if amount >= Fixed::ONE && multiplier < Fixed::ONE {
        ratio.round_dp(0)
    } else {
        ratio.floor()
    };

    size.to_i64().ok_or_else(|| {
        ExchangeError::Internal(format!(
            "contract sizing produced no integral value for amount {amount}, multiplier {multiplier}"
        ))
    })
}
