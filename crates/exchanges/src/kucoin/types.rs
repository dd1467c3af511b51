//! KuCoin Futures wire types
//!
//! Order payloads in the exact shape the exchange expects: camelCase keys
//! (except `visible_size`, which the order endpoint takes as-is), optional
//! fields omitted entirely when unset.

use serde::{Deserialize, Serialize};

use crate::errors::{ExchangeError, Result};
use crate::kucoin::validate::{
    validate_amount_size, validate_hidden_and_iceberg, validate_iceberg, validate_post_only,
    validate_side, validate_stop, validate_stop_loss_take_profit, validate_time_in_force,
};
use crate::types::{OrderSide, OrderType};
use peregrine_core::{ClientOid, Fixed};

/// Stop trigger direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopDirection {
    Down,
    Up,
}

impl StopDirection {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "down" => Ok(StopDirection::Down),
            "up" => Ok(StopDirection::Up),
            _ => Err(ExchangeError::ParameterValidation(format!(
                "Property 'stop' must be one of [\"down\", \"up\"], got '{value}'"
            ))),
        }
    }
}

/// Price feed the stop trigger references: last trade, mark or index price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopPriceType {
    TP,
    MP,
    IP,
}

impl StopPriceType {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "TP" => Ok(StopPriceType::TP),
            "MP" => Ok(StopPriceType::MP),
            "IP" => Ok(StopPriceType::IP),
            _ => Err(ExchangeError::ParameterValidation(format!(
                "Property 'stop_price_type' must be one of [\"TP\", \"MP\", \"IP\"], got '{value}'"
            ))),
        }
    }
}

/// Which exit leg a derived conditional order implements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalTrigger {
    StopLoss,
    TakeProfit,
}

impl ConditionalTrigger {
    /// Trigger direction relative to the primary order's side.
    ///
    /// A long position stops out on the way down and takes profit on the
    /// way up; a short position is the mirror image.
    pub fn direction(&self, primary_side: OrderSide) -> StopDirection {
        match (self, primary_side) {
            (ConditionalTrigger::StopLoss, OrderSide::Buy) => StopDirection::Down,
            (ConditionalTrigger::StopLoss, OrderSide::Sell) => StopDirection::Up,
            (ConditionalTrigger::TakeProfit, OrderSide::Buy) => StopDirection::Up,
            (ConditionalTrigger::TakeProfit, OrderSide::Sell) => StopDirection::Down,
        }
    }
}

/// Order submission payload
///
/// Only fields the caller supplied appear on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<String>,
    #[serde(rename = "clientOid", skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<StopDirection>,
    #[serde(rename = "stopPrice", skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    #[serde(rename = "stopPriceType", skip_serializing_if = "Option::is_none")]
    pub stop_price_type: Option<StopPriceType>,
    #[serde(rename = "reduceOnly", skip_serializing_if = "Option::is_none")]
    pub reduce_only: Option<bool>,
    #[serde(rename = "closeOrder", skip_serializing_if = "Option::is_none")]
    pub close_order: Option<bool>,
    #[serde(rename = "forceHold", skip_serializing_if = "Option::is_none")]
    pub force_hold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<bool>,
    // The order endpoint takes this key in snake form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_size: Option<String>,
}

impl OrderPayload {
    /// Derive a conditional exit order from this (primary) order.
    ///
    /// The exit mirrors the primary with its side inverted, a fresh
    /// clientOid, the trigger direction implied by the primary side, and
    /// reduce-only set so it can never grow the position.
    pub fn conditional(&self, trigger: ConditionalTrigger, trigger_price: &str) -> OrderPayload {
        let mut order = self.clone();
        order.client_oid = Some(ClientOid::new().to_string());
        order.side = self.side.opposite();
        order.stop = Some(trigger.direction(self.side));
        order.stop_price = Some(trigger_price.to_string());
        order.stop_price_type = Some(StopPriceType::TP);
        order.reduce_only = Some(true);
        order
    }
}

/// Parameters for a limit order
///
/// Mirrors the order endpoint: only `symbol`, `side` and `price` are
/// required; everything else is forwarded only when supplied.
#[derive(Debug, Clone, Default)]
pub struct LimitOrderParams<'a> {
    pub symbol: &'a str,
    pub side: &'a str,
    pub price: &'a str,
    pub leverage: Option<&'a str>,
    pub amount: Option<Fixed>,
    pub size: Option<i64>,
    pub client_oid: Option<&'a str>,
    pub remark: Option<&'a str>,
    pub stop: Option<&'a str>,
    pub stop_price: Option<&'a str>,
    pub stop_price_type: Option<&'a str>,
    pub reduce_only: Option<bool>,
    pub close_order: Option<bool>,
    pub force_hold: Option<bool>,
    pub time_in_force: Option<&'a str>,
    pub post_only: Option<bool>,
    pub hidden: Option<bool>,
    pub iceberg: Option<bool>,
    pub visible_size: Option<&'a str>,
    pub stop_loss_price: Option<&'a str>,
    pub take_profit_price: Option<&'a str>,
}

impl<'a> LimitOrderParams<'a> {
    pub fn new(symbol: &'a str, side: &'a str, price: &'a str) -> Self {
        Self {
            symbol,
            side,
            price,
            ..Default::default()
        }
    }

    pub fn with_leverage(mut self, leverage: &'a str) -> Self {
        self.leverage = Some(leverage);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_amount(mut self, amount: Fixed) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_client_oid(mut self, client_oid: &'a str) -> Self {
        self.client_oid = Some(client_oid);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: &'a str) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_stop_loss(mut self, stop_loss_price: &'a str) -> Self {
        self.stop_loss_price = Some(stop_loss_price);
        self
    }

    pub fn with_take_profit(mut self, take_profit_price: &'a str) -> Self {
        self.take_profit_price = Some(take_profit_price);
        self
    }

    /// Validate and assemble the wire payload.
    ///
    /// Limit orders additionally check the time-in-force / post-only /
    /// hidden / iceberg combinations that market orders have no say in.
    pub fn build_payload(&self) -> Result<OrderPayload> {
        validate_time_in_force(self.time_in_force)?;
        validate_post_only(self.post_only.unwrap_or(false), self.time_in_force)?;
        validate_hidden_and_iceberg(
            self.hidden.unwrap_or(false),
            self.iceberg.unwrap_or(false),
        )?;
        validate_iceberg(self.iceberg.unwrap_or(false), self.visible_size)?;

        let side = validate_side(self.side)?;
        validate_stop(self.stop, self.stop_price, self.stop_price_type)?;
        validate_stop_loss_take_profit(self.stop, self.stop_loss_price, self.take_profit_price)?;
        validate_amount_size(self.amount, self.size)?;

        let iceberg = self.iceberg.filter(|set| *set);

        Ok(OrderPayload {
            symbol: self.symbol.to_uppercase(),
            side,
            order_type: OrderType::Limit,
            price: Some(self.price.to_string()),
            size: self.size,
            leverage: optional_str(self.leverage),
            client_oid: optional_str(self.client_oid),
            remark: optional_str(self.remark),
            stop: parse_optional(self.stop, StopDirection::parse)?,
            stop_price: optional_str(self.stop_price),
            stop_price_type: parse_optional(self.stop_price_type, StopPriceType::parse)?,
            reduce_only: self.reduce_only.filter(|set| *set),
            close_order: self.close_order.filter(|set| *set),
            force_hold: self.force_hold.filter(|set| *set),
            hidden: self.hidden.filter(|set| *set),
            iceberg,
            // visible_size rides along with iceberg only
            visible_size: iceberg.and_then(|_| optional_str(self.visible_size)),
        })
    }
}

/// Parameters for a market order
///
/// No price, and none of the limit-only execution flags.
#[derive(Debug, Clone, Default)]
pub struct MarketOrderParams<'a> {
    pub symbol: &'a str,
    pub side: &'a str,
    pub leverage: Option<&'a str>,
    pub amount: Option<Fixed>,
    pub size: Option<i64>,
    pub client_oid: Option<&'a str>,
    pub remark: Option<&'a str>,
    pub stop: Option<&'a str>,
    pub stop_price: Option<&'a str>,
    pub stop_price_type: Option<&'a str>,
    pub reduce_only: Option<bool>,
    pub close_order: Option<bool>,
    pub force_hold: Option<bool>,
    pub stop_loss_price: Option<&'a str>,
    pub take_profit_price: Option<&'a str>,
}

impl<'a> MarketOrderParams<'a> {
    pub fn new(symbol: &'a str, side: &'a str) -> Self {
        Self {
            symbol,
            side,
            ..Default::default()
        }
    }

    pub fn with_leverage(mut self, leverage: &'a str) -> Self {
        self.leverage = Some(leverage);
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_amount(mut self, amount: Fixed) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_stop_loss(mut self, stop_loss_price: &'a str) -> Self {
        self.stop_loss_price = Some(stop_loss_price);
        self
    }

    pub fn with_take_profit(mut self, take_profit_price: &'a str) -> Self {
        self.take_profit_price = Some(take_profit_price);
        self
    }

    /// Validate and assemble the wire payload
    pub fn build_payload(&self) -> Result<OrderPayload> {
        let side = validate_side(self.side)?;
        validate_stop(self.stop, self.stop_price, self.stop_price_type)?;
        validate_stop_loss_take_profit(self.stop, self.stop_loss_price, self.take_profit_price)?;
        validate_amount_size(self.amount, self.size)?;

        Ok(OrderPayload {
            symbol: self.symbol.to_uppercase(),
            side,
            order_type: OrderType::Market,
            price: None,
            size: self.size,
            leverage: optional_str(self.leverage),
            client_oid: optional_str(self.client_oid),
            remark: optional_str(self.remark),
            stop: parse_optional(self.stop, StopDirection::parse)?,
            stop_price: optional_str(self.stop_price),
            stop_price_type: parse_optional(self.stop_price_type, StopPriceType::parse)?,
            reduce_only: self.reduce_only.filter(|set| *set),
            close_order: self.close_order.filter(|set| *set),
            force_hold: self.force_hold.filter(|set| *set),
            hidden: None,
            iceberg: None,
            visible_size: None,
        })
    }
}

fn optional_str(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_optional<T>(value: Option<&str>, parse: impl Fn(&str) -> Result<T>) -> Result<Option<T>> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(parse(v)?)),
        None => Ok(None),
    }
}

/// Per-symbol contract metadata
///
/// The `multiplier` converts a notional amount into an integral contract
/// count; the rest is parsed when the exchange provides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    pub symbol: String,
    pub multiplier: Fixed,
    #[serde(rename = "lotSize", default)]
    pub lot_size: Option<Fixed>,
    #[serde(rename = "tickSize", default)]
    pub tick_size: Option<Fixed>,
    #[serde(rename = "maxOrderQty", default)]
    pub max_order_qty: Option<i64>,
    #[serde(rename = "quoteCurrency", default)]
    pub quote_currency: Option<String>,
}

/// Acknowledgement for a single accepted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// Outcome of one derived conditional order submission
#[derive(Debug, Clone)]
pub enum ConditionalResult {
    Placed(OrderAck),
    Failed(ExchangeError),
}

impl ConditionalResult {
    pub fn is_placed(&self) -> bool {
        matches!(self, ConditionalResult::Placed(_))
    }
}

/// Result of a composite order submission
///
/// The primary order either succeeded (this value exists) or the whole
/// call errored. Conditional legs are submitted after the primary and are
/// never rolled back; their individual outcomes are recorded here instead
/// of being silently dropped.
#[derive(Debug, Clone)]
pub struct CompositeOrderAck {
    pub order: OrderAck,
    pub stop_loss: Option<ConditionalResult>,
    pub take_profit: Option<ConditionalResult>,
}

impl CompositeOrderAck {
    /// True when every requested leg was accepted by the exchange
    pub fn fully_placed(&self) -> bool {
        [&self.stop_loss, &self.take_profit]
            .into_iter()
            .flatten()
            .all(ConditionalResult::is_placed)
    }
}
