//! Client-side order parameter validation
//!
//! Independent predicate checks run before any network call. Each failure
//! is a `ParameterValidation` error naming the offending field and its
//! constraint; nothing here has side effects.

use crate::errors::{ExchangeError, Result};
use crate::types::OrderSide;
use peregrine_core::Fixed;

pub const VALID_SIDE: &[&str] = &["buy", "sell"];
pub const VALID_STOP: &[&str] = &["down", "up"];
pub const VALID_STOP_PRICE_TYPE: &[&str] = &["TP", "MP", "IP"];
pub const VALID_TIME_IN_FORCE: &[&str] = &["GTC", "IOC"];

/// `side` must be one of buy/sell; returns the parsed side
pub fn validate_side(side: &str) -> Result<OrderSide> {
    OrderSide::parse(side)
}

/// When `stop` is set it needs a direction, a trigger price and a price type
pub fn validate_stop(
    stop: Option<&str>,
    stop_price: Option<&str>,
    stop_price_type: Option<&str>,
) -> Result<()> {
    let Some(stop) = stop.filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    if !VALID_STOP.contains(&stop) {
        return Err(ExchangeError::ParameterValidation(format!(
            "Property 'stop' must be one of {VALID_STOP:?}, got '{stop}'"
        )));
    }
    match stop_price_type {
        Some(t) if VALID_STOP_PRICE_TYPE.contains(&t) => {}
        _ => {
            return Err(ExchangeError::ParameterValidation(format!(
                "Property 'stop_price_type' must be one of {VALID_STOP_PRICE_TYPE:?}"
            )));
        }
    }
    if stop_price.filter(|p| !p.is_empty()).is_none() {
        return Err(ExchangeError::ParameterValidation(
            "Property 'stop_price' must be defined".to_string(),
        ));
    }

    Ok(())
}

/// A raw `stop` order and the stop-loss/take-profit convenience are
/// mutually exclusive conditional-order mechanisms
pub fn validate_stop_loss_take_profit(
    stop: Option<&str>,
    stop_loss_price: Option<&str>,
    take_profit_price: Option<&str>,
) -> Result<()> {
    let stop_set = stop.filter(|s| !s.is_empty()).is_some();
    if stop_set && (stop_loss_price.is_some() || take_profit_price.is_some()) {
        return Err(ExchangeError::ParameterValidation(
            "If 'stop_loss_price' or 'take_profit_price' is defined, 'stop' must be empty"
                .to_string(),
        ));
    }

    Ok(())
}

/// `time_in_force`, when set, must be a supported code
pub fn validate_time_in_force(time_in_force: Option<&str>) -> Result<()> {
    let Some(tif) = time_in_force.filter(|t| !t.is_empty()) else {
        return Ok(());
    };

    if !VALID_TIME_IN_FORCE.contains(&tif) {
        return Err(ExchangeError::ParameterValidation(format!(
            "Property 'time_in_force' must be one of {VALID_TIME_IN_FORCE:?}, got '{tif}'"
        )));
    }

    Ok(())
}

/// `post_only` is only meaningful for GTC orders
pub fn validate_post_only(post_only: bool, time_in_force: Option<&str>) -> Result<()> {
    if post_only && time_in_force != Some("GTC") {
        return Err(ExchangeError::ParameterValidation(
            "If 'post_only' is defined, 'time_in_force' must be GTC".to_string(),
        ));
    }

    Ok(())
}

/// `hidden` and `iceberg` are mutually exclusive display options
pub fn validate_hidden_and_iceberg(hidden: bool, iceberg: bool) -> Result<()> {
    if hidden && iceberg {
        return Err(ExchangeError::ParameterValidation(
            "Only one of 'hidden' and 'iceberg' can be defined".to_string(),
        ));
    }

    Ok(())
}

/// Iceberg orders must disclose a visible size
pub fn validate_iceberg(iceberg: bool, visible_size: Option<&str>) -> Result<()> {
    if iceberg && visible_size.filter(|v| !v.is_empty()).is_none() {
        return Err(ExchangeError::ParameterValidation(
            "If 'iceberg' is defined, 'visible_size' must be defined".to_string(),
        ));
    }

    Ok(())
}

/// A notional `amount` and an explicit contract `size` are exclusive
pub fn validate_amount_size(amount: Option<Fixed>, size: Option<i64>) -> Result<()> {
    if amount.is_some() && size.is_some() {
        return Err(ExchangeError::ParameterValidation(
            "Either 'amount' or 'size' must be empty".to_string(),
        ));
    }

    Ok(())
}
