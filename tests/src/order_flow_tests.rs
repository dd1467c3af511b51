//! Composite order flow properties
//!
//! Exercises the pure seams of the order pipeline: payload assembly,
//! notional-to-contract sizing, conditional leg derivation and client
//! order id generation, without touching the network.

use peregrine_core::{fixed, ClientOid, Fixed};
use peregrine_exchanges::kucoin::{
    contracts_from_amount, ConditionalTrigger, KucoinCredentials, KucoinSigner, LimitOrderParams,
    MarketOrderParams, StopDirection,
};
use peregrine_exchanges::types::OrderSide;
use proptest::prelude::*;
use rstest::rstest;

fn signer() -> KucoinSigner {
    KucoinSigner::new(KucoinCredentials::new(
        "key".to_string(),
        "secret".to_string(),
        "passphrase".to_string(),
    ))
    .unwrap()
}

#[test]
fn amount_never_reaches_the_wire() {
    // `amount` is a client-side convenience: the params accept it, the
    // payload has no field for it.
    let params = LimitOrderParams::new("XBTUSDTM", "buy", "50000").with_amount(fixed!(2));
    let payload = params.build_payload().unwrap();

    let value = serde_json::to_value(&payload).unwrap();
    assert!(!value.as_object().unwrap().contains_key("amount"));
    assert!(payload.size.is_none()); // resolved later, against ContractInfo
}

#[test]
fn size_passes_through_unchanged() {
    let params = LimitOrderParams::new("XBTUSDTM", "buy", "50000").with_size(42);
    let payload = params.build_payload().unwrap();
    assert_eq!(payload.size, Some(42));
}

#[rstest]
#[case("2", "0.1", 20)] // round branch: amount >= 1, multiplier < 1
#[case("1", "0.001", 1000)]
#[case("3.5", "0.5", 7)]
#[case("0.5", "2", 0)] // floor branch: sub-unit amount
#[case("0.9", "0.2", 4)]
#[case("7", "2", 3)] // floor branch: multiplier >= 1
fn contract_sizing_matrix(#[case] amount: &str, #[case] multiplier: &str, #[case] expected: i64) {
    let amount = Fixed::from_str_exact(amount).unwrap();
    let multiplier = Fixed::from_str_exact(multiplier).unwrap();

    assert_eq!(contracts_from_amount(amount, multiplier).unwrap(), expected);
}

#[test]
fn contract_sizing_rejects_defective_multiplier() {
    assert!(contracts_from_amount(fixed!(2), Fixed::ZERO).is_err());
    assert!(contracts_from_amount(fixed!(2), Fixed::from_str_exact("-1").unwrap()).is_err());
}

#[test]
fn stop_loss_leg_mirrors_a_buy() {
    let primary = LimitOrderParams::new("XBTUSDTM", "buy", "50000")
        .with_size(10)
        .build_payload()
        .unwrap();

    let leg = primary.conditional(ConditionalTrigger::StopLoss, "100");

    assert_eq!(leg.side, OrderSide::Sell);
    assert_eq!(leg.stop, Some(StopDirection::Down));
    assert_eq!(leg.stop_price.as_deref(), Some("100"));
    assert_eq!(leg.reduce_only, Some(true));
    // Everything the primary carried comes along
    assert_eq!(leg.symbol, "XBTUSDTM");
    assert_eq!(leg.size, Some(10));
    assert_eq!(leg.price.as_deref(), Some("50000"));
}

#[test]
fn take_profit_leg_mirrors_a_sell() {
    let primary = MarketOrderParams::new("ETHUSDTM", "sell")
        .with_size(4)
        .build_payload()
        .unwrap();

    let leg = primary.conditional(ConditionalTrigger::TakeProfit, "50");

    assert_eq!(leg.side, OrderSide::Buy);
    assert_eq!(leg.stop, Some(StopDirection::Down));
    assert_eq!(leg.stop_price.as_deref(), Some("50"));
}

#[rstest]
#[case(ConditionalTrigger::StopLoss, OrderSide::Buy, StopDirection::Down)]
#[case(ConditionalTrigger::StopLoss, OrderSide::Sell, StopDirection::Up)]
#[case(ConditionalTrigger::TakeProfit, OrderSide::Buy, StopDirection::Up)]
#[case(ConditionalTrigger::TakeProfit, OrderSide::Sell, StopDirection::Down)]
fn trigger_direction_matrix(
    #[case] trigger: ConditionalTrigger,
    #[case] side: OrderSide,
    #[case] expected: StopDirection,
) {
    assert_eq!(trigger.direction(side), expected);
}

proptest! {
    #[test]
    fn client_oids_are_always_flat_hex(_seed in 0u32..64) {
        let oid = ClientOid::new();
        let id = oid.as_str();

        prop_assert_eq!(id.len(), 32);
        prop_assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn signatures_are_deterministic_and_padded(ts in 1u64..u64::MAX / 2, body in "[ -~]{0,64}") {
        let signer = signer();

        let a = signer.sign(ts, "POST", "/api/v1/orders", &body).unwrap();
        let b = signer.sign(ts, "POST", "/api/v1/orders", &body).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), 44);
    }

    #[test]
    fn signatures_differ_across_timestamps(ts in 1u64..u64::MAX / 2) {
        let signer = signer();

        let a = signer.sign(ts, "POST", "/api/v1/orders", "{}").unwrap();
        let b = signer.sign(ts + 1, "POST", "/api/v1/orders", "{}").unwrap();

        prop_assert_ne!(a, b);
    }
}
