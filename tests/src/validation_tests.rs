//! Parameterized validation coverage
//!
//! The validator is a set of independent predicate checks; rstest cases
//! walk the accept/reject matrix for each of them.

use peregrine_core::Fixed;
use peregrine_exchanges::kucoin::validate::*;
use peregrine_exchanges::types::OrderSide;
use rstest::rstest;

#[rstest]
#[case("buy", true)]
#[case("sell", true)]
#[case("BUY", true)]
#[case("Sell", true)]
#[case("hold", false)]
#[case("long", false)]
#[case("", false)]
fn side_matrix(#[case] side: &str, #[case] valid: bool) {
    assert_eq!(validate_side(side).is_ok(), valid, "side {side:?}");
}

#[test]
fn side_parses_to_enum() {
    assert_eq!(validate_side("BUY").unwrap(), OrderSide::Buy);
    assert_eq!(validate_side("sell").unwrap(), OrderSide::Sell);
}

#[rstest]
#[case(None, None, None, true)]
#[case(Some("down"), Some("9500"), Some("TP"), true)]
#[case(Some("up"), Some("10500"), Some("MP"), true)]
#[case(Some("up"), Some("10500"), Some("IP"), true)]
#[case(Some("flat"), Some("9500"), Some("TP"), false)]
#[case(Some("down"), Some("9500"), Some("LP"), false)]
#[case(Some("down"), Some("9500"), None, false)]
#[case(Some("down"), None, Some("TP"), false)]
#[case(Some("down"), Some(""), Some("TP"), false)]
fn stop_matrix(
    #[case] stop: Option<&str>,
    #[case] stop_price: Option<&str>,
    #[case] stop_price_type: Option<&str>,
    #[case] valid: bool,
) {
    assert_eq!(validate_stop(stop, stop_price, stop_price_type).is_ok(), valid);
}

#[rstest]
#[case(None, Some("9000"), Some("11000"), true)]
#[case(Some("down"), None, None, true)]
#[case(Some("down"), Some("9000"), None, false)]
#[case(Some("up"), None, Some("11000"), false)]
#[case(Some("up"), Some("9000"), Some("11000"), false)]
fn stop_exclusivity_matrix(
    #[case] stop: Option<&str>,
    #[case] stop_loss: Option<&str>,
    #[case] take_profit: Option<&str>,
    #[case] valid: bool,
) {
    assert_eq!(
        validate_stop_loss_take_profit(stop, stop_loss, take_profit).is_ok(),
        valid
    );
}

#[rstest]
#[case(None, true)]
#[case(Some("GTC"), true)]
#[case(Some("IOC"), true)]
#[case(Some("FOK"), false)]
#[case(Some("gtc"), false)]
fn time_in_force_matrix(#[case] tif: Option<&str>, #[case] valid: bool) {
    assert_eq!(validate_time_in_force(tif).is_ok(), valid);
}

#[rstest]
#[case(false, None, true)]
#[case(false, Some("IOC"), true)]
#[case(true, Some("GTC"), true)]
#[case(true, Some("IOC"), false)]
#[case(true, None, false)]
fn post_only_matrix(#[case] post_only: bool, #[case] tif: Option<&str>, #[case] valid: bool) {
    assert_eq!(validate_post_only(post_only, tif).is_ok(), valid);
}

#[rstest]
#[case(false, false, true)]
#[case(true, false, true)]
#[case(false, true, true)]
#[case(true, true, false)]
fn hidden_iceberg_matrix(#[case] hidden: bool, #[case] iceberg: bool, #[case] valid: bool) {
    assert_eq!(validate_hidden_and_iceberg(hidden, iceberg).is_ok(), valid);
}

#[rstest]
#[case(false, None, true)]
#[case(true, Some("10"), true)]
#[case(true, None, false)]
#[case(true, Some(""), false)]
fn iceberg_matrix(#[case] iceberg: bool, #[case] visible_size: Option<&str>, #[case] valid: bool) {
    assert_eq!(validate_iceberg(iceberg, visible_size).is_ok(), valid);
}

#[test]
fn amount_size_exclusive() {
    let amount = Fixed::from_str_exact("2").unwrap();

    assert!(validate_amount_size(None, None).is_ok());
    assert!(validate_amount_size(Some(amount), None).is_ok());
    assert!(validate_amount_size(None, Some(10)).is_ok());
    assert!(validate_amount_size(Some(amount), Some(10)).is_err());
}

#[test]
fn validation_errors_name_the_field() {
    let err = validate_time_in_force(Some("FOK")).unwrap_err();
    assert!(err.to_string().contains("time_in_force"));

    let err = validate_post_only(true, Some("IOC")).unwrap_err();
    assert!(err.to_string().contains("post_only"));

    let err = validate_iceberg(true, None).unwrap_err();
    assert!(err.to_string().contains("visible_size"));
}
