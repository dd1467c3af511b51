//! Cross-crate tests for the Peregrine KuCoin Futures SDK
//!
//! Unit coverage lives next to the code in each crate; this package holds
//! the cross-cutting order-flow suites plus runnable examples.

#[cfg(test)]
mod order_flow_tests;
#[cfg(test)]
mod validation_tests;
