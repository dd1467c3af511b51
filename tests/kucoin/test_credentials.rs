//! Test KuCoin Futures API credentials and connectivity
//!
//! This binary checks your API setup:
//! 1. Loads credentials from .env
//! 2. Verifies the signer accepts them
//! 3. Tests signed REST connectivity and clock skew
//! 4. Fetches contract metadata as a signed-read smoke test

use peregrine_core::prelude::*;
use peregrine_exchanges::kucoin::{KucoinConfig, KucoinCredentials, KucoinFuturesClient, KucoinSigner};
use std::env;

#[monoio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("🚀 Peregrine KuCoin Futures Credentials Test");
    println!("============================================");

    // Load environment variables
    dotenv::dotenv().ok();

    let use_sandbox = env::var("KUCOIN_SANDBOX")
        .unwrap_or_else(|_| "true".to_string())
        .parse::<bool>()
        .unwrap_or(true);

    let credentials = match KucoinCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("❌ ERROR: {e}");
            eprintln!("   Set KUCOIN_API_KEY, KUCOIN_API_SECRET and KUCOIN_API_PASSPHRASE in .env");
            return Err(e.into());
        }
    };

    if credentials.api_key == "your_kucoin_api_key_here" {
        eprintln!("❌ ERROR: Please update your .env file with real KuCoin API credentials!");
        return Err("Invalid credentials".into());
    }

    println!("✅ Environment variables loaded");
    if credentials.api_key.len() > 8 {
        println!(
            "   API Key: {}...{}",
            &credentials.api_key[..4],
            &credentials.api_key[credentials.api_key.len() - 4..]
        );
    }
    println!("   Using sandbox: {use_sandbox}");
    println!();

    println!("🔐 Testing signer...");
    let signer = KucoinSigner::new(credentials.clone())?;
    let sample = signer.sign_request("GET", "/api/v1/timestamp", "")?;
    println!("✅ Signer: OK ({} headers, timestamp {})", sample.headers.len(), sample.timestamp);
    println!();

    let config = if use_sandbox {
        KucoinConfig::sandbox()
    } else {
        KucoinConfig::default()
    }
    .with_credentials(
        credentials.api_key,
        credentials.api_secret,
        credentials.api_passphrase,
    );

    println!("🔗 Testing REST API connectivity...");
    let client = KucoinFuturesClient::new(config).await?;

    match client.server_time().await {
        Ok(server_time) => {
            println!("✅ REST API connectivity: OK");
            println!("   Server time: {server_time}");

            let local_time = millis();
            let time_diff = (server_time as i64 - local_time as i64).abs();

            if time_diff > 1000 {
                println!("⚠️  WARNING: Time difference > 1s: {time_diff}ms");
                println!("   Signed requests may be rejected; synchronize your system clock");
            } else {
                println!("✅ Time synchronization: OK ({time_diff}ms diff)");
            }
        }
        Err(e) => {
            eprintln!("❌ REST API connectivity failed: {e}");
            return Err(e.into());
        }
    }
    println!();

    println!("📊 Testing signed reads...");
    match client.contract_info("XBTUSDTM").await {
        Ok(contract) => {
            println!("✅ Contract metadata: OK");
            println!("   {} multiplier: {}", contract.symbol, contract.multiplier);
        }
        Err(e) => {
            eprintln!("⚠️  Contract metadata fetch failed: {e}");
            eprintln!("   Check your API key permissions");
        }
    }
    println!();

    println!("🎉 Credentials test completed!");
    println!();
    if use_sandbox {
        println!("💡 TIP: You're using the sandbox - perfect for development!");
        println!("   Switch to production by setting KUCOIN_SANDBOX=false in .env");
    } else {
        println!("⚠️  WARNING: You're using PRODUCTION credentials!");
        println!("   Orders placed through the examples are real.");
    }

    Ok(())
}
