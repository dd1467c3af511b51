//! Basic KuCoin Futures connectivity walkthrough
//!
//! Fetches server time and contract metadata for a symbol. Requires API
//! credentials in the environment (all requests are signed).

use peregrine_core::prelude::*;
use peregrine_exchanges::kucoin::{KucoinConfig, KucoinFuturesClient};
use tracing::{error, info};

#[monoio::main(enable_timer = true)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚀 Starting KuCoin Futures basic example");

    let config = match KucoinConfig::default().with_env_credentials() {
        Ok(config) => {
            info!("✅ API credentials loaded");
            config
        }
        Err(e) => {
            error!("❌ Failed to load API credentials: {}", e);
            return Err(e.into());
        }
    };

    let client = KucoinFuturesClient::new(config).await?;
    info!("✅ REST client initialized");

    info!("\n🕐 Fetching server time...");
    let server_time = client.server_time().await?;
    let local_time = millis();
    info!("   Server time: {} ms", server_time);
    info!("   Local clock skew: {} ms", local_time as i64 - server_time as i64);

    info!("\n📊 Fetching XBTUSDTM contract metadata...");
    let contract = client.contract_info("XBTUSDTM").await?;
    info!("   Symbol: {}", contract.symbol);
    info!("   Multiplier: {}", contract.multiplier);
    if let Some(tick_size) = contract.tick_size {
        info!("   Tick size: {}", tick_size);
    }
    if let Some(lot_size) = contract.lot_size {
        info!("   Lot size: {}", lot_size);
    }

    info!("\n✅ Done!");

    Ok(())
}
