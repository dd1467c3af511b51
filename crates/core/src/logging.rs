//! Unified logging integration
//!
//! Integrates ftlog for standardized logging across Rust components,
//! with a tracing-subscriber fallback when the feature is disabled.

#[cfg(not(feature = "ftlog"))]
use tracing::Level;
#[cfg(not(feature = "ftlog"))]
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the unified logging system
///
/// Safe to call more than once; only the first call takes effect.
pub fn init_logging() {
    INIT.call_once(|| {
        #[cfg(feature = "ftlog")]
        {
            init_ftlog();
        }

        #[cfg(not(feature = "ftlog"))]
        {
            init_tracing();
        }
    });
}

/// Initialize ftlog (when available)
#[cfg(feature = "ftlog")]
fn init_ftlog() {
    ftlog::builder()
        .max_log_level(ftlog::LevelFilter::Debug)
        .bounded(100000, false) // 100k buffer, non-blocking
        .utc()
        .build()
        .expect("Failed to initialize ftlog");

    tracing::info!("📝 Initialized ftlog unified logging");
}

/// Initialize tracing (fallback)
#[cfg(not(feature = "ftlog"))]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    tracing::info!("📝 Initialized tracing logging (ftlog not available)");
}

/// Order lifecycle logging
#[macro_export]
macro_rules! log_order {
    ($action:expr, $order_id:expr, $symbol:expr) => {
        tracing::info!("📋 ORDER {}: {} ({})", $action, $order_id, $symbol);
    };
}

#[macro_export]
macro_rules! log_error {
    ($operation:expr, $error:expr) => {
        tracing::error!("❌ {} failed: {}", $operation, $error);
    };
}
