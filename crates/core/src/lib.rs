//! # Peregrine Core
//!
//! Shared utilities for the Peregrine trading SDK.
//!
//! ## Architecture Principles
//!
//! 1. **Nanosecond precision timing** - one clock for latency and API timestamps
//! 2. **Fixed-point arithmetic** - exact decimal calculations, no float drift
//! 3. **Unified logging** - ftlog for consistent logging, tracing fallback
//! 4. **Efficient ID generation** - nanoid-backed client order ids

pub mod timing;
pub mod fixed;
pub mod logging;
pub mod id_gen;

// Re-export commonly used items
pub use timing::{nanos, millis, PerfTimer, Timestamp};
pub use fixed::Fixed;
pub use logging::init_logging;
pub use id_gen::ClientOid;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::timing::{nanos, millis, PerfTimer, Timestamp};
    pub use crate::fixed::Fixed;
    pub use crate::id_gen::ClientOid;
    pub use crate::logging::init_logging;

    // Common external types
    pub use serde::{Deserialize, Serialize};
    pub use chrono::{DateTime, Utc};
}
