//! Inventory quality module.
//!
//! Per-tick quality degradation for stock items whose value decays over time,
//! implemented as deterministic domain logic (no IO, no scheduling).

pub mod config;
pub mod degradation;
pub mod item;
pub mod policy;

pub use config::DegradationConfig;
pub use degradation::{DEFAULT_STANDARD_DEGRADATION_AMOUNT, DegradationPolicy, TransientQuality};
pub use item::StockItem;
pub use policy::{DEFAULT_QUALITY_CEILING, QualityPolicy};
