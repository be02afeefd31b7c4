//! TrainMetrics - training load and zone calculations
//!
//! Converts workout inputs (average power, FTP, duration, pace level and
//! time-in-zone breakdowns) into Training Stress Score, Intensity Factor,
//! power zone boundaries, pace zone targets and chart target lines.
//! Every calculation is a pure function; missing data yields `None`.

pub mod metrics;
pub mod storage;

// Re-export commonly used types
pub use metrics::calculator::MetricsCalculator;
pub use metrics::distribution::{ClassType, ZoneDistributionEntry, ZoneId};
pub use metrics::pace::{PaceZone, PaceZoneTargets};
pub use metrics::zones::{PowerZoneRanges, ZoneRange};
pub use storage::config::AppConfig;
