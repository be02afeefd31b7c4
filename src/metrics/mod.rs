//! Metrics module for training load and zone calculations.

pub mod calculator;
pub mod distribution;
pub mod error;
pub mod pace;
pub mod targets;
pub mod zones;

pub use calculator::{clamp_intensity_factor, MetricsCalculator};
pub use distribution::{
    parse_zone_distribution, summarize, ClassType, DistributionSummary, ZoneDistributionEntry,
    ZoneId, ZoneShare,
};
pub use error::{MetricsError, MetricsResult};
pub use pace::{PaceZone, PaceZoneTargets};
pub use targets::{target_line, ClassSegment, TargetPoint, TargetValue};
pub use zones::{PowerZoneRanges, ZoneRange, ZONE7_ESTIMATE_PERCENT};
