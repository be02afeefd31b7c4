//! Target line derivation for workout charts.
//!
//! A class is described as a sequence of segments, each asking for a zone.
//! Charts draw the target as a step line: one point where each segment
//! starts and one where it ends, both at the segment's target value.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::metrics::distribution::{deserialize_zone_id, ZoneId};
use crate::metrics::pace::PaceZoneTargets;
use crate::metrics::zones::PowerZoneRanges;

/// One block of a class asking for a single zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSegment {
    /// Seconds from class start
    pub start_offset: u32,
    /// Segment length in seconds
    pub length: u32,
    /// Requested zone: `3`, `"3"` or a pace zone name
    #[serde(deserialize_with = "deserialize_zone_id")]
    pub zone: ZoneId,
}

/// Target value of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum TargetValue {
    Watts(f64),
    MinPerMile(f64),
}

/// A vertex of the target step line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetPoint {
    /// Seconds from class start
    pub offset: u32,
    pub target: TargetValue,
}

/// Build the target step line for `segments`.
///
/// Power segments need `ftp`, pace segments need `pace_level`; segments
/// whose target can't be resolved, or that have zero length, are left out.
pub fn target_line(
    segments: &[ClassSegment],
    ftp: Option<f64>,
    pace_level: Option<u8>,
) -> Vec<TargetPoint> {
    let power_ranges = ftp.and_then(PowerZoneRanges::from_ftp);
    let pace_targets = pace_level.and_then(PaceZoneTargets::from_level);

    let mut ordered: Vec<&ClassSegment> = segments.iter().collect();
    ordered.sort_by_key(|segment| segment.start_offset);

    let mut points = Vec::with_capacity(ordered.len() * 2);
    for segment in ordered {
        if segment.length == 0 {
            continue;
        }

        let target = match segment.zone {
            ZoneId::Power(zone) => power_ranges
                .as_ref()
                .and_then(|ranges| ranges.target_watts(zone))
                .map(TargetValue::Watts),
            ZoneId::Pace(zone) => pace_targets
                .as_ref()
                .map(|targets| TargetValue::MinPerMile(targets.get(zone))),
        };

        let Some(target) = target else {
            trace!(zone = %segment.zone, offset = segment.start_offset, "No target for segment");
            continue;
        };

        points.push(TargetPoint {
            offset: segment.start_offset,
            target,
        });
        points.push(TargetPoint {
            offset: segment.start_offset.saturating_add(segment.length),
            target,
        });
    }

    points
}
