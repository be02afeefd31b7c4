//! Time-in-zone distributions.
//!
//! A distribution is a list of `(zone, seconds)` entries for one workout.
//! Upstream feeds deliver these as loosely typed JSON records; they are
//! validated here into [`ZoneDistributionEntry`] before reaching the
//! calculator.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::metrics::error::{MetricsError, MetricsResult};
use crate::metrics::pace::{PaceZone, PaceZoneTargets};
use crate::metrics::zones::{is_valid_power_zone, PowerZoneRanges};

/// Zone identifier: a power zone number or a named pace zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneId {
    Power(u8),
    Pace(PaceZone),
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Power(zone) => write!(f, "Z{zone}"),
            ZoneId::Pace(zone) => write!(f, "{zone}"),
        }
    }
}

/// Time spent in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDistributionEntry {
    pub zone: ZoneId,
    pub time_sec: u32,
}

impl ZoneDistributionEntry {
    pub fn power(zone: u8, time_sec: u32) -> Self {
        Self {
            zone: ZoneId::Power(zone),
            time_sec,
        }
    }

    pub fn pace(zone: PaceZone, time_sec: u32) -> Self {
        Self {
            zone: ZoneId::Pace(zone),
            time_sec,
        }
    }
}

/// Kind of class a distribution was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassType {
    /// Cycling class with power zone targets
    PowerZone,
    /// Running/walking class with pace targets
    PaceTarget,
}

impl ClassType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::PowerZone => "power_zone",
            ClassType::PaceTarget => "pace_target",
        }
    }
}

impl fmt::Display for ClassType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassType {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "power_zone" => Ok(ClassType::PowerZone),
            "pace_target" => Ok(ClassType::PaceTarget),
            _ => Err(MetricsError::UnknownClassType(s.to_string())),
        }
    }
}

/// Parse a JSON array of `{"zone": .., "time_sec": ..}` records.
///
/// Records with an unrecognised zone or a missing/negative duration are
/// skipped. Only a payload that is not a JSON array is an error.
pub fn parse_zone_distribution(json: &str) -> MetricsResult<Vec<ZoneDistributionEntry>> {
    let value: Value = serde_json::from_str(json)?;
    zone_distribution_from_value(&value)
}

/// Same as [`parse_zone_distribution`] for an already decoded value.
pub fn zone_distribution_from_value(value: &Value) -> MetricsResult<Vec<ZoneDistributionEntry>> {
    let records = value
        .as_array()
        .ok_or_else(|| MetricsError::InvalidInput("zone distribution must be an array".to_string()))?;

    let entries: Vec<ZoneDistributionEntry> = records.iter().filter_map(parse_record).collect();

    if entries.len() < records.len() {
        debug!(
            skipped = records.len() - entries.len(),
            kept = entries.len(),
            "Skipped unrecognised zone distribution records"
        );
    }

    Ok(entries)
}

fn parse_record(record: &Value) -> Option<ZoneDistributionEntry> {
    let zone = parse_zone_id(record.get("zone")?)?;
    let time_sec = parse_seconds(record.get("time_sec")?)?;
    Some(ZoneDistributionEntry { zone, time_sec })
}

fn parse_zone_id(value: &Value) -> Option<ZoneId> {
    match zone_id_from_value(value)? {
        ZoneId::Power(n) if !is_valid_power_zone(n) => None,
        zone => Some(zone),
    }
}

/// Read a zone identifier written as a number, a numeric string or a pace
/// zone name. Power zone numbers are not range checked.
fn zone_id_from_value(value: &Value) -> Option<ZoneId> {
    match value {
        Value::Number(n) => Some(ZoneId::Power(u8::try_from(n.as_u64()?).ok()?)),
        Value::String(s) => match s.trim().parse::<u8>() {
            Ok(n) => Some(ZoneId::Power(n)),
            Err(_) => s.parse().ok().map(ZoneId::Pace),
        },
        _ => None,
    }
}

/// Serde helper accepting the same zone spellings as
/// [`parse_zone_distribution`], e.g. `3`, `"3"` or `"Very Hard"`.
pub(crate) fn deserialize_zone_id<'de, D>(deserializer: D) -> Result<ZoneId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    zone_id_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised zone: {value}")))
}

fn parse_seconds(value: &Value) -> Option<u32> {
    let seconds = value.as_f64()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(seconds.round().min(f64::from(u32::MAX)) as u32)
}

/// Fold a power series into time per zone.
///
/// Each sample stands for `sample_interval_secs` seconds; per-zone time
/// saturates at `u32::MAX`. Negative and non-finite samples are skipped. Zones with no time are omitted; the rest
/// are returned in zone order.
pub fn power_zone_distribution(
    samples: &[f64],
    sample_interval_secs: u32,
    ranges: &PowerZoneRanges,
) -> Vec<ZoneDistributionEntry> {
    let mut seconds: BTreeMap<u8, u32> = BTreeMap::new();
    for zone in samples.iter().filter_map(|&watts| ranges.zone_for(watts)) {
        let total = seconds.entry(zone).or_default();
        *total = total.saturating_add(sample_interval_secs);
    }
    seconds
        .into_iter()
        .map(|(zone, time_sec)| ZoneDistributionEntry::power(zone, time_sec))
        .collect()
}

/// Fold a pace series (minutes per mile) into time per pace zone.
pub fn pace_zone_distribution(
    samples: &[f64],
    sample_interval_secs: u32,
    targets: &PaceZoneTargets,
) -> Vec<ZoneDistributionEntry> {
    let mut seconds: BTreeMap<PaceZone, u32> = BTreeMap::new();
    for zone in samples.iter().filter_map(|&pace| targets.zone_for_pace(pace)) {
        let total = seconds.entry(zone).or_default();
        *total = total.saturating_add(sample_interval_secs);
    }
    seconds
        .into_iter()
        .map(|(zone, time_sec)| ZoneDistributionEntry::pace(zone, time_sec))
        .collect()
}

/// Share of total time spent in one zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneShare {
    pub zone: ZoneId,
    pub time_sec: u64,
    pub percent: f64,
}

/// Totals for a distribution, for dashboards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub total_sec: u64,
    pub zones: Vec<ZoneShare>,
}

/// Merge duplicate zones and compute each zone's percentage of total time.
pub fn summarize(entries: &[ZoneDistributionEntry]) -> DistributionSummary {
    let mut seconds: BTreeMap<ZoneId, u64> = BTreeMap::new();
    for entry in entries {
        *seconds.entry(entry.zone).or_default() += u64::from(entry.time_sec);
    }

    let total_sec: u64 = seconds.values().sum();
    let zones = seconds
        .into_iter()
        .map(|(zone, time_sec)| ZoneShare {
            zone,
            time_sec,
            percent: if total_sec > 0 {
                time_sec as f64 / total_sec as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    DistributionSummary { total_sec, zones }
}
