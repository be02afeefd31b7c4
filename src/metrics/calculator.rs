//! Training load calculator.
//!
//! `MetricsCalculator` turns workout inputs (average power, FTP, duration,
//! pace level, time-in-zone) into TSS, Intensity Factor, zone boundaries
//! and zone targets. It holds no state: every method is a deterministic
//! function of its arguments, and a single instance can be shared freely
//! across threads.
//!
//! Missing or invalid input is an everyday condition (a workout recorded
//! before FTP was known, a class without a pace level) and is reported as
//! `None`, never as an error.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::metrics::distribution::{ClassType, ZoneDistributionEntry, ZoneId};
use crate::metrics::pace::{self, PaceZone, PaceZoneTargets};
use crate::metrics::zones::{
    self, is_valid_ftp, PowerZoneRanges, POWER_ZONES, POWER_ZONE_MIDPOINT_PERCENT,
};

/// Lowest Intensity Factor reported.
pub const MIN_INTENSITY_FACTOR: f64 = 0.0;
/// Highest Intensity Factor reported. Anything above comes from bad data
/// (power spikes, wrong FTP) and would inflate TSS.
pub const MAX_INTENSITY_FACTOR: f64 = 2.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Clamp an Intensity Factor into `[0.0, 2.0]`.
pub fn clamp_intensity_factor(value: f64) -> f64 {
    value.clamp(MIN_INTENSITY_FACTOR, MAX_INTENSITY_FACTOR)
}

/// TSS = hours × IF² × 100
fn tss_from_intensity(duration_seconds: u32, intensity_factor: f64) -> f64 {
    let duration_hours = f64::from(duration_seconds) / SECONDS_PER_HOUR;
    duration_hours * intensity_factor * intensity_factor * 100.0
}

/// Stateless training metrics calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Create a calculator.
    pub const fn new() -> Self {
        Self
    }

    /// Training Stress Score from average power.
    ///
    /// A stored TSS always wins. Otherwise average power, duration and a
    /// positive FTP are all required.
    pub fn calculate_tss(
        &self,
        avg_power: Option<f64>,
        duration_seconds: Option<u32>,
        ftp: Option<f64>,
        stored_tss: Option<f64>,
    ) -> Option<f64> {
        if let Some(tss) = stored_tss {
            return Some(tss);
        }

        let (avg_power, duration_seconds, ftp) = match (avg_power, duration_seconds, ftp) {
            (Some(power), Some(duration), Some(ftp)) => (power, duration, ftp),
            _ => {
                trace!("TSS unavailable: missing power, duration or FTP");
                return None;
            }
        };

        if !is_valid_ftp(ftp) || !avg_power.is_finite() {
            debug!(ftp, avg_power, "TSS unavailable: invalid FTP or power");
            return None;
        }

        let intensity_factor = clamp_intensity_factor(avg_power / ftp);
        Some(tss_from_intensity(duration_seconds, intensity_factor))
    }

    /// Intensity Factor from average power, or failing that from TSS and
    /// duration. Always within `[0.0, 2.0]`.
    pub fn calculate_intensity_factor(
        &self,
        avg_power: Option<f64>,
        ftp: Option<f64>,
        tss: Option<f64>,
        duration_seconds: Option<u32>,
    ) -> Option<f64> {
        if let (Some(power), Some(ftp)) = (avg_power, ftp) {
            if is_valid_ftp(ftp) && power.is_finite() {
                return Some(clamp_intensity_factor(power / ftp));
            }
        }

        // TSS = hours × IF² × 100  =>  IF = sqrt(TSS / (hours × 100))
        if let (Some(tss), Some(duration)) = (tss, duration_seconds) {
            if duration > 0 && tss.is_finite() {
                let duration_hours = f64::from(duration) / SECONDS_PER_HOUR;
                let intensity_factor = (tss.max(0.0) / (duration_hours * 100.0)).sqrt();
                return Some(clamp_intensity_factor(intensity_factor));
            }
        }

        trace!("Intensity factor unavailable: no usable power or TSS");
        None
    }

    /// TSS estimated from time spent in each zone.
    ///
    /// Power zone classes weight each zone by its representative percentage
    /// of FTP; pace target classes by the pace zone's intensity factor.
    /// Entries whose zone does not belong to the class type are skipped.
    pub fn calculate_tss_from_zone_distribution(
        &self,
        zone_distribution: &[ZoneDistributionEntry],
        duration_seconds: u32,
        class_type: ClassType,
        ftp: Option<f64>,
        pace_level: Option<u8>,
    ) -> Option<f64> {
        if zone_distribution.is_empty() || duration_seconds == 0 {
            trace!("Zone TSS unavailable: empty distribution or zero duration");
            return None;
        }

        let intensity_factor = match class_type {
            ClassType::PowerZone => {
                if !ftp.is_some_and(is_valid_ftp) {
                    debug!(?ftp, "Zone TSS unavailable: power zone class without valid FTP");
                    return None;
                }
                weighted_intensity(zone_distribution, power_zone_weight)?
            }
            ClassType::PaceTarget => {
                if !pace_level.is_some_and(pace::is_valid_pace_level) {
                    debug!(?pace_level, "Zone TSS unavailable: pace class without valid level");
                    return None;
                }
                weighted_intensity(zone_distribution, pace_zone_weight)?
            }
        };

        Some(tss_from_intensity(duration_seconds, intensity_factor))
    }

    /// Power zone boundaries for `ftp`.
    pub fn get_power_zone_ranges(&self, ftp: Option<f64>) -> Option<PowerZoneRanges> {
        PowerZoneRanges::from_ftp(ftp?)
    }

    /// Zone (1-7) containing `output_watts`, using `zone_ranges` if given or
    /// deriving them from `ftp`.
    pub fn get_power_zone_for_output(
        &self,
        output_watts: f64,
        zone_ranges: Option<&PowerZoneRanges>,
        ftp: Option<f64>,
    ) -> Option<u8> {
        resolve_ranges(zone_ranges, ftp)?.zone_for(output_watts)
    }

    /// Target watts for a zone: the range midpoint, or the flat zone 7
    /// estimate.
    pub fn get_target_watts_for_zone(
        &self,
        zone_num: u8,
        zone_ranges: Option<&PowerZoneRanges>,
        ftp: Option<f64>,
    ) -> Option<f64> {
        if !zones::is_valid_power_zone(zone_num) {
            return None;
        }
        resolve_ranges(zone_ranges, ftp)?.target_watts(zone_num)
    }

    /// Zone numbers 1-7 when FTP is usable.
    pub fn get_available_power_zones(&self, ftp: Option<f64>) -> Option<Vec<u8>> {
        ftp.filter(|&ftp| is_valid_ftp(ftp))
            .map(|_| POWER_ZONES.to_vec())
    }

    /// Whether `zone` is one of the power zones 1-7.
    pub fn is_valid_power_zone(&self, zone: u8) -> bool {
        zones::is_valid_power_zone(zone)
    }

    /// Target pace per zone (minutes per mile) for a pace level.
    pub fn get_pace_zone_targets(&self, pace_level: Option<u8>) -> Option<PaceZoneTargets> {
        PaceZoneTargets::from_level(pace_level?)
    }

    /// The seven pace zones, slowest first.
    pub fn get_available_pace_zones(&self) -> Vec<PaceZone> {
        PaceZone::ALL.to_vec()
    }

    /// Whether `level` is a pace level between 1 and 10.
    pub fn is_valid_pace_level(&self, level: u8) -> bool {
        pace::is_valid_pace_level(level)
    }
}

fn resolve_ranges(
    zone_ranges: Option<&PowerZoneRanges>,
    ftp: Option<f64>,
) -> Option<Cow<'_, PowerZoneRanges>> {
    match zone_ranges {
        Some(ranges) => Some(Cow::Borrowed(ranges)),
        None => PowerZoneRanges::from_ftp(ftp?).map(Cow::Owned),
    }
}

fn power_zone_weight(zone: ZoneId) -> Option<f64> {
    match zone {
        ZoneId::Power(n) if zones::is_valid_power_zone(n) => {
            POWER_ZONE_MIDPOINT_PERCENT.get(usize::from(n - 1)).copied()
        }
        _ => None,
    }
}

fn pace_zone_weight(zone: ZoneId) -> Option<f64> {
    match zone {
        ZoneId::Pace(zone) => Some(zone.intensity_factor()),
        ZoneId::Power(_) => None,
    }
}

/// Time-weighted mean intensity over the recognised entries, clamped.
fn weighted_intensity<F>(entries: &[ZoneDistributionEntry], weight: F) -> Option<f64>
where
    F: Fn(ZoneId) -> Option<f64>,
{
    let mut weighted_sum = 0.0;
    let mut total_seconds = 0.0;

    for entry in entries {
        match weight(entry.zone) {
            Some(w) => {
                let seconds = f64::from(entry.time_sec);
                weighted_sum += seconds * w;
                total_seconds += seconds;
            }
            None => trace!(zone = %entry.zone, "Skipping zone not valid for class type"),
        }
    }

    if total_seconds <= 0.0 {
        return None;
    }

    Some(clamp_intensity_factor(weighted_sum / total_seconds))
}
