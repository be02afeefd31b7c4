//! Power zone calculations.
//!
//! Seven contiguous zones derived from FTP. Each zone is the half-open
//! interval `[low, high)` in whole watts, so a value sitting exactly on a
//! boundary belongs to the higher zone. Zone 7 has no upper bound.

use serde::{Deserialize, Serialize};

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#00c864`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Number of power zones.
pub const POWER_ZONE_COUNT: usize = 7;

/// Upper bound of zones 1-6 as a fraction of FTP. Each is also the lower
/// bound of the next zone.
pub const POWER_ZONE_UPPER_PERCENT: [f64; POWER_ZONE_COUNT - 1] =
    [0.55, 0.75, 0.90, 1.05, 1.20, 1.50];

/// Zone 7 has no upper bound and therefore no real midpoint. 175% of FTP is
/// a flat approximation, not a measured value. It is used both as the zone 7
/// weight when estimating TSS from a zone distribution and as the zone 7
/// target watts.
pub const ZONE7_ESTIMATE_PERCENT: f64 = 1.75;

/// Representative intensity of each zone as a fraction of FTP (band
/// midpoints for zones 1-6).
pub const POWER_ZONE_MIDPOINT_PERCENT: [f64; POWER_ZONE_COUNT] =
    [0.275, 0.65, 0.825, 0.975, 1.125, 1.35, ZONE7_ESTIMATE_PERCENT];

/// Zone display names.
pub const POWER_ZONE_NAMES: [&str; POWER_ZONE_COUNT] = [
    "Active Recovery",
    "Endurance",
    "Tempo",
    "Threshold",
    "VO2max",
    "Anaerobic",
    "Neuromuscular",
];

/// Default power zone colors (Coggan standard)
pub const POWER_ZONE_COLORS: [Color; POWER_ZONE_COUNT] = [
    Color::new(128, 128, 128), // Z1: Gray (Active Recovery)
    Color::new(0, 128, 255),   // Z2: Blue (Endurance)
    Color::new(0, 200, 100),   // Z3: Green (Tempo)
    Color::new(255, 200, 0),   // Z4: Yellow (Threshold)
    Color::new(255, 128, 0),   // Z5: Orange (VO2max)
    Color::new(255, 50, 50),   // Z6: Red (Anaerobic)
    Color::new(180, 0, 180),   // Z7: Purple (Neuromuscular)
];

/// All power zone numbers in ascending order.
pub const POWER_ZONES: [u8; POWER_ZONE_COUNT] = [1, 2, 3, 4, 5, 6, 7];

/// Check whether `zone` names one of the seven power zones.
pub fn is_valid_power_zone(zone: u8) -> bool {
    (1..=POWER_ZONE_COUNT as u8).contains(&zone)
}

/// Check that an FTP value can anchor zone calculations.
pub(crate) fn is_valid_ftp(ftp: f64) -> bool {
    ftp.is_finite() && ftp > 0.0
}

/// A single power zone boundary pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRange {
    /// Zone number (1-7)
    pub zone: u8,
    /// Inclusive lower bound in watts
    pub low: u32,
    /// Exclusive upper bound in watts (`None` for zone 7)
    pub high: Option<u32>,
}

impl ZoneRange {
    /// Whether `watts` falls inside `[low, high)`.
    pub fn contains(&self, watts: f64) -> bool {
        watts >= f64::from(self.low) && self.high.map_or(true, |high| watts < f64::from(high))
    }

    fn index(&self) -> Option<usize> {
        self.zone.checked_sub(1).map(usize::from)
    }

    /// Display name of this zone.
    pub fn name(&self) -> &'static str {
        self.index()
            .and_then(|idx| POWER_ZONE_NAMES.get(idx))
            .copied()
            .unwrap_or("Unknown")
    }

    /// Display color of this zone.
    pub fn color(&self) -> Color {
        self.index()
            .and_then(|idx| POWER_ZONE_COLORS.get(idx))
            .copied()
            .unwrap_or(POWER_ZONE_COLORS[0])
    }
}

/// The seven power zones for one FTP value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerZoneRanges {
    ftp: f64,
    zones: [ZoneRange; POWER_ZONE_COUNT],
}

impl PowerZoneRanges {
    /// Calculate the zone boundaries for `ftp`.
    ///
    /// Returns `None` when FTP is zero, negative or not finite.
    pub fn from_ftp(ftp: f64) -> Option<Self> {
        if !is_valid_ftp(ftp) {
            return None;
        }

        let watts = |percent: f64| (ftp * percent).round() as u32;

        let mut zones = [ZoneRange {
            zone: 0,
            low: 0,
            high: None,
        }; POWER_ZONE_COUNT];

        let mut low = 0;
        for (idx, zone) in zones.iter_mut().enumerate() {
            let high = POWER_ZONE_UPPER_PERCENT.get(idx).map(|&percent| watts(percent));
            *zone = ZoneRange {
                zone: idx as u8 + 1,
                low,
                high,
            };
            if let Some(high) = high {
                low = high;
            }
        }

        Some(Self { ftp, zones })
    }

    /// FTP these zones were derived from.
    pub fn ftp(&self) -> f64 {
        self.ftp
    }

    /// Get the zone range for a given zone number (1-7).
    pub fn get(&self, zone: u8) -> Option<&ZoneRange> {
        if !is_valid_power_zone(zone) {
            return None;
        }
        self.zones.get(usize::from(zone - 1))
    }

    /// Iterate zones from 1 to 7.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneRange> {
        self.zones.iter()
    }

    /// Get the zone for a given power value.
    ///
    /// Negative or non-finite power has no zone.
    pub fn zone_for(&self, watts: f64) -> Option<u8> {
        if !watts.is_finite() || watts < 0.0 {
            return None;
        }
        self.zones
            .iter()
            .find(|range| range.contains(watts))
            .map(|range| range.zone)
    }

    /// Representative target watts for a zone: the midpoint of its range, or
    /// [`ZONE7_ESTIMATE_PERCENT`] of FTP for the open-ended zone 7.
    pub fn target_watts(&self, zone: u8) -> Option<f64> {
        let range = self.get(zone)?;
        match range.high {
            Some(high) => Some((f64::from(range.low) + f64::from(high)) / 2.0),
            None => Some(self.ftp * ZONE7_ESTIMATE_PERCENT),
        }
    }
}
