//! Pace zone calculations for running and walking classes.
//!
//! A pace level (1-10) fixes a threshold pace in minutes per mile. The seven
//! named pace zones are fixed offsets from that threshold. Smaller paces are
//! faster.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::error::MetricsError;
use crate::metrics::zones::Color;

/// Lowest pace level.
pub const MIN_PACE_LEVEL: u8 = 1;
/// Highest pace level.
pub const MAX_PACE_LEVEL: u8 = 10;

/// Threshold (moderate) pace in minutes per mile for levels 1-10.
pub const BASE_PACE_MIN_PER_MILE: [f64; 10] = [12.0, 11.0, 10.0, 9.0, 8.5, 8.0, 7.5, 7.0, 6.5, 6.0];

/// Named pace zone, ordered from slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceZone {
    Recovery,
    Easy,
    Moderate,
    Challenging,
    Hard,
    VeryHard,
    Max,
}

impl PaceZone {
    /// All pace zones, slowest first.
    pub const ALL: [PaceZone; 7] = [
        PaceZone::Recovery,
        PaceZone::Easy,
        PaceZone::Moderate,
        PaceZone::Challenging,
        PaceZone::Hard,
        PaceZone::VeryHard,
        PaceZone::Max,
    ];

    /// Canonical snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaceZone::Recovery => "recovery",
            PaceZone::Easy => "easy",
            PaceZone::Moderate => "moderate",
            PaceZone::Challenging => "challenging",
            PaceZone::Hard => "hard",
            PaceZone::VeryHard => "very_hard",
            PaceZone::Max => "max",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaceZone::Recovery => "Recovery",
            PaceZone::Easy => "Easy",
            PaceZone::Moderate => "Moderate",
            PaceZone::Challenging => "Challenging",
            PaceZone::Hard => "Hard",
            PaceZone::VeryHard => "Very Hard",
            PaceZone::Max => "Max",
        }
    }

    /// Intensity relative to threshold pace.
    pub fn intensity_factor(&self) -> f64 {
        match self {
            PaceZone::Recovery => 0.5,
            PaceZone::Easy => 0.7,
            PaceZone::Moderate => 1.0,
            PaceZone::Challenging => 1.15,
            PaceZone::Hard => 1.3,
            PaceZone::VeryHard => 1.5,
            PaceZone::Max => 1.8,
        }
    }

    /// Offset from threshold pace in minutes per mile. Positive is slower.
    pub fn offset_min_per_mile(&self) -> f64 {
        match self {
            PaceZone::Recovery => 2.0,
            PaceZone::Easy => 1.0,
            PaceZone::Moderate => 0.0,
            PaceZone::Challenging => -0.5,
            PaceZone::Hard => -1.0,
            PaceZone::VeryHard => -1.5,
            PaceZone::Max => -2.0,
        }
    }

    /// Chart color for this zone.
    pub fn color(&self) -> Color {
        match self {
            PaceZone::Recovery => Color::new(128, 128, 128),
            PaceZone::Easy => Color::new(0, 128, 255),
            PaceZone::Moderate => Color::new(0, 200, 100),
            PaceZone::Challenging => Color::new(255, 200, 0),
            PaceZone::Hard => Color::new(255, 128, 0),
            PaceZone::VeryHard => Color::new(255, 50, 50),
            PaceZone::Max => Color::new(180, 0, 180),
        }
    }
}

impl fmt::Display for PaceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaceZone {
    type Err = MetricsError;

    /// Accepts the canonical names case-insensitively, with spaces or hyphens
    /// in place of underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        PaceZone::ALL
            .into_iter()
            .find(|zone| zone.as_str() == normalized)
            .ok_or_else(|| MetricsError::UnknownPaceZone(s.to_string()))
    }
}

/// Check whether `level` is a pace level (1-10).
pub fn is_valid_pace_level(level: u8) -> bool {
    (MIN_PACE_LEVEL..=MAX_PACE_LEVEL).contains(&level)
}

/// Threshold pace for a level, in minutes per mile.
pub fn base_pace_for_level(level: u8) -> Option<f64> {
    if !is_valid_pace_level(level) {
        return None;
    }
    BASE_PACE_MIN_PER_MILE.get(usize::from(level - 1)).copied()
}

/// Target pace per zone for one pace level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaceZoneTargets {
    level: u8,
    targets: BTreeMap<PaceZone, f64>,
}

impl PaceZoneTargets {
    /// Build targets for `level`, or `None` if the level is outside 1-10.
    pub fn from_level(level: u8) -> Option<Self> {
        let base = base_pace_for_level(level)?;
        let targets = PaceZone::ALL
            .into_iter()
            .map(|zone| (zone, (base + zone.offset_min_per_mile()).max(0.0)))
            .collect();
        Some(Self { level, targets })
    }

    /// Pace level these targets belong to.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Target pace for `zone` in minutes per mile.
    pub fn get(&self, zone: PaceZone) -> f64 {
        self.targets.get(&zone).copied().unwrap_or_default()
    }

    /// Iterate `(zone, pace)` pairs, slowest zone first.
    pub fn iter(&self) -> impl Iterator<Item = (PaceZone, f64)> + '_ {
        self.targets.iter().map(|(zone, pace)| (*zone, *pace))
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &BTreeMap<PaceZone, f64> {
        &self.targets
    }

    /// Classify an observed pace to the zone whose target is nearest.
    ///
    /// Boundaries sit halfway between adjacent targets; a pace exactly on a
    /// boundary belongs to the faster zone.
    pub fn zone_for_pace(&self, pace_min_per_mile: f64) -> Option<PaceZone> {
        if !pace_min_per_mile.is_finite() || pace_min_per_mile <= 0.0 {
            return None;
        }

        let mut best: Option<(PaceZone, f64)> = None;
        for (zone, target) in self.iter() {
            let distance = (pace_min_per_mile - target).abs();
            match best {
                Some((_, best_distance)) if distance > best_distance => {}
                _ => best = Some((zone, distance)),
            }
        }
        best.map(|(zone, _)| zone)
    }
}
