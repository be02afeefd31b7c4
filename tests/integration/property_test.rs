//! Property tests for calculator invariants.

use proptest::prelude::*;
use trainmetrics::{MetricsCalculator, PaceZone};

const CALC: MetricsCalculator = MetricsCalculator::new();

proptest! {
    #[test]
    fn zone_ranges_are_contiguous(ftp in 1.0f64..2000.0) {
        let ranges = CALC.get_power_zone_ranges(Some(ftp)).unwrap();
        let zones: Vec<_> = ranges.iter().copied().collect();

        prop_assert_eq!(zones.len(), 7);
        prop_assert_eq!(zones[0].low, 0);
        prop_assert!(zones[6].high.is_none());
        for pair in zones.windows(2) {
            prop_assert!(pair[0].low <= pair[1].low);
            prop_assert_eq!(pair[0].high, Some(pair[1].low));
        }
    }

    #[test]
    fn zone_for_output_matches_ranges(ftp in 1.0f64..2000.0, watts in 0.0f64..5000.0) {
        let ranges = CALC.get_power_zone_ranges(Some(ftp)).unwrap();
        let zone = CALC.get_power_zone_for_output(watts, Some(&ranges), None).unwrap();
        let range = ranges.get(zone).unwrap();

        prop_assert!(watts >= f64::from(range.low));
        if let Some(high) = range.high {
            prop_assert!(watts < f64::from(high));
        }
    }

    #[test]
    fn pace_targets_strictly_ordered(level in 1u8..=10) {
        let targets = CALC.get_pace_zone_targets(Some(level)).unwrap();
        let paces: Vec<f64> = PaceZone::ALL.iter().map(|&z| targets.get(z)).collect();

        for pair in paces.windows(2) {
            prop_assert!(pair[0] > pair[1]);
        }
        prop_assert!(paces.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn intensity_factor_always_clamped(
        power in -5000.0f64..5000.0,
        ftp in -500.0f64..1000.0,
        tss in -1000.0f64..5000.0,
        duration in 0u32..100_000,
    ) {
        let results = [
            CALC.calculate_intensity_factor(Some(power), Some(ftp), None, None),
            CALC.calculate_intensity_factor(None, None, Some(tss), Some(duration)),
            CALC.calculate_intensity_factor(Some(power), Some(ftp), Some(tss), Some(duration)),
        ];
        for value in results.into_iter().flatten() {
            prop_assert!((0.0..=2.0).contains(&value));
        }
    }

    #[test]
    fn tss_monotonic_in_duration(
        power in 0.0f64..1000.0,
        ftp in 50.0f64..500.0,
        duration in 0u32..50_000,
        extra in 0u32..50_000,
    ) {
        let shorter = CALC.calculate_tss(Some(power), Some(duration), Some(ftp), None).unwrap();
        let longer = CALC.calculate_tss(Some(power), Some(duration + extra), Some(ftp), None).unwrap();
        prop_assert!(longer >= shorter);
    }

    #[test]
    fn tss_monotonic_in_power(
        power in 0.0f64..1000.0,
        extra in 0.0f64..1000.0,
        ftp in 50.0f64..500.0,
        duration in 1u32..20_000,
    ) {
        let lower = CALC.calculate_tss(Some(power), Some(duration), Some(ftp), None).unwrap();
        let higher = CALC.calculate_tss(Some(power + extra), Some(duration), Some(ftp), None).unwrap();
        prop_assert!(higher >= lower);
    }

    #[test]
    fn calculations_are_repeatable(
        power in 0.0f64..1000.0,
        ftp in 1.0f64..500.0,
        duration in 0u32..20_000,
        level in 0u8..12,
    ) {
        prop_assert_eq!(
            CALC.calculate_tss(Some(power), Some(duration), Some(ftp), None),
            CALC.calculate_tss(Some(power), Some(duration), Some(ftp), None)
        );
        prop_assert_eq!(CALC.get_power_zone_ranges(Some(ftp)), CALC.get_power_zone_ranges(Some(ftp)));
        prop_assert_eq!(CALC.get_pace_zone_targets(Some(level)), CALC.get_pace_zone_targets(Some(level)));
    }
}
