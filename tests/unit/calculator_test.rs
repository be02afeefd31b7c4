//! Unit tests for TSS and Intensity Factor.

use trainmetrics::{ClassType, MetricsCalculator, PaceZone, ZoneDistributionEntry};

#[test]
fn test_tss_scenario_average_power() {
    let calc = MetricsCalculator::new();

    let intensity = calc
        .calculate_intensity_factor(Some(200.0), Some(280.0), None, None)
        .unwrap();
    assert!((intensity - 0.7143).abs() < 1e-4);

    let tss = calc
        .calculate_tss(Some(200.0), Some(3600), Some(280.0), None)
        .unwrap();
    assert!((tss - 51.0).abs() < 0.5);
}

#[test]
fn test_tss_stored_value_returned_exactly() {
    let tss = MetricsCalculator::new().calculate_tss(None, Some(3600), Some(280.0), Some(75.5));
    assert_eq!(tss, Some(75.5));
}

#[test]
fn test_tss_nothing_known() {
    assert_eq!(MetricsCalculator::new().calculate_tss(None, None, None, None), None);
}

#[test]
fn test_tss_scales_with_duration() {
    let calc = MetricsCalculator::new();

    let half = calc.calculate_tss(Some(250.0), Some(1800), Some(250.0), None).unwrap();
    let full = calc.calculate_tss(Some(250.0), Some(3600), Some(250.0), None).unwrap();

    assert!((half - 50.0).abs() < 1e-9);
    assert!((full - 100.0).abs() < 1e-9);
}

#[test]
fn test_tss_and_if_round_trip() {
    let calc = MetricsCalculator::new();

    let tss = calc.calculate_tss(Some(230.0), Some(5400), Some(260.0), None).unwrap();
    let intensity = calc
        .calculate_intensity_factor(None, None, Some(tss), Some(5400))
        .unwrap();

    assert!((intensity - 230.0 / 260.0).abs() < 1e-9);
}

#[test]
fn test_zone_distribution_pace_scenario() {
    let dist = [
        ZoneDistributionEntry::pace(PaceZone::Recovery, 300),
        ZoneDistributionEntry::pace(PaceZone::Moderate, 3000),
        ZoneDistributionEntry::pace(PaceZone::Hard, 300),
    ];

    let tss = MetricsCalculator::new()
        .calculate_tss_from_zone_distribution(&dist, 3600, ClassType::PaceTarget, None, Some(5))
        .unwrap();

    // IF = (300×0.5 + 3000×1.0 + 300×1.3) / 3600 ≈ 0.983
    assert!((tss - 96.7).abs() < 1.0);
}

#[test]
fn test_zone_distribution_empty() {
    let tss = MetricsCalculator::new().calculate_tss_from_zone_distribution(
        &[],
        3600,
        ClassType::PowerZone,
        Some(280.0),
        None,
    );
    assert_eq!(tss, None);
}

#[test]
fn test_zone_distribution_power_needs_ftp() {
    let dist = [
        ZoneDistributionEntry::power(2, 1200),
        ZoneDistributionEntry::power(3, 1200),
    ];

    let tss = MetricsCalculator::new().calculate_tss_from_zone_distribution(
        &dist,
        3600,
        ClassType::PowerZone,
        None,
        None,
    );
    assert_eq!(tss, None);
}

#[test]
fn test_zone_distribution_all_zone7() {
    // Z7 weight is 1.75, under the 2.0 clamp
    let dist = [ZoneDistributionEntry::power(7, 60)];

    let tss = MetricsCalculator::new()
        .calculate_tss_from_zone_distribution(&dist, 3600, ClassType::PowerZone, Some(300.0), None)
        .unwrap();
    assert!((tss - 1.75 * 1.75 * 100.0).abs() < 1e-9);
}

#[test]
fn test_zone_distribution_uses_workout_duration() {
    // Zone time covers only part of the workout; TSS scales with full duration
    let dist = [ZoneDistributionEntry::pace(PaceZone::Moderate, 600)];

    let tss = MetricsCalculator::new()
        .calculate_tss_from_zone_distribution(&dist, 1800, ClassType::PaceTarget, None, Some(3))
        .unwrap();
    assert!((tss - 50.0).abs() < 1e-9);
}
