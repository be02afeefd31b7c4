//! End-to-end flows through the public API.
//!
//! Tests the flow a workout detail page goes through:
//! 1. Derive zone ranges from the FTP active on the workout date
//! 2. Fold the power series into time-in-zone
//! 3. Estimate TSS from the distribution and compare with average power TSS
//! 4. Build the chart target line for the class plan

use trainmetrics::metrics::distribution::power_zone_distribution;
use trainmetrics::metrics::targets::{target_line, ClassSegment, TargetValue};
use trainmetrics::{ClassType, MetricsCalculator, ZoneId};

/// Class plan: warm-up Z2, 3 x 5 min Z4 with Z1 recovery, cool-down Z1.
fn class_plan() -> Vec<ClassSegment> {
    let mut segments = vec![ClassSegment {
        start_offset: 0,
        length: 600,
        zone: ZoneId::Power(2),
    }];
    let mut offset = 600;
    for _ in 0..3 {
        segments.push(ClassSegment {
            start_offset: offset,
            length: 300,
            zone: ZoneId::Power(4),
        });
        segments.push(ClassSegment {
            start_offset: offset + 300,
            length: 180,
            zone: ZoneId::Power(1),
        });
        offset += 480;
    }
    segments.push(ClassSegment {
        start_offset: offset,
        length: 3600 - offset,
        zone: ZoneId::Power(1),
    });
    segments
}

/// Rider follows the target line exactly, one sample per second.
fn follow_plan(calc: &MetricsCalculator, ftp: f64, plan: &[ClassSegment]) -> Vec<f64> {
    let mut samples = Vec::new();
    for segment in plan {
        let ZoneId::Power(zone) = segment.zone else {
            continue;
        };
        let watts = calc.get_target_watts_for_zone(zone, None, Some(ftp)).unwrap();
        samples.extend(std::iter::repeat(watts).take(segment.length as usize));
    }
    samples
}

#[test]
fn test_power_class_pipeline() {
    let calc = MetricsCalculator::new();
    let ftp = 240.0;
    let plan = class_plan();
    let samples = follow_plan(&calc, ftp, &plan);
    assert_eq!(samples.len(), 3600);

    let ranges = calc.get_power_zone_ranges(Some(ftp)).unwrap();
    let dist = power_zone_distribution(&samples, 1, &ranges);
    let total: u32 = dist.iter().map(|e| e.time_sec).sum();
    assert_eq!(total, 3600);

    let zone_tss = calc
        .calculate_tss_from_zone_distribution(&dist, 3600, ClassType::PowerZone, Some(ftp), None)
        .unwrap();

    let avg_power = samples.iter().sum::<f64>() / samples.len() as f64;
    let avg_tss = calc.calculate_tss(Some(avg_power), Some(3600), Some(ftp), None).unwrap();

    // Zone weights are band midpoints, so a rider holding midpoint targets
    // gets the same intensity either way.
    assert!((zone_tss - avg_tss).abs() < 2.0, "zone {zone_tss} vs avg {avg_tss}");

    let line = target_line(&plan, Some(ftp), None);
    assert_eq!(line.len(), plan.len() * 2);
    assert_eq!(line.first().unwrap().offset, 0);
    assert_eq!(line.last().unwrap().offset, 3600);
    for point in &line {
        assert!(matches!(point.target, TargetValue::Watts(_)));
    }
}

#[test]
fn test_missing_ftp_degrades_to_none() {
    let calc = MetricsCalculator::new();
    let plan = class_plan();

    assert!(calc.get_power_zone_ranges(None).is_none());
    assert!(calc.get_available_power_zones(None).is_none());
    assert!(target_line(&plan, None, None).is_empty());
    assert_eq!(calc.calculate_tss(Some(180.0), Some(3600), None, None), None);
}
