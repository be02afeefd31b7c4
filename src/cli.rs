//! Command line interface.
//!
//! Thin wrapper over `MetricsCalculator`. FTP and pace level fall back to
//! the values stored in the config file when not given on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use trainmetrics::metrics::distribution::{parse_zone_distribution, summarize};
use trainmetrics::metrics::targets::{target_line, ClassSegment, TargetValue};
use trainmetrics::storage::config::{load_config, load_config_from, AppConfig};
use trainmetrics::{ClassType, MetricsCalculator};

const NOT_AVAILABLE: &str = "not available";

#[derive(Parser)]
#[command(name = "trainmetrics")]
#[command(about = "Training load and zone calculations", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "TRAINMETRICS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show power zones for an FTP
    Zones {
        /// FTP in watts
        #[arg(long)]
        ftp: Option<f64>,

        /// Classify this power output
        #[arg(long)]
        watts: Option<f64>,
    },

    /// Show pace zone targets for a pace level
    Pace {
        /// Pace level (1-10)
        #[arg(long)]
        level: Option<u8>,

        /// Classify this pace (min/mile)
        #[arg(long)]
        pace: Option<f64>,
    },

    /// Calculate Training Stress Score
    Tss {
        /// Average power in watts
        #[arg(long)]
        avg_power: Option<f64>,

        /// Duration in seconds
        #[arg(long)]
        duration: Option<u32>,

        /// FTP in watts
        #[arg(long)]
        ftp: Option<f64>,

        /// Previously stored TSS (returned as is)
        #[arg(long)]
        stored: Option<f64>,
    },

    /// Calculate Intensity Factor
    #[command(name = "if")]
    Intensity {
        /// Average power in watts
        #[arg(long)]
        avg_power: Option<f64>,

        /// FTP in watts
        #[arg(long)]
        ftp: Option<f64>,

        /// Training Stress Score
        #[arg(long)]
        tss: Option<f64>,

        /// Duration in seconds
        #[arg(long)]
        duration: Option<u32>,
    },

    /// Estimate TSS from a JSON time-in-zone file
    Distribution(DistributionArgs),

    /// Build a chart target line from a JSON segment file
    Targets {
        /// JSON array of {"start_offset": .., "length": .., "zone": ..}
        file: PathBuf,

        /// FTP in watts
        #[arg(long)]
        ftp: Option<f64>,

        /// Pace level (1-10)
        #[arg(long)]
        level: Option<u8>,
    },
}

#[derive(Args)]
struct DistributionArgs {
    /// JSON array of {"zone": .., "time_sec": ..}
    file: PathBuf,

    /// power_zone or pace_target
    #[arg(long)]
    class_type: ClassType,

    /// Workout duration in seconds
    #[arg(long)]
    duration: u32,

    /// FTP in watts
    #[arg(long)]
    ftp: Option<f64>,

    /// Pace level (1-10)
    #[arg(long)]
    level: Option<u8>,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let rendered = self.run()?;
        println!("{rendered}");
        Ok(())
    }

    /// Run the command and render its output as text or JSON.
    fn run(self) -> Result<String> {
        let config = match &self.config {
            Some(path) => load_config_from(path),
            None => load_config(),
        }
        .context("Failed to load configuration")?;

        let output = Output {
            json: self.json || config.display.json,
            decimals: config.display.decimals,
        };
        let calc = MetricsCalculator::new();

        match self.command {
            Commands::Zones { ftp, watts } => zones(&calc, &output, ftp.or(config.athlete.ftp), watts),
            Commands::Pace { level, pace } => {
                pace_zones(&calc, &output, level.or(config.athlete.pace_level), pace)
            }
            Commands::Tss {
                avg_power,
                duration,
                ftp,
                stored,
            } => {
                let tss = calc.calculate_tss(avg_power, duration, ftp.or(config.athlete.ftp), stored);
                output.scalar("tss", tss)
            }
            Commands::Intensity {
                avg_power,
                ftp,
                tss,
                duration,
            } => {
                let intensity = calc.calculate_intensity_factor(
                    avg_power,
                    ftp.or(config.athlete.ftp),
                    tss,
                    duration,
                );
                output.scalar("intensity_factor", intensity)
            }
            Commands::Distribution(args) => distribution(&calc, &output, &config, &args),
            Commands::Targets { file, ftp, level } => {
                let content = read_file(&file)?;
                let segments: Vec<ClassSegment> =
                    serde_json::from_str(&content).context("Invalid segment file")?;
                let line = target_line(
                    &segments,
                    ftp.or(config.athlete.ftp),
                    level.or(config.athlete.pace_level),
                );
                output.emit(&line, || {
                    line.iter()
                        .map(|point| match point.target {
                            TargetValue::Watts(w) => format!("{:>6}s  {:.0} W", point.offset, w),
                            TargetValue::MinPerMile(p) => {
                                format!("{:>6}s  {} min/mi", point.offset, output.number(p))
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
        }
    }
}

struct Output {
    json: bool,
    decimals: usize,
}

impl Output {
    fn number(&self, value: f64) -> String {
        format!("{:.*}", self.decimals, value)
    }

    fn emit<T, F>(&self, value: &T, text: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce() -> String,
    {
        if self.json {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(text())
        }
    }

    fn scalar(&self, name: &str, value: Option<f64>) -> Result<String> {
        self.emit(&json!({ name: value }), || match value {
            Some(v) => format!("{name}: {}", self.number(v)),
            None => format!("{name}: {NOT_AVAILABLE}"),
        })
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn zones(
    calc: &MetricsCalculator,
    output: &Output,
    ftp: Option<f64>,
    watts: Option<f64>,
) -> Result<String> {
    let Some(ranges) = calc.get_power_zone_ranges(ftp) else {
        return output.emit(&json!({ "zones": null }), || format!("Power zones: {NOT_AVAILABLE} (no FTP)"));
    };

    let zone = watts.and_then(|w| calc.get_power_zone_for_output(w, Some(&ranges), None));

    output.emit(&json!({ "ranges": ranges, "zone": zone }), || {
        let mut lines = vec![format!("Power zones for FTP {:.0} W", ranges.ftp())];
        for range in ranges.iter() {
            let high = range
                .high
                .map(|h| format!("{h} W"))
                .unwrap_or_else(|| "+".to_string());
            let target = calc
                .get_target_watts_for_zone(range.zone, Some(&ranges), None)
                .map(|t| format!("{t:.0} W"))
                .unwrap_or_default();
            lines.push(format!(
                "  Z{} {:<16} {:>5} W - {:<7} target {}",
                range.zone,
                range.name(),
                range.low,
                high,
                target
            ));
        }
        if let Some(w) = watts {
            match zone {
                Some(z) => lines.push(format!("{w:.0} W is in zone {z}")),
                None => lines.push(format!("{w:.0} W: zone {NOT_AVAILABLE}")),
            }
        }
        lines.join("\n")
    })
}

fn pace_zones(
    calc: &MetricsCalculator,
    output: &Output,
    level: Option<u8>,
    pace: Option<f64>,
) -> Result<String> {
    let Some(targets) = calc.get_pace_zone_targets(level) else {
        return output.emit(&json!({ "targets": null }), || {
            format!("Pace zones: {NOT_AVAILABLE} (no valid pace level)")
        });
    };

    let zone = pace.and_then(|p| targets.zone_for_pace(p));

    output.emit(&json!({ "targets": targets, "zone": zone }), || {
        let mut lines = vec![format!("Pace targets for level {}", targets.level())];
        for (zone, target) in targets.iter() {
            lines.push(format!("  {:<12} {} min/mi", zone.label(), output.number(target)));
        }
        if let (Some(p), Some(z)) = (pace, zone) {
            lines.push(format!("{} min/mi is {}", output.number(p), z.label()));
        }
        lines.join("\n")
    })
}

fn distribution(
    calc: &MetricsCalculator,
    output: &Output,
    config: &AppConfig,
    args: &DistributionArgs,
) -> Result<String> {
    let content = read_file(&args.file)?;
    let entries = parse_zone_distribution(&content).context("Invalid zone distribution")?;

    let class_type = args.class_type;
    let tss = calc.calculate_tss_from_zone_distribution(
        &entries,
        args.duration,
        class_type,
        args.ftp.or(config.athlete.ftp),
        args.level.or(config.athlete.pace_level),
    );
    let summary = summarize(&entries);

    output.emit(&json!({ "tss": tss, "summary": summary }), || {
        let mut lines = vec![format!(
            "{} class, {} s in zones",
            class_type, summary.total_sec
        )];
        for share in &summary.zones {
            lines.push(format!(
                "  {:<12} {:>6} s  {:>5.1}%",
                share.zone.to_string(),
                share.time_sec,
                share.percent
            ));
        }
        lines.push(match tss {
            Some(v) => format!("tss: {}", output.number(v)),
            None => format!("tss: {NOT_AVAILABLE}"),
        });
        lines.join("\n")
    })
}
