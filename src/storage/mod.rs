//! Storage module for configuration.

pub mod config;

pub use config::{AppConfig, AthleteSettings, ConfigError, DisplaySettings};
