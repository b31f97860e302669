//! Configuration loading from TOML files
//!
//! Every field has a default matching the reference deployment (two GPIO
//! motion sensors, 100 ms poll, log to `room_log.txt`, dashboard on port
//! 80), so a missing file or empty section still yields a runnable config.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Display name used on the dashboard page
    #[serde(default = "default_site_name")]
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { name: default_site_name() }
    }
}

fn default_site_name() -> String {
    "doorway".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SensorsConfig {
    /// GPIO value file for the sensor on the inside of the doorway
    #[serde(default = "default_inside_path")]
    pub inside_path: String,
    /// GPIO value file for the sensor on the outside of the doorway
    #[serde(default = "default_outside_path")]
    pub outside_path: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            inside_path: default_inside_path(),
            outside_path: default_outside_path(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_inside_path() -> String {
    "/sys/class/gpio/gpio15/value".to_string()
}

fn default_outside_path() -> String {
    "/sys/class/gpio/gpio14/value".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventLogConfig {
    /// File path for the append-only event log
    #[serde(default = "default_event_log_file")]
    pub file: String,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self { file: default_event_log_file() }
    }
}

fn default_event_log_file() -> String {
    "room_log.txt".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_port")]
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { port: default_dashboard_port() }
    }
}

fn default_dashboard_port() -> u16 {
    80
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Interval for the periodic stats summary log line
    #[serde(default = "default_summary_interval_secs")]
    pub summary_interval_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { summary_interval_secs: default_summary_interval_secs() }
    }
}

fn default_summary_interval_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub sensors: SensorsConfig,
    #[serde(default)]
    pub event_log: EventLogConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_name: String,
    inside_sensor_path: String,
    outside_sensor_path: String,
    poll_interval_ms: u64,
    event_log_file: String,
    dashboard_port: u16,
    summary_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            inside_sensor_path: default_inside_path(),
            outside_sensor_path: default_outside_path(),
            poll_interval_ms: default_poll_interval_ms(),
            event_log_file: default_event_log_file(),
            dashboard_port: default_dashboard_port(),
            summary_interval_secs: default_summary_interval_secs(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_name: toml_config.site.name,
            inside_sensor_path: toml_config.sensors.inside_path,
            outside_sensor_path: toml_config.sensors.outside_path,
            poll_interval_ms: toml_config.sensors.poll_interval_ms,
            event_log_file: toml_config.event_log.file,
            dashboard_port: toml_config.dashboard.port,
            summary_interval_secs: toml_config.stats.summary_interval_secs,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "config_load_failed_using_defaults");
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn inside_sensor_path(&self) -> &str {
        &self.inside_sensor_path
    }

    pub fn outside_sensor_path(&self) -> &str {
        &self.outside_sensor_path
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
    }

    pub fn event_log_file(&self) -> &str {
        &self.event_log_file
    }

    pub fn dashboard_port(&self) -> u16 {
        self.dashboard_port
    }

    pub fn summary_interval_secs(&self) -> u64 {
        self.summary_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_name(), "doorway");
        assert_eq!(config.inside_sensor_path(), "/sys/class/gpio/gpio15/value");
        assert_eq!(config.outside_sensor_path(), "/sys/class/gpio/gpio14/value");
        assert_eq!(config.poll_interval_ms(), 100);
        assert_eq!(config.event_log_file(), "room_log.txt");
        assert_eq!(config.dashboard_port(), 80);
        assert_eq!(config.summary_interval_secs(), 60);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(toml_config.sensors.poll_interval_ms, 100);
        assert_eq!(toml_config.event_log.file, "room_log.txt");
        assert_eq!(toml_config.dashboard.port, 80);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_config: TomlConfig = toml::from_str("[dashboard]\nport = 8080\n").unwrap();
        assert_eq!(toml_config.dashboard.port, 8080);
        assert_eq!(toml_config.sensors.poll_interval_ms, 100);
        assert_eq!(toml_config.site.name, "doorway");
    }
}
