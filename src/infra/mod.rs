//! Infrastructure - configuration and shared statistics
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `stats` - Shared traffic counters and snapshots

pub mod config;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use stats::{StatsSnapshot, TrafficStats};
