//! Shared traffic counters and snapshotting
//!
//! All counters live behind a single mutex so a dashboard snapshot can
//! never observe a half-applied update. An update is a handful of integer
//! increments and the only writer is the sampling loop, so the critical
//! sections stay short.

use crate::domain::types::{Direction, DoorEvent};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Default)]
struct Counters {
    /// Entries since the last date change
    daily_entries: u64,
    /// Exits since the last date change
    daily_exits: u64,
    /// Entries for the process lifetime (monotonic)
    total_entries: u64,
    /// Exits for the process lifetime (monotonic)
    total_exits: u64,
    /// Entries keyed by hour of day (0-23), lifetime cumulative
    entries_per_hour: BTreeMap<u8, u64>,
    /// Calendar date of the last recorded event
    current_day: Option<(u16, u8, u8)>,
}

/// Traffic counter set shared between the sampler and the dashboard
pub struct TrafficStats {
    inner: Mutex<Counters>,
}

impl TrafficStats {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Counters::default()) }
    }

    /// Apply one classified event.
    ///
    /// Daily counters reset when the event's calendar date differs from the
    /// previous event's. Totals and the hour histogram never reset, which
    /// keeps `total_entries` equal to the histogram sum at all times.
    pub fn record(&self, event: &DoorEvent) {
        let mut inner = self.inner.lock();

        let day = event.stamp.day_key();
        if inner.current_day != Some(day) {
            if inner.current_day.is_some() {
                info!(
                    daily_entries = %inner.daily_entries,
                    daily_exits = %inner.daily_exits,
                    "daily_counters_reset"
                );
            }
            inner.daily_entries = 0;
            inner.daily_exits = 0;
            inner.current_day = Some(day);
        }

        match event.direction {
            Direction::Entry => {
                inner.daily_entries += 1;
                inner.total_entries += 1;
                *inner.entries_per_hour.entry(event.hour()).or_insert(0) += 1;
            }
            Direction::Exit => {
                inner.daily_exits += 1;
                inner.total_exits += 1;
            }
        }
    }

    /// Take a consistent copy of every counter
    pub fn snapshot(&self) -> StatsSnapshot {
        let inner = self.inner.lock();
        StatsSnapshot {
            daily_entries: inner.daily_entries,
            daily_exits: inner.daily_exits,
            total_entries: inner.total_entries,
            total_exits: inner.total_exits,
            entries_per_hour: inner.entries_per_hour.clone(),
            current_day: inner.current_day,
        }
    }
}

impl Default for TrafficStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the traffic counters
#[derive(Debug, Clone)]
pub struct StatsSnapshot {
    pub daily_entries: u64,
    pub daily_exits: u64,
    pub total_entries: u64,
    pub total_exits: u64,
    pub entries_per_hour: BTreeMap<u8, u64>,
    pub current_day: Option<(u16, u8, u8)>,
}

impl StatsSnapshot {
    /// Hours of the day that saw at least one entry
    pub fn distinct_hours(&self) -> usize {
        self.entries_per_hour.len()
    }

    /// Entries per active hour; the divisor clamps to 1 so an empty day
    /// reads as zero instead of dividing by zero
    pub fn entries_hourly_avg(&self) -> f64 {
        self.total_entries as f64 / self.distinct_hours().max(1) as f64
    }

    /// Exits per active hour, over the same divisor as entries
    pub fn exits_hourly_avg(&self) -> f64 {
        self.total_exits as f64 / self.distinct_hours().max(1) as f64
    }

    pub fn log(&self) {
        info!(
            daily_entries = %self.daily_entries,
            daily_exits = %self.daily_exits,
            total_entries = %self.total_entries,
            total_exits = %self.total_exits,
            active_hours = %self.distinct_hours(),
            "traffic_stats"
        );
    }
}
