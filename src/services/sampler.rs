//! Fixed-cadence sensor sampling loop
//!
//! Polls both motion sensors every tick, feeds the pair to the direction
//! detector, and fans each classified event out to the event log and the
//! shared counters. A failed clock or sensor read skips the tick; a failed
//! log write still counts the event. The cadence itself never stops.

use crate::domain::types::DoorEvent;
use crate::infra::stats::TrafficStats;
use crate::io::clock::Clock;
use crate::io::event_log::EventLog;
use crate::io::sensors::MotionSensor;
use crate::services::direction::DirectionDetector;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

pub struct Sampler<C, S> {
    clock: C,
    inside: S,
    outside: S,
    detector: DirectionDetector,
    event_log: EventLog,
    stats: Arc<TrafficStats>,
    poll_interval: Duration,
}

impl<C: Clock, S: MotionSensor> Sampler<C, S> {
    pub fn new(
        clock: C,
        inside: S,
        outside: S,
        event_log: EventLog,
        stats: Arc<TrafficStats>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clock,
            inside,
            outside,
            detector: DirectionDetector::new(),
            event_log,
            stats,
            poll_interval,
        }
    }

    /// One sampling tick; returns the event it classified, if any.
    ///
    /// The timestamp is read before the sensors so the event carries the
    /// time of the tick that observed the edge. Stale or guessed values
    /// never reach the detector: any read failure skips the whole tick.
    fn tick(&mut self) -> Option<DoorEvent> {
        let stamp = match self.clock.now() {
            Ok(stamp) => stamp,
            Err(e) => {
                warn!(error = %e, "clock_read_failed");
                return None;
            }
        };

        let inside_raw = match self.inside.read() {
            Ok(v) => v,
            Err(e) => {
                warn!(side = "inside", error = %e, "sensor_read_failed");
                return None;
            }
        };
        let outside_raw = match self.outside.read() {
            Ok(v) => v,
            Err(e) => {
                warn!(side = "outside", error = %e, "sensor_read_failed");
                return None;
            }
        };

        let direction = self.detector.step(inside_raw, outside_raw)?;
        let event = DoorEvent::new(direction, stamp);

        info!(
            direction = %event.direction,
            timestamp = %event.timestamp(),
            "crossing_detected"
        );

        // The log write reports its own failure; counters move regardless.
        self.event_log.record(&event);
        self.stats.record(&event);

        Some(event)
    }

    /// Start the sampling loop
    pub async fn run(mut self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        info!(poll_interval_ms = %self.poll_interval.as_millis(), "sampler_started");

        let mut poll_timer = interval(self.poll_interval);

        loop {
            // Check for shutdown signal
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("sampler_shutdown");
                        return;
                    }
                }
                _ = poll_timer.tick() => {}
            }

            self.tick();
        }
    }
}
