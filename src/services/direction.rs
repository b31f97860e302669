//! Direction classification for doorway crossings
//!
//! Each sensor side latches on its rising edge and stays latched while its
//! raw signal is high. Direction is decided by which side trips first:
//! - inside trips while outside is idle -> Entry
//! - outside trips while inside is idle -> Exit
//! - a side tripping while the other is already latched is the tail end of
//!   a crossing in progress; it consumes the other latch and emits nothing
//!
//! The inside side is evaluated before the outside side within a tick, and
//! the outside checks see latch state already updated by the inside checks.
//! Changing that order changes which event a simultaneous trip produces, so
//! it is part of the contract.

use crate::domain::types::Direction;

/// Classifies raw sensor pairs into entry/exit events, one tick at a time
pub struct DirectionDetector {
    inside_active: bool,
    outside_active: bool,
}

impl DirectionDetector {
    pub fn new() -> Self {
        Self { inside_active: false, outside_active: false }
    }

    /// Feed one sampled sensor pair; returns at most one classified event.
    ///
    /// Falling edges only release latches and never emit.
    pub fn step(&mut self, inside_raw: bool, outside_raw: bool) -> Option<Direction> {
        let mut emitted = None;

        if inside_raw && !self.inside_active {
            self.inside_active = true;
            if !self.outside_active {
                emitted = Some(Direction::Entry);
            } else {
                self.outside_active = false;
            }
        } else if !inside_raw && self.inside_active {
            self.inside_active = false;
        }

        if outside_raw && !self.outside_active {
            self.outside_active = true;
            if !self.inside_active {
                emitted = Some(Direction::Exit);
            } else {
                self.inside_active = false;
            }
        } else if !outside_raw && self.outside_active {
            self.outside_active = false;
        }

        emitted
    }
}

impl Default for DirectionDetector {
    fn default() -> Self {
        Self::new()
    }
}
