//! Domain models - core types for doorway traffic counting
//!
//! This module contains the canonical data types used throughout the system:
//! - `Direction` - classified travel direction (entry vs. exit)
//! - `ClockReading` - one date/time sample from the clock source
//! - `DoorEvent` - a classified doorway crossing with its timestamp

pub mod types;

// Re-export commonly used types at module level
pub use types::{ClockReading, Direction, DoorEvent};
