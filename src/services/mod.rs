//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `direction` - Direction disambiguation from paired motion sensors
//! - `sampler` - Fixed-cadence sensor polling loop

pub mod direction;
pub mod sampler;

// Re-export commonly used types
pub use direction::DirectionDetector;
pub use sampler::Sampler;
