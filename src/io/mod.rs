//! IO modules - external system interfaces
//!
//! This module contains all external IO operations:
//! - `clock` - Wall-clock time source
//! - `sensors` - Motion sensor reads from GPIO value files
//! - `event_log` - Append-only crossing log on disk
//! - `dashboard` - HTTP server for the traffic dashboard page

pub mod clock;
pub mod dashboard;
pub mod event_log;
pub mod sensors;

// Re-export commonly used types
pub use clock::{Clock, SystemClock};
pub use dashboard::DashboardServer;
pub use event_log::EventLog;
pub use sensors::{GpioValueSensor, MotionSensor};
