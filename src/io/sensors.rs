//! Motion sensor inputs
//!
//! The production sensor reads an exported GPIO value file, the `0`/`1`
//! interface the kernel exposes for pins. Read failures are transient as
//! far as the sampler is concerned: it skips the tick and tries again on
//! the next one.

use anyhow::Context;
use std::fs;
use std::path::PathBuf;

/// One motion sensor, bound to a single physical input
pub trait MotionSensor: Send {
    /// Current reading: true while motion is detected
    fn read(&mut self) -> anyhow::Result<bool>;
}

/// Sensor backed by a GPIO value file
pub struct GpioValueSensor {
    path: PathBuf,
}

impl GpioValueSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MotionSensor for GpioValueSensor {
    fn read(&mut self) -> anyhow::Result<bool> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read sensor value {}", self.path.display()))?;
        match raw.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            other => {
                anyhow::bail!("unexpected sensor value {:?} in {}", other, self.path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn value_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_low() {
        let file = value_file("0\n");
        let mut sensor = GpioValueSensor::new(file.path());
        assert!(!sensor.read().unwrap());
    }

    #[test]
    fn test_reads_high() {
        let file = value_file("1\n");
        let mut sensor = GpioValueSensor::new(file.path());
        assert!(sensor.read().unwrap());
    }

    #[test]
    fn test_rejects_garbage_value() {
        let file = value_file("on\n");
        let mut sensor = GpioValueSensor::new(file.path());
        assert!(sensor.read().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut sensor = GpioValueSensor::new("/nonexistent/gpio/value");
        assert!(sensor.read().is_err());
    }

    #[test]
    fn test_rereads_current_value() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"0\n").unwrap();
        file.flush().unwrap();

        let mut sensor = GpioValueSensor::new(file.path());
        assert!(!sensor.read().unwrap());

        // Overwrite in place, as the kernel does for value files.
        fs::write(file.path(), b"1\n").unwrap();
        assert!(sensor.read().unwrap());
    }
}
