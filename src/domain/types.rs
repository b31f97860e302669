//! Shared types for the doorway traffic counter

/// Direction of travel through the doorway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entry,
    Exit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Entry => "Entry",
            Direction::Exit => "Exit",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reading from the clock source
///
/// Weekday is carried through from the clock interface but nothing
/// downstream consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockReading {
    /// Format as `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Calendar date portion, used for daily counter rollover
    #[inline]
    pub fn day_key(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

/// A classified doorway crossing
#[derive(Debug, Clone)]
pub struct DoorEvent {
    pub direction: Direction,
    pub stamp: ClockReading,
}

impl DoorEvent {
    pub fn new(direction: Direction, stamp: ClockReading) -> Self {
        Self { direction, stamp }
    }

    #[inline]
    pub fn hour(&self) -> u8 {
        self.stamp.hour
    }

    pub fn timestamp(&self) -> String {
        self.stamp.timestamp()
    }

    /// Render the line written to the event log
    pub fn log_line(&self) -> String {
        format!("{} - {}", self.stamp.timestamp(), self.direction.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> ClockReading {
        ClockReading { year: 2024, month: 3, day: 7, weekday: 3, hour: 9, minute: 5, second: 2 }
    }

    #[test]
    fn test_direction_as_str() {
        assert_eq!(Direction::Entry.as_str(), "Entry");
        assert_eq!(Direction::Exit.as_str(), "Exit");
    }

    #[test]
    fn test_timestamp_zero_padded() {
        assert_eq!(reading().timestamp(), "2024-03-07 09:05:02");
    }

    #[test]
    fn test_day_key() {
        assert_eq!(reading().day_key(), (2024, 3, 7));
    }

    #[test]
    fn test_log_line_format() {
        let event = DoorEvent::new(Direction::Entry, reading());
        assert_eq!(event.log_line(), "2024-03-07 09:05:02 - Entry");

        let event = DoorEvent::new(Direction::Exit, reading());
        assert_eq!(event.log_line(), "2024-03-07 09:05:02 - Exit");
    }
}
