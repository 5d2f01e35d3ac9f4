//! Per-round reaction measurement

use std::time::Duration;

/// What a round recorded. Timestamps are readings of the engine's monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    /// Lights-out instant
    pub start_time: Option<Duration>,
    /// Lights-out to qualifying input
    pub reaction_time: Option<Duration>,
    /// Input arrived before lights out
    pub jump_start: bool,
}

impl Measurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lights-out instant in milliseconds
    pub fn start_ms(&self) -> Option<f64> {
        self.start_time.map(duration_ms)
    }

    /// Reaction time in milliseconds
    pub fn reaction_ms(&self) -> Option<f64> {
        self.reaction_time.map(duration_ms)
    }

    /// Instant of the qualifying input in milliseconds
    pub fn end_ms(&self) -> Option<f64> {
        match (self.start_time, self.reaction_time) {
            (Some(start), Some(reaction)) => Some(duration_ms(start + reaction)),
            _ => None,
        }
    }

    /// A valid, submittable result
    pub fn is_valid(&self) -> bool {
        !self.jump_start && self.reaction_time.is_some()
    }
}

/// Duration as fractional milliseconds
pub fn duration_ms(d: Duration) -> f64 {
    // Whole seconds and sub-second nanos separately, so exact millisecond
    // values stay exact
    d.as_secs() as f64 * 1000.0 + f64::from(d.subsec_nanos()) / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_measurement_is_empty() {
        let m = Measurement::new();
        assert_eq!(m.start_ms(), None);
        assert_eq!(m.reaction_ms(), None);
        assert!(!m.jump_start);
        assert!(!m.is_valid());
    }

    #[test]
    fn test_end_is_start_plus_reaction() {
        let m = Measurement {
            start_time: Some(Duration::from_millis(7_000)),
            reaction_time: Some(Duration::from_micros(215_500)),
            jump_start: false,
        };
        assert!((m.end_ms().unwrap() - 7_215.5).abs() < 1e-9);
        assert!(m.is_valid());
    }

    #[test]
    fn test_jump_start_is_never_valid() {
        let m = Measurement {
            start_time: None,
            reaction_time: None,
            jump_start: true,
        };
        assert!(!m.is_valid());
        assert_eq!(m.end_ms(), None);
    }
}
