//! Output structures for the presentation layer

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::LIGHT_COUNT;
use crate::types::{GameState, ReasonCode};

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    StateChanged { from: GameState, to: GameState },
    LightOn { index: usize },
    /// Random pause before lights out has been drawn
    StimulusArmed { delay_ms: f64 },
    LightsOut,
}

/// Output structure for each engine step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Wall-clock timestamp (display only; measurements use the monotonic clock)
    pub timestamp: DateTime<Utc>,
    /// Round counter, bumps on every start
    pub round: u64,
    /// Current state
    pub state: GameState,
    /// Board after the step
    pub lights: [bool; LIGHT_COUNT],
    /// Why the step ended where it did
    pub reason: ReasonCode,
    /// Reaction time in milliseconds, once recorded
    pub reaction_ms: Option<f64>,
    /// Round ended in a jump start
    pub jump_start: bool,
    /// Events produced by this step, in order
    pub events: Vec<EngineEvent>,
}

impl EngineOutput {
    /// Did the step move the state machine?
    pub fn changed_state(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, EngineEvent::StateChanged { .. }))
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = GameState::color_reset();
        format!(
            "{}[{}] round={} | {}{}",
            color,
            self.state,
            self.round,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let reaction = self
            .reaction_ms
            .map(|ms| format!("{:.3}", ms))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "state={} | round={} | reaction_ms={} | jump_start={} | reason={}",
            self.state,
            self.round,
            reaction,
            self.jump_start,
            self.reason.code()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(events: Vec<EngineEvent>) -> EngineOutput {
        EngineOutput {
            timestamp: Utc::now(),
            round: 2,
            state: GameState::Finished,
            lights: [false; LIGHT_COUNT],
            reason: ReasonCode::R003_REACTION_RECORDED,
            reaction_ms: Some(219.75),
            jump_start: false,
            events,
        }
    }

    #[test]
    fn test_parseable_string() {
        let out = output(Vec::new());
        assert_eq!(
            out.to_parseable_string(),
            "state=FINISHED | round=2 | reaction_ms=219.750 | jump_start=false | reason=R003_REACTION_RECORDED"
        );
    }

    #[test]
    fn test_changed_state_detects_transition() {
        assert!(!output(vec![EngineEvent::LightOn { index: 0 }]).changed_state());
        assert!(output(vec![EngineEvent::StateChanged {
            from: GameState::Waiting,
            to: GameState::Finished,
        }])
        .changed_state());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_string(&EngineEvent::LightOn { index: 3 }).unwrap();
        assert_eq!(json, r#"{"event":"light_on","index":3}"#);
    }
}
