//! Reason codes for engine steps
//! One code per outcome so the terminal view and logs agree on what happened

use serde::{Deserialize, Serialize};

/// Reason codes for every engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Round lifecycle
    // =========================================================================
    /// New round started, startup delay armed
    R001_ROUND_STARTED,
    /// No round running
    R001_STATE_IDLE,

    // =========================================================================
    // R002: Light sequence
    // =========================================================================
    /// Next light switched on
    R002_LIGHT_ON,
    /// All lights on, random pause armed
    R002_STIMULUS_ARMED,
    /// Lights out, reaction clock running
    R002_LIGHTS_OUT,
    /// Nothing due yet
    R002_SEQUENCE_PENDING,

    // =========================================================================
    // R003: Round outcome
    // =========================================================================
    /// Valid reaction recorded
    R003_REACTION_RECORDED,
    /// Input before lights out
    R003_JUMP_START,

    // =========================================================================
    // R004: Input guards
    // =========================================================================
    /// Input inside the minimum action gap
    R004_INPUT_THROTTLED,
    /// Input with no meaning in the current state
    R004_INPUT_IGNORED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_ROUND_STARTED => "R001_ROUND_STARTED",
            Self::R001_STATE_IDLE => "R001_STATE_IDLE",
            Self::R002_LIGHT_ON => "R002_LIGHT_ON",
            Self::R002_STIMULUS_ARMED => "R002_STIMULUS_ARMED",
            Self::R002_LIGHTS_OUT => "R002_LIGHTS_OUT",
            Self::R002_SEQUENCE_PENDING => "R002_SEQUENCE_PENDING",
            Self::R003_REACTION_RECORDED => "R003_REACTION_RECORDED",
            Self::R003_JUMP_START => "R003_JUMP_START",
            Self::R004_INPUT_THROTTLED => "R004_INPUT_THROTTLED",
            Self::R004_INPUT_IGNORED => "R004_INPUT_IGNORED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_ROUND_STARTED => "Round started",
            Self::R001_STATE_IDLE => "Waiting for a round to start",
            Self::R002_LIGHT_ON => "Light on",
            Self::R002_STIMULUS_ARMED => "All lights on",
            Self::R002_LIGHTS_OUT => "Lights out",
            Self::R002_SEQUENCE_PENDING => "Sequence running",
            Self::R003_REACTION_RECORDED => "Reaction recorded",
            Self::R003_JUMP_START => "Jump start",
            Self::R004_INPUT_THROTTLED => "Input too soon after the previous one",
            Self::R004_INPUT_IGNORED => "Input ignored in this state",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
