//! Game state definitions

use serde::{Deserialize, Serialize};

/// Round lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// No round running, next input starts one
    #[default]
    Idle,
    /// Lights are sequencing or the pre-stimulus pause is running
    Ready,
    /// Reserved. Never entered; input here does nothing.
    Countdown,
    /// Lights are out, reaction clock is running
    Waiting,
    /// Round over, either a reaction or a jump start was recorded
    Finished,
}

impl GameState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GameState::Idle | GameState::Countdown => "\x1b[90m", // Gray
            GameState::Ready => "\x1b[31m",                       // Red
            GameState::Waiting => "\x1b[32m",                     // Green
            GameState::Finished => "\x1b[36m",                    // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// True while a round is in flight and input can end it
    pub fn is_live(&self) -> bool {
        matches!(self, GameState::Ready | GameState::Waiting)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::Idle => "IDLE",
            GameState::Ready => "READY",
            GameState::Countdown => "COUNTDOWN",
            GameState::Waiting => "WAITING",
            GameState::Finished => "FINISHED",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&GameState::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
    }

    #[test]
    fn test_only_ready_and_waiting_are_live() {
        assert!(GameState::Ready.is_live());
        assert!(GameState::Waiting.is_live());
        assert!(!GameState::Idle.is_live());
        assert!(!GameState::Countdown.is_live());
        assert!(!GameState::Finished.is_live());
    }
}
