//! Core types for Lights Out

mod state;
mod board;
mod measurement;
mod reason;
mod output;
mod score;
mod prefs;
mod error;

pub use state::GameState;
pub use board::LightBoard;
pub use measurement::{Measurement, duration_ms};
pub use reason::ReasonCode;
pub use output::{EngineEvent, EngineOutput};
pub use score::{DeviceType, LeaderboardEntry, NewScore};
pub use prefs::PlayerPrefs;
pub use error::{ValidationError, ApiError, PrefsError};
