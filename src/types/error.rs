//! Error types for submission, leaderboard and preference operations
//!
//! None of these reach the engine; a failed save or load leaves the round as it was.

use thiserror::Error;
use crate::{LINKEDIN_PROFILE_PREFIX, PLAYER_NAME_MAX_CHARS};

/// Rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player name must be 1-{} characters", PLAYER_NAME_MAX_CHARS)]
    EmptyName,
    #[error("Invalid LinkedIn URL format. It should start with {}", LINKEDIN_PROFILE_PREFIX)]
    InvalidLinkedInUrl,
    #[error("jump starts are not submitted")]
    JumpStart,
    #[error("no reaction time recorded yet")]
    NoReaction,
}

/// Leaderboard call failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer; `message` comes from the body's `error` field when present
    #[error("{message}")]
    Remote { status: u16, message: String },
    #[error("leaderboard unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid leaderboard JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid leaderboard URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ApiError {
    /// HTTP status for remote failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Preference file failures
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("preferences I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("preferences file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
