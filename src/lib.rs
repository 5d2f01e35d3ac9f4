//! Lights Out: reflex test engine
//!
//! Five lights come on one per second, then go out after a random pause.
//! The player reacts to the lights going out; anything earlier is a jump start.

pub mod core;
pub mod types;

// =============================================================================
// LIGHT SEQUENCE TIMING
// =============================================================================

/// Number of lights on the start board
pub const LIGHT_COUNT: usize = 5;

/// Delay between the round start and the first light tick being armed (milliseconds)
pub const STARTUP_DELAY_MS: u64 = 100;

/// Interval between light ticks (milliseconds)
pub const LIGHT_INTERVAL_MS: u64 = 1000;

/// Lower bound of the random pause before lights out (milliseconds, inclusive)
pub const STIMULUS_DELAY_MIN_MS: f64 = 1000.0;

/// Width of the random pause window (milliseconds); upper bound is exclusive
pub const STIMULUS_DELAY_SPAN_MS: f64 = 3000.0;

/// Minimum gap between two accepted inputs (milliseconds)
/// Swallows the duplicate when a click and a keypress fire together
pub const MIN_ACTION_GAP_MS: u64 = 300;

// =============================================================================
// SUBMISSION RULES
// =============================================================================

/// Player names are trimmed and cut to this many characters
pub const PLAYER_NAME_MAX_CHARS: usize = 20;

/// Required prefix for an optional LinkedIn profile link
pub const LINKEDIN_PROFILE_PREFIX: &str = "https://www.linkedin.com/in/";

/// Viewports at or below this width report as mobile
pub const MOBILE_MAX_VIEWPORT_WIDTH: u32 = 768;

/// Default number of rows requested from the leaderboard
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Header carrying the HMAC-SHA256 of the request body
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Default leaderboard service
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
