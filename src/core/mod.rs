//! Core modules for Lights Out

pub mod clock;
pub mod random;
pub mod scheduler;
pub mod throttle;
pub mod engine;
pub mod classifier;
pub mod messenger;
pub mod format;
pub mod signature;
pub mod submission;
pub mod prefs_store;
pub mod client;
pub mod api;

pub use clock::{Clock, MonotonicClock, ManualClock};
pub use random::{RandomSource, ThreadRandom, SequenceRandom, stimulus_delay};
pub use scheduler::{TimerQueue, TimerHandle, TimerKind, FiredTimer};
pub use throttle::ActionThrottle;
pub use engine::ReflexEngine;
pub use classifier::{ReactionBucket, classify, reaction_message};
pub use messenger::{JUMP_START_MESSAGES, jump_start_message};
pub use format::{format_reaction, format_leaderboard_time, rank_marker};
pub use signature::Signer;
pub use submission::{build_submission, normalize_player_name, normalize_linkedin_url};
pub use prefs_store::PrefsStore;
pub use client::LeaderboardClient;
pub use api::{create_router, run_server};
