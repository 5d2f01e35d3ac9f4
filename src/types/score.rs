//! Leaderboard wire types
//!
//! Field order in `NewScore` is the serialized order, which the integrity
//! signature covers byte for byte.

use serde::{Deserialize, Serialize, Serializer};
use chrono::{DateTime, Utc};
use crate::MOBILE_MAX_VIEWPORT_WIDTH;

/// Where the round was played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    #[default]
    Web,
}

impl DeviceType {
    /// Narrow viewports count as mobile
    pub fn from_viewport_width(width: u32) -> Self {
        if width <= MOBILE_MAX_VIEWPORT_WIDTH {
            DeviceType::Mobile
        } else {
            DeviceType::Web
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "mobile",
            DeviceType::Web => "web",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "📱",
            DeviceType::Web => "💻",
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "web" => Ok(DeviceType::Web),
            other => Err(format!("unknown device type '{}' (expected mobile or web)", other)),
        }
    }
}

/// A stored leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub player_name: String,
    /// Milliseconds
    pub reaction_time: f64,
    pub device_type: DeviceType,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// Body of `POST /api/scores`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScore {
    pub player_name: String,
    #[serde(serialize_with = "js_number")]
    pub reaction_time: f64,
    pub device_type: DeviceType,
    #[serde(serialize_with = "js_number")]
    pub start_time: f64,
    #[serde(serialize_with = "js_number")]
    pub end_time: f64,
    pub linkedin_url: Option<String>,
}

/// Largest integer a double holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write numbers the way a browser's `JSON.stringify` does: integral values
/// carry no trailing `.0`.
fn js_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
