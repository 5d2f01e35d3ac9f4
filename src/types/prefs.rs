//! Player preferences kept between sessions

use serde::{Deserialize, Serialize};

/// Last name and profile link used for a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPrefs {
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

impl PlayerPrefs {
    /// Fold in a successful submission. The URL is only replaced when one was given.
    pub fn remember(&mut self, player_name: &str, linkedin_url: Option<&str>) {
        self.player_name = Some(player_name.to_string());
        if let Some(url) = linkedin_url.filter(|u| !u.is_empty()) {
            self.linkedin_url = Some(url.to_string());
        }
    }
}
