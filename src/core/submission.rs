//! Score submission checks, applied before anything goes over the network

use crate::{LINKEDIN_PROFILE_PREFIX, PLAYER_NAME_MAX_CHARS};
use crate::types::{DeviceType, Measurement, NewScore, ValidationError};

/// Trim and cut to the maximum name length (in characters, not bytes)
pub fn normalize_player_name(raw: &str) -> Result<String, ValidationError> {
    let name: String = raw.trim().chars().take(PLAYER_NAME_MAX_CHARS).collect();
    let name = name.trim_end().to_string();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// Blank means "no link"; anything else must be a LinkedIn profile URL
pub fn normalize_linkedin_url(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(url) = raw.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if !url.starts_with(LINKEDIN_PROFILE_PREFIX) {
        return Err(ValidationError::InvalidLinkedInUrl);
    }
    Ok(Some(url.to_string()))
}

/// Build the POST body for a finished round
pub fn build_submission(
    player_name: &str,
    linkedin_url: Option<&str>,
    device_type: DeviceType,
    measurement: &Measurement,
) -> Result<NewScore, ValidationError> {
    if measurement.jump_start {
        return Err(ValidationError::JumpStart);
    }
    let (Some(start_time), Some(reaction_time), Some(end_time)) = (
        measurement.start_ms(),
        measurement.reaction_ms(),
        measurement.end_ms(),
    ) else {
        return Err(ValidationError::NoReaction);
    };

    let player_name = normalize_player_name(player_name)?;
    let linkedin_url = normalize_linkedin_url(linkedin_url)?;

    Ok(NewScore {
        player_name,
        reaction_time,
        device_type,
        start_time,
        end_time,
        linkedin_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn finished(reaction_ms: u64) -> Measurement {
        Measurement {
            start_time: Some(Duration::from_millis(8_000)),
            reaction_time: Some(Duration::from_millis(reaction_ms)),
            jump_start: false,
        }
    }

    #[test]
    fn test_name_trimmed_and_limited() {
        assert_eq!(normalize_player_name("  Charles  ").unwrap(), "Charles");
        assert_eq!(
            normalize_player_name("abcdefghijklmnopqrstuvwxyz").unwrap(),
            "abcdefghijklmnopqrst"
        );
        assert_eq!(normalize_player_name("ŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞŞ").unwrap().chars().count(), 20);
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(normalize_player_name("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_linkedin_rules() {
        assert_eq!(normalize_linkedin_url(None), Ok(None));
        assert_eq!(normalize_linkedin_url(Some("  ")), Ok(None));
        assert_eq!(
            normalize_linkedin_url(Some(" https://www.linkedin.com/in/seb ")),
            Ok(Some("https://www.linkedin.com/in/seb".to_string()))
        );
        assert_eq!(
            normalize_linkedin_url(Some("http://linkedin.com/in/seb")),
            Err(ValidationError::InvalidLinkedInUrl)
        );
    }

    #[test]
    fn test_submission_carries_timing() {
        let score = build_submission("Yuki", None, DeviceType::Mobile, &finished(215)).unwrap();
        assert_eq!(score.player_name, "Yuki");
        assert_eq!(score.reaction_time, 215.0);
        assert_eq!(score.start_time, 8_000.0);
        assert_eq!(score.end_time, 8_215.0);
        assert_eq!(score.device_type, DeviceType::Mobile);
    }

    #[test]
    fn test_jump_start_not_submittable() {
        let m = Measurement {
            jump_start: true,
            ..Measurement::new()
        };
        assert_eq!(
            build_submission("Yuki", None, DeviceType::Web, &m),
            Err(ValidationError::JumpStart)
        );
        assert_eq!(
            build_submission("Yuki", None, DeviceType::Web, &Measurement::new()),
            Err(ValidationError::NoReaction)
        );
    }

    #[test]
    fn test_bad_link_blocks_submission() {
        assert_eq!(
            build_submission("Yuki", Some("example.com"), DeviceType::Web, &finished(300)),
            Err(ValidationError::InvalidLinkedInUrl)
        );
    }
}
