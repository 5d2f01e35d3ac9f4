//! Leaderboard HTTP client
//!
//! Endpoints:
//! - GET /api/leaderboard?limit=N - Fastest N scores
//! - GET /api/scores - Every score
//! - GET /api/scores/{player} - A player's best score, or null
//! - POST /api/scores - Submit a score
//!
//! No retries. A non-2xx answer becomes `ApiError::Remote` carrying the body's
//! `error` field, or a per-call fallback message.

use std::time::Duration;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::SIGNATURE_HEADER;
use crate::core::signature::Signer;
use crate::types::{ApiError, LeaderboardEntry, NewScore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error body shape shared by the leaderboard service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the leaderboard store
#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    http: reqwest::Client,
    base_url: Url,
    signer: Option<Signer>,
}

impl LeaderboardClient {
    /// Client for the service at `base_url` (e.g. `http://localhost:3001`)
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url,
            signer: None,
        })
    }

    /// Attach the integrity signature to submissions
    pub fn with_signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fastest `limit` scores, ascending by reaction time
    pub async fn top_scores(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let mut url = self.endpoint(&["api", "leaderboard"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response = self.http.get(url).send().await?;
        let response = check(response, "Failed to fetch leaderboard").await?;
        let mut entries: Vec<LeaderboardEntry> = decode(response).await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// Every score, ascending by reaction time
    pub async fn all_scores(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let url = self.endpoint(&["api", "scores"])?;
        let response = self.http.get(url).send().await?;
        let response = check(response, "Failed to fetch scores").await?;
        decode(response).await
    }

    /// A player's best score, `None` if they have none
    pub async fn player_best(&self, player_name: &str) -> Result<Option<LeaderboardEntry>, ApiError> {
        let url = self.endpoint(&["api", "scores", player_name])?;
        let response = self.http.get(url).send().await?;
        let response = check(response, "Failed to fetch player score").await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Submit a validated score. The body is serialized once; the signature
    /// covers exactly those bytes.
    pub async fn submit_score(&self, score: &NewScore) -> Result<LeaderboardEntry, ApiError> {
        let url = self.endpoint(&["api", "scores"])?;
        let mut request = self.http.post(url).header(CONTENT_TYPE, "application/json");

        let body = match &self.signer {
            Some(signer) => {
                let (body, signature) = signer.sign_json(score)?;
                request = request.header(SIGNATURE_HEADER, signature);
                body
            }
            None => serde_json::to_string(score)?,
        };
        debug!(player = %score.player_name, reaction_ms = score.reaction_time, "submitting score");

        let response = request.body(body).send().await?;
        let response = check(response, "Failed to save score").await?;
        decode(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Pass 2xx through; turn anything else into `ApiError::Remote`
async fn check(response: Response, fallback: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = status.as_u16(), %message, "leaderboard request failed");

    Err(ApiError::Remote {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_unparseable_base() {
        assert!(matches!(
            LeaderboardClient::new("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            LeaderboardClient::new("mailto:pit@wall.example"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_encodes_player_name() {
        let client = LeaderboardClient::new("http://localhost:3001/").unwrap();
        let url = client.endpoint(&["api", "scores", "Max V/33"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/scores/Max%20V%2F33");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = LeaderboardClient::new("http://example.test/reflex").unwrap();
        let url = client.endpoint(&["api", "leaderboard"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/reflex/api/leaderboard");
    }
}
