//! Reference leaderboard server (in-memory)
//!
//! Endpoints:
//! - GET /api/leaderboard?limit=N - Fastest N scores
//! - GET /api/scores - Every score
//! - POST /api/scores - Submit a score
//! - GET /api/scores/:player_name - Best score for a player, or null
//! - GET /health - Health check
//!
//! Errors answer `{"error": "..."}`. When built with a signer, submissions must
//! carry a matching signature header.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{DEFAULT_LEADERBOARD_LIMIT, PLAYER_NAME_MAX_CHARS, SIGNATURE_HEADER};
use crate::core::signature::Signer;
use crate::core::submission::normalize_linkedin_url;
use crate::types::{LeaderboardEntry, NewScore};

/// Stored scores
#[derive(Debug, Default)]
struct ScoreTable {
    entries: Vec<LeaderboardEntry>,
    next_id: i64,
}

impl ScoreTable {
    fn insert(&mut self, score: NewScore) -> LeaderboardEntry {
        self.next_id += 1;
        let entry = LeaderboardEntry {
            id: Some(self.next_id),
            created_at: Some(Utc::now()),
            player_name: score.player_name,
            reaction_time: score.reaction_time,
            device_type: score.device_type,
            linkedin_url: score.linkedin_url,
        };
        self.entries.push(entry.clone());
        entry
    }

    /// All entries, fastest first
    fn ranked(&self) -> Vec<LeaderboardEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| a.reaction_time.total_cmp(&b.reaction_time));
        ranked
    }
}

/// App state
pub struct AppState {
    scores: RwLock<ScoreTable>,
    signer: Option<Signer>,
}

/// Leaderboard query
#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub scores_stored: usize,
}

/// Error response: status plus `{"error": message}`
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Create the API router. `signer` turns on signature checks for submissions.
pub fn create_router(signer: Option<Signer>) -> Router {
    let state = Arc::new(AppState {
        scores: RwLock::new(ScoreTable::default()),
        signer,
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/scores", get(all_scores).post(submit_score))
        .route("/api/scores/:player_name", get(player_best))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let scores = state.scores.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        scores_stored: scores.entries.len(),
    })
}

/// Fastest N
async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<LeaderboardEntry>> {
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    let scores = state.scores.read().await;
    let mut ranked = scores.ranked();
    ranked.truncate(limit);
    Json(ranked)
}

/// Every score
async fn all_scores(State(state): State<Arc<AppState>>) -> Json<Vec<LeaderboardEntry>> {
    let scores = state.scores.read().await;
    Json(scores.ranked())
}

/// Best score for one player
async fn player_best(
    State(state): State<Arc<AppState>>,
    Path(player_name): Path<String>,
) -> Json<Option<LeaderboardEntry>> {
    let scores = state.scores.read().await;
    let best = scores
        .entries
        .iter()
        .filter(|e| e.player_name == player_name)
        .min_by(|a, b| a.reaction_time.total_cmp(&b.reaction_time))
        .cloned();
    Json(best)
}

/// Submit a score. The raw body is kept so the signature is checked against
/// the bytes the client signed.
async fn submit_score(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<LeaderboardEntry>), ApiFailure> {
    if let Some(signer) = &state.signer {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !signer.verify(&body, signature) {
            warn!("submission rejected: bad signature");
            return Err(ApiFailure {
                status: StatusCode::UNAUTHORIZED,
                message: "Invalid signature".to_string(),
            });
        }
    }

    let mut score: NewScore = serde_json::from_slice(&body)
        .map_err(|e| ApiFailure::bad_request(format!("Invalid request body: {}", e)))?;
    validate_score(&mut score)?;

    let mut scores = state.scores.write().await;
    let entry = scores.insert(score);
    info!(id = ?entry.id, player = %entry.player_name, reaction_ms = entry.reaction_time, "score stored");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Same rules the client applies, but over-long names are refused, not cut
fn validate_score(score: &mut NewScore) -> Result<(), ApiFailure> {
    let name = score.player_name.trim();
    let len = name.chars().count();
    if len == 0 || len > PLAYER_NAME_MAX_CHARS {
        return Err(ApiFailure::bad_request(format!(
            "player_name must be 1-{} characters",
            PLAYER_NAME_MAX_CHARS
        )));
    }
    score.player_name = name.to_string();

    if !score.reaction_time.is_finite() || score.reaction_time <= 0.0 {
        return Err(ApiFailure::bad_request("reaction_time must be a positive number"));
    }

    score.linkedin_url = normalize_linkedin_url(score.linkedin_url.as_deref())
        .map_err(|e| ApiFailure::bad_request(e.to_string()))?;
    Ok(())
}

/// Run the API server
pub async fn run_server(addr: &str, signer: Option<Signer>) -> Result<(), Box<dyn std::error::Error>> {
    let signed = signer.is_some();
    let router = create_router(signer);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, signed, "leaderboard server listening");
    println!("Lights Out leaderboard running on {}", addr);
    println!("  GET  /api/leaderboard?limit=N  - Fastest N");
    println!("  GET  /api/scores               - All scores");
    println!("  POST /api/scores               - Submit score");
    println!("  GET  /api/scores/:player_name  - Player best");
    println!("  GET  /health                   - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
