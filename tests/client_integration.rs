//! Integration tests for the leaderboard client
//!
//! Tests the client against a mock server, then end to end against the
//! reference server on a loopback port.

use lightsout::core::{create_router, LeaderboardClient, Signer};
use lightsout::types::{ApiError, DeviceType, NewScore};
use lightsout::SIGNATURE_HEADER;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn score(name: &str, reaction_time: f64) -> NewScore {
    NewScore {
        player_name: name.to_string(),
        reaction_time,
        device_type: DeviceType::Web,
        start_time: 7000.0,
        end_time: 7000.0 + reaction_time,
        linkedin_url: None,
    }
}

fn entry(id: i64, name: &str, reaction_time: f64) -> serde_json::Value {
    json!({
        "id": id,
        "created_at": "2026-10-18T12:00:00Z",
        "player_name": name,
        "reaction_time": reaction_time,
        "device_type": "web",
        "linkedin_url": null
    })
}

#[tokio::test]
async fn test_top_scores_sends_limit_and_caps_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            entry(1, "Oscar", 180.0),
            entry(2, "Lando", 195.5),
            entry(3, "Max", 201.0)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();
    let top = client.top_scores(2).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].player_name, "Oscar");
    assert_eq!(top[1].reaction_time, 195.5);
    assert_eq!(top[0].id, Some(1));
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "player_name must be 1-20 characters"})),
        )
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();
    let err = client.submit_score(&score("Oscar", 180.0)).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "player_name must be 1-20 characters");
}

#[tokio::test]
async fn test_missing_error_field_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "busy"})))
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();

    let err = client.top_scores(10).await.unwrap_err();
    assert!(matches!(err, ApiError::Remote { status: 500, .. }));
    assert_eq!(err.to_string(), "Failed to fetch leaderboard");

    let err = client.submit_score(&score("Oscar", 180.0)).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "Failed to save score");
}

#[tokio::test]
async fn test_player_best_null_and_empty_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores/Nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scores/Ghost"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scores/Oscar"))
        .respond_with(ResponseTemplate::new(200).set_body_json(entry(7, "Oscar", 171.25)))
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();
    assert_eq!(client.player_best("Nobody").await.unwrap(), None);
    assert_eq!(client.player_best("Ghost").await.unwrap(), None);

    let best = client.player_best("Oscar").await.unwrap().unwrap();
    assert_eq!(best.reaction_time, 171.25);
}

#[tokio::test]
async fn test_bad_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scores"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();
    let err = client.all_scores().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_signature_covers_sent_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry(1, "Oscar", 180.0)))
        .mount(&server)
        .await;

    let signer = Signer::new("pit-wall");
    let client = LeaderboardClient::new(&server.uri())
        .unwrap()
        .with_signer(signer.clone());
    let stored = client.submit_score(&score("Oscar", 180.0)).await.unwrap();
    assert_eq!(stored.id, Some(1));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    let signature = request
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(signer.verify(&request.body, signature));
    assert_eq!(signature, signer.sign_bytes(&request.body));
    assert_eq!(
        String::from_utf8(request.body.clone()).unwrap(),
        r#"{"player_name":"Oscar","reaction_time":180,"device_type":"web","start_time":7000,"end_time":7180,"linkedin_url":null}"#
    );
}

#[tokio::test]
async fn test_unsigned_client_sends_no_signature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scores"))
        .respond_with(ResponseTemplate::new(201).set_body_json(entry(1, "Oscar", 180.0)))
        .mount(&server)
        .await;

    let client = LeaderboardClient::new(&server.uri()).unwrap();
    client.submit_score(&score("Oscar", 180.0)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get(SIGNATURE_HEADER).is_none());
}

/// Reference server on an ephemeral loopback port
async fn spawn_server(signer: Option<Signer>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(signer)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_round_trip_against_reference_server() {
    let secret = Signer::new("shared-secret");
    let base = spawn_server(Some(secret.clone())).await;
    let client = LeaderboardClient::new(&base).unwrap().with_signer(secret);

    for (name, ms) in [("Max", 205.0), ("Oscar", 180.5), ("Max", 190.0), ("Lando", 230.0)] {
        let stored = client.submit_score(&score(name, ms)).await.unwrap();
        assert!(stored.id.is_some());
        assert!(stored.created_at.is_some());
    }

    let top = client.top_scores(3).await.unwrap();
    let names: Vec<_> = top.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["Oscar", "Max", "Max"]);

    assert_eq!(client.all_scores().await.unwrap().len(), 4);

    let best = client.player_best("Max").await.unwrap().unwrap();
    assert_eq!(best.reaction_time, 190.0);
    assert_eq!(client.player_best("Charles").await.unwrap(), None);
}

#[tokio::test]
async fn test_reference_server_rejects_wrong_key() {
    let base = spawn_server(Some(Signer::new("server-key"))).await;

    let forged = LeaderboardClient::new(&base)
        .unwrap()
        .with_signer(Signer::new("guessed-key"));
    let err = forged.submit_score(&score("Oscar", 99.0)).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Invalid signature");

    let unsigned = LeaderboardClient::new(&base).unwrap();
    let err = unsigned.submit_score(&score("Oscar", 99.0)).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    assert!(unsigned.all_scores().await.unwrap().is_empty());
}
