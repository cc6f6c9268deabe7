//! The typed API client, end to end through the edge.

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use moodlens_edge::client::{ClientError, MoodLensClient, Tone};

mod common;

use common::{edge_config, start_app, start_edge, EdgeHandle};

#[derive(Deserialize)]
struct RewriteBody {
    text: String,
    tone: String,
}

#[derive(Deserialize)]
struct ModeQuery {
    mode: String,
}

#[derive(Deserialize)]
struct LevelQuery {
    level: u8,
}

async fn model_app() -> String {
    let app = Router::new()
        .route(
            "/gemini-classify",
            post(|| async {
                Json(json!({"results": [
                    {"label": "joy", "score": 0.81},
                    {"label": "neutral", "score": 0.12}
                ]}))
            }),
        )
        .route(
            "/gemini-rewrite",
            post(|Json(body): Json<RewriteBody>| async move {
                Json(json!({"text": format!("  [{}] {}  ", body.tone, body.text)}))
            }),
        );
    format!("http://{}", start_app(app).await)
}

async fn core_app() -> String {
    let app = Router::new()
        .route(
            "/emotion/questionnaire",
            get(|Query(q): Query<ModeQuery>| async move {
                Json(json!({"code": 0, "data": {"mode": q.mode, "items": ["q1", "q2"]}}))
            }),
        )
        .route(
            "/emotion/level-feedback",
            get(|Query(q): Query<LevelQuery>| async move {
                if q.level == 4 {
                    Json(json!({"code": 1, "message": "no feedback for level 4"}))
                } else {
                    Json(json!({"code": 0, "data": {"level": q.level}}))
                }
            }),
        );
    format!("http://{}", start_app(app).await)
}

async fn setup() -> (EdgeHandle, MoodLensClient) {
    let edge = start_edge(edge_config(Some(model_app().await), Some(core_app().await))).await;
    let client = MoodLensClient::new(&edge.url("")).unwrap();
    (edge, client)
}

#[tokio::test]
async fn test_classify() {
    let (_edge, client) = setup().await;

    let scores = client.classify("I love it").await.unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].label, "joy");
    assert!((scores[0].score - 0.81).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_rewrite_trims_text() {
    let (_edge, client) = setup().await;

    let text = client.rewrite("fix this", Tone::Polite).await.unwrap();
    assert_eq!(text, "[polite] fix this");
}

#[tokio::test]
async fn test_questionnaire_unwraps_envelope() {
    let (_edge, client) = setup().await;

    let data = client.questionnaire("quick").await.unwrap();
    assert_eq!(data, json!({"mode": "quick", "items": ["q1", "q2"]}));
}

#[tokio::test]
async fn test_failure_envelope_is_error() {
    let (_edge, client) = setup().await;

    assert_eq!(client.level_feedback(2).await.unwrap(), json!({"level": 2}));

    match client.level_feedback(4).await {
        Err(ClientError::Api(message)) => assert_eq!(message, "no feedback for level 4"),
        other => panic!("expected API failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_edge_error_surfaces_as_status() {
    let edge = start_edge(edge_config(Some(model_app().await), None)).await;
    let client = MoodLensClient::new(&edge.url("")).unwrap();

    match client.get("/api/posts/get-all").await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(message.contains("core_origin"), "{message}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
