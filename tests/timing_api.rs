use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use garantia_timing::scoring::{timing_router, ScoringConfig, TimingScoreService};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    timing_router(Arc::new(TimingScoreService::new(ScoringConfig::default())))
}

async fn post_score(body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/timing/score")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload = serde_json::from_slice(&bytes).expect("json payload");
    (status, payload)
}

#[tokio::test]
async fn scores_a_constitution_case_end_to_end() {
    let body = json!({
        "decision_tree": {
            "plausibility": true,
            "materialization": true,
            "markers": { "primary": "02/03/2025", "most_recent": "20/06/2025" },
            "post_marker_activity": "routine",
            "active_branch": "constitution",
            "constitution": {
                "imminent_seizure_threat": true,
                "defendant_active": true,
                "case_closed": false,
                "is_candidate": true
            }
        },
        "reference_date": "2025-06-30"
    });

    let (status, payload) = post_score(&body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["timing"], "AGORA");
    assert_eq!(payload["timing_base"], "AGORA_CONSTITUICAO");
    assert_eq!(payload["breakdown"]["base"], 9.0);
    assert_eq!(payload["display_score"], 10);
    assert_eq!(
        payload["breakdown"]["bonuses"]
            .as_array()
            .expect("bonuses")
            .len(),
        2
    );
}

#[tokio::test]
async fn identical_requests_produce_identical_responses() {
    let body = json!({
        "decision_tree": {
            "plausibility": true,
            "materialization": true,
            "markers": { "primary": "10/10/2024", "most_recent": "01/12/2024" },
            "post_marker_activity": "silence",
            "active_branch": "substitution",
            "substitution": {
                "guarantee_type": "judicial_deposit",
                "is_onerous": true,
                "is_candidate": true
            },
            "llm_flags": { "guarantee_type_unknown": true }
        },
        "reference_date": "2025-06-30"
    });

    let (first_status, first) = post_score(&body).await;
    let (second_status, second) = post_score(&body).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn implausible_cases_score_passou_without_markers() {
    let body = json!({
        "decision_tree": { "plausibility": false },
        "reference_date": "2025-06-30"
    });

    let (status, payload) = post_score(&body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["timing"], "PASSOU");
    assert_eq!(payload["opportunity_score"], 1.0);
    assert!(payload["breakdown"]["penalties"]
        .as_array()
        .expect("penalties")
        .is_empty());
}

#[tokio::test]
async fn malformed_trees_are_rejected_with_the_offending_field() {
    let body = json!({
        "decision_tree": {
            "plausibility": true,
            "materialization": true,
            "post_marker_activity": "routine",
            "active_branch": "constitution",
            "constitution": {
                "imminent_seizure_threat": false,
                "defendant_active": true,
                "case_closed": false,
                "is_candidate": true
            }
        },
        "reference_date": "2025-06-30"
    });

    let (status, payload) = post_score(&body).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("markers"));
}
