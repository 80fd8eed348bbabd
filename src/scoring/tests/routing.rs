use super::common::*;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::scoring::domain::ConstitutionDetails;

async fn post_score(body: Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/timing/score")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    router().oneshot(request).await.expect("response")
}

#[tokio::test]
async fn score_endpoint_returns_the_legacy_view() {
    let body = json!({
        "decision_tree": serde_json::to_value(constitution_tree(10)).expect("tree"),
        "reference_date": "2025-06-30",
    });

    let response = post_score(body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["timing"], "AGORA");
    assert_eq!(payload["timing_base"], "AGORA_CONSTITUICAO");
    assert_eq!(payload["opportunity_score"], 10.0);
    assert_eq!(payload["display_score"], 10);
    assert!(payload["justification"]
        .as_str()
        .expect("justification")
        .contains("10 days ago"));
    assert_eq!(payload["breakdown"]["base"], 9.0);
    assert!(payload["breakdown"]["penalties"]
        .as_array()
        .expect("penalties")
        .is_empty());
}

#[tokio::test]
async fn conflicting_branches_yield_unprocessable_entity() {
    let mut tree = substitution_tree(10);
    tree.constitution = Some(ConstitutionDetails {
        imminent_seizure_threat: false,
        defendant_active: true,
        case_closed: false,
        is_candidate: true,
    });

    let body = json!({
        "decision_tree": serde_json::to_value(tree).expect("tree"),
        "reference_date": "2025-06-30",
    });

    let response = post_score(body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("exactly one branch"));
}

#[tokio::test]
async fn future_markers_yield_unprocessable_entity() {
    let mut tree = substitution_tree(10);
    tree.markers.as_mut().expect("markers").most_recent = "01/07/2025".to_string();

    let body = json!({
        "decision_tree": serde_json::to_value(tree).expect("tree"),
        "reference_date": "2025-06-30",
    });

    let response = post_score(body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("after the reference date"));
}

#[tokio::test]
async fn reference_date_is_optional() {
    // Markers relative to "today" so the default reference date works.
    let today = chrono::Local::now().date_naive();
    let mut tree = constitution_tree(10);
    let markers = tree.markers.as_mut().expect("markers");
    markers.primary = today
        .checked_sub_days(chrono::Days::new(120))
        .expect("date")
        .format("%d/%m/%Y")
        .to_string();
    markers.most_recent = today
        .checked_sub_days(chrono::Days::new(10))
        .expect("date")
        .format("%d/%m/%Y")
        .to_string();

    let body = json!({
        "decision_tree": serde_json::to_value(tree).expect("tree"),
    });

    let response = post_score(body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["timing"], "AGORA");
}
