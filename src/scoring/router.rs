use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::domain::DecisionTreeResult;
use super::service::TimingScoreService;

/// Request envelope for the scoring endpoint. The reference date is ISO
/// `YYYY-MM-DD` and optional; marker dates inside the tree stay `DD/MM/YYYY`.
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub decision_tree: DecisionTreeResult,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

/// Router builder exposing the scoring endpoint.
pub fn timing_router(service: Arc<TimingScoreService>) -> Router {
    Router::new()
        .route("/api/v1/timing/score", post(score_handler))
        .with_state(service)
}

pub(crate) async fn score_handler(
    State(service): State<Arc<TimingScoreService>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    match service.score(&request.decision_tree, request.reference_date) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.view())).into_response(),
        // Every scoring error is an input-validation failure: no score is
        // produced and the structured message names the offending field.
        Err(error) => {
            warn!(%error, "rejected decision tree");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
