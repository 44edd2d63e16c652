use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::info;

use clubmatch_common::model::RecommendationResponse;

use crate::engine::Recommender;

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
}

/// Handle one survey submission.
///
/// The body is the plain-text payload built by the client; it is fed to the
/// recommender verbatim. The reply always carries HTTP 200 with the standard
/// envelope, even when no club scores above zero.
pub async fn submit_handler(
    State(state): State<AppState>,
    payload: String,
) -> Json<RecommendationResponse> {
    info!(payload = %payload, "received submission");

    let clubs = state.recommender.recommend(&payload);
    info!(matches = clubs.len(), "recommendations generated");

    Json(RecommendationResponse {
        status: "success".to_string(),
        message: "Recommendations generated successfully!".to_string(),
        clubs,
    })
}
