//! AI reply suggestion endpoints
//!
//! - `POST /api/v1/assistant/replies` — generate suggestions for a tweet
//! - `GET  /api/v1/assistant/replies?status=pending` — stored suggestions

use super::{ApiError, ApiResponse, AppState};
use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use roost_assistant::SourceTweet;
use roost_store::{Suggestion, SuggestionStatus};
use serde::Deserialize;

/// Default number of suggestions per generation request.
const DEFAULT_COUNT: usize = 2;

/// Request for POST /api/v1/assistant/replies
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub tweet: SourceTweet,
    pub context: Option<String>,
    pub count: Option<usize>,
}

/// Query parameters for GET /api/v1/assistant/replies
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

/// POST /api/v1/assistant/replies handler.
pub async fn generate_replies(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    if request.tweet.id.trim().is_empty() {
        return Err(ApiError::BadRequest("tweet id is required".to_string()));
    }
    if request.tweet.text.trim().is_empty() {
        return Err(ApiError::BadRequest("tweet text is required".to_string()));
    }

    let suggestions = state
        .assistant
        .generate_suggestions(
            &request.tweet,
            request.context.as_deref(),
            request.count.unwrap_or(DEFAULT_COUNT),
        )
        .await?;
    Ok(Json(ApiResponse::success(suggestions)))
}

/// GET /api/v1/assistant/replies handler.
pub async fn list_replies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<Suggestion>>>, ApiError> {
    let status = SuggestionStatus::from_str_lossy(params.status.as_deref().unwrap_or("pending"));
    let suggestions = state.store.list_suggestions(status).await?;
    Ok(Json(ApiResponse::success(suggestions)))
}

/// Create the assistant routes.
pub fn assistant_routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/assistant/replies",
        post(generate_replies).get(list_replies),
    )
}
