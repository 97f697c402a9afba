//! Tweet endpoints: publish, reply, feeds, and scheduling.

use super::{ApiError, ApiResponse, AppState};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use roost_gateway::{Feed, PostedTweet};
use roost_store::ScheduledPost;
use serde::{Deserialize, Serialize};

/// Request for POST /api/v1/tweets
#[derive(Debug, Deserialize)]
pub struct PostTweetRequest {
    pub content: String,
}

/// Request for POST /api/v1/tweets/reply
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub tweet_id: String,
    pub content: String,
}

/// Query parameters for feed endpoints.
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub limit: Option<u32>,
}

/// Request for POST /api/v1/tweets/schedule
#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub content: String,
    pub scheduled_for: DateTime<Utc>,
}

/// Body rendered when a gated feed is requested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResponse {
    pub requires_upgrade: bool,
    pub message: String,
    pub limit: u32,
}

fn feed_response(feed: Feed) -> Response {
    match feed {
        Feed::Tweets(tweets) => Json(ApiResponse::success(tweets)).into_response(),
        Feed::UpgradeRequired(notice) => (
            StatusCode::FORBIDDEN,
            Json(UpgradeResponse {
                requires_upgrade: true,
                message: notice.message,
                limit: notice.limit,
            }),
        )
            .into_response(),
    }
}

/// POST /api/v1/tweets handler.
pub async fn post_tweet(
    State(state): State<AppState>,
    Json(request): Json<PostTweetRequest>,
) -> Result<Json<ApiResponse<PostedTweet>>, ApiError> {
    let tweet = state.gateway.post_tweet(&request.content).await?;
    Ok(Json(ApiResponse::success(tweet)))
}

/// POST /api/v1/tweets/reply handler.
pub async fn post_reply(
    State(state): State<AppState>,
    Json(request): Json<ReplyRequest>,
) -> Result<Json<ApiResponse<PostedTweet>>, ApiError> {
    let tweet = state
        .gateway
        .reply_to(&request.tweet_id, &request.content)
        .await?;
    Ok(Json(ApiResponse::success(tweet)))
}

/// GET /api/v1/tweets/mine handler.
pub async fn my_tweets(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    let feed = state.gateway.my_tweets(params.limit.unwrap_or(10)).await?;
    Ok(feed_response(feed))
}

/// GET /api/v1/mentions handler.
pub async fn mentions(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    let feed = state.gateway.mentions(params.limit.unwrap_or(20)).await?;
    Ok(feed_response(feed))
}

/// POST /api/v1/tweets/schedule handler.
pub async fn schedule_post(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> Result<Json<ApiResponse<ScheduledPost>>, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest("content is required".to_string()));
    }
    if request.content.chars().count() > 280 {
        return Err(ApiError::BadRequest(
            "content exceeds 280 characters".to_string(),
        ));
    }
    let scheduled = state
        .store
        .schedule_post(&request.content, request.scheduled_for)
        .await?;
    Ok(Json(ApiResponse::success(scheduled)))
}

/// GET /api/v1/tweets/schedule handler.
pub async fn list_scheduled(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ScheduledPost>>>, ApiError> {
    let scheduled = state.store.list_scheduled().await?;
    Ok(Json(ApiResponse::success(scheduled)))
}

/// Create the tweet routes.
pub fn tweets_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tweets", post(post_tweet))
        .route("/api/v1/tweets/reply", post(post_reply))
        .route("/api/v1/tweets/mine", get(my_tweets))
        .route("/api/v1/mentions", get(mentions))
        .route(
            "/api/v1/tweets/schedule",
            post(schedule_post).get(list_scheduled),
        )
}
