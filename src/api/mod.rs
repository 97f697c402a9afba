//! Web API module for Roost
//!
//! REST endpoints for:
//! - Posting tweets and replies
//! - Timeline and mention feeds
//! - Scheduling posts
//! - Rate limit status
//! - AI reply suggestions

pub mod assistant;
pub mod health;
pub mod rate_limits;
pub mod tweets;
pub mod user;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use roost_assistant::ReplyAssistant;
use roost_gateway::Gateway;
use roost_store::Store;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub assistant: Arc<ReplyAssistant>,
    pub store: Store,
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Handler-level error, mapped onto an HTTP status and an
/// [`ApiResponse`] envelope.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Gateway(roost_gateway::Error),
    Assistant(roost_assistant::Error),
    Store(roost_store::Error),
}

impl From<roost_gateway::Error> for ApiError {
    fn from(err: roost_gateway::Error) -> Self {
        Self::Gateway(err)
    }
}

impl From<roost_assistant::Error> for ApiError {
    fn from(err: roost_assistant::Error) -> Self {
        Self::Assistant(err)
    }
}

impl From<roost_store::Error> for ApiError {
    fn from(err: roost_store::Error) -> Self {
        Self::Store(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Gateway(err) => match err {
                roost_gateway::Error::Validation(_) => StatusCode::BAD_REQUEST,
                roost_gateway::Error::Provider { .. } => StatusCode::BAD_GATEWAY,
                roost_gateway::Error::Config(_) | roost_gateway::Error::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Assistant(err) => match err {
                roost_assistant::Error::Api(_) | roost_assistant::Error::NoSuggestions => {
                    StatusCode::BAD_GATEWAY
                }
                roost_assistant::Error::Config(_) | roost_assistant::Error::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Gateway(err) => err.to_string(),
            Self::Assistant(err) => err.to_string(),
            Self::Store(err) => err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ApiResponse::<()>::error(self.message()));
        (status, body).into_response()
    }
}


/// Create the API router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(tweets::tweets_routes())
        .merge(rate_limits::rate_limits_routes())
        .merge(assistant::assistant_routes())
        .merge(user::user_routes())
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
