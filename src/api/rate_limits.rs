//! Rate limit status endpoint
//!
//! GET /api/v1/rate-limits — persisted per-endpoint quota windows plus
//! a best-effort live snapshot from the provider.

use super::{ApiError, ApiResponse, AppState};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use roost_gateway::RateLimitStatus;

/// GET /api/v1/rate-limits handler.
pub async fn rate_limit_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RateLimitStatus>>, ApiError> {
    let status = state.gateway.rate_limit_status().await?;
    Ok(Json(ApiResponse::success(status)))
}

/// Create the rate limit routes.
pub fn rate_limits_routes() -> Router<AppState> {
    Router::new().route("/api/v1/rate-limits", get(rate_limit_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{state, StubApi};
    use roost_gateway::UpgradeGate;

    #[tokio::test]
    async fn test_status_combines_stored_and_live() {
        let app_state = state(StubApi::default(), UpgradeGate::open(), "").await;
        app_state
            .store
            .upsert_quota(
                "tweets/create",
                99,
                chrono::Utc::now() + chrono::Duration::minutes(15),
                100,
            )
            .await
            .unwrap();

        let response = rate_limit_status(State(app_state)).await.unwrap();
        assert!(response.0.success);
        let status = response.0.data.unwrap();
        assert_eq!(status.stored.len(), 1);
        assert!(status.live.is_some());
    }

    #[tokio::test]
    async fn test_live_failure_still_succeeds() {
        let app_state = state(
            StubApi {
                fail: true,
                rate_limit: None,
            },
            UpgradeGate::open(),
            "",
        )
        .await;

        let response = rate_limit_status(State(app_state)).await.unwrap();
        let status = response.0.data.unwrap();
        assert!(status.stored.is_empty());
        assert!(status.live.is_none());
    }
}
