//! Authenticated user endpoint
//!
//! GET /api/v1/me — profile of the account the server is configured for.

use super::{ApiError, ApiResponse, AppState};
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use roost_gateway::Profile;

/// GET /api/v1/me handler.
pub async fn me(State(state): State<AppState>) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.gateway.identity().await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// Create the user routes.
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/api/v1/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::default_state;

    #[tokio::test]
    async fn test_me_returns_profile() {
        let app_state = default_state().await;
        let response = me(State(app_state)).await.unwrap();
        assert!(response.0.success);
        assert_eq!(response.0.data.unwrap().username, "sam");
    }
}
