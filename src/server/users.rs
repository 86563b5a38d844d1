//! Users routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;

use super::middleware::Theme;
use super::AppState;
use crate::users::FETCH_FAILED;

/// `GET /api/users`
pub async fn api_index(State(state): State<Arc<AppState>>) -> Response {
    match state.users.list_users().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => {
            tracing::error!("Fetching users failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": FETCH_FAILED })),
            )
                .into_response()
        }
    }
}

/// `GET /users`
pub async fn page(State(state): State<Arc<AppState>>, Extension(theme): Extension<Theme>) -> Response {
    match state.users.list_users().await {
        Ok(users) => {
            let mut context = state.context(&theme.0);
            context.insert("users", &users);
            state.page(StatusCode::OK, "users.html", &context)
        }
        Err(e) => {
            tracing::error!("Fetching users failed: {}", e);
            state.error_page(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED, &theme.0)
        }
    }
}
