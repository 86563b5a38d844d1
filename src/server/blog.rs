//! Blog routes: listing and detail pages plus their JSON variants

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use super::middleware::Theme;
use super::AppState;
use crate::blog::BlogError;
use crate::content::{PostOrigin, PostSummary};

/// Listing entry as the template sees it
#[derive(Debug, Serialize)]
struct SummaryView<'a> {
    id: &'a str,
    title: &'a str,
    origin: PostOrigin,
    href: String,
}

impl<'a> From<&'a PostSummary> for SummaryView<'a> {
    fn from(summary: &'a PostSummary) -> Self {
        Self {
            id: &summary.id,
            title: &summary.title,
            origin: summary.origin,
            href: summary.href(),
        }
    }
}

fn error_status(error: &BlogError) -> StatusCode {
    match error {
        BlogError::Remote(_) => StatusCode::BAD_GATEWAY,
        BlogError::Store(_) | BlogError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_message(status: StatusCode) -> &'static str {
    if status == StatusCode::BAD_GATEWAY {
        "The post service is unavailable"
    } else {
        "Failed to load posts"
    }
}

/// `GET /blog`
pub async fn index(State(state): State<Arc<AppState>>, Extension(theme): Extension<Theme>) -> Response {
    match state.blog.listing().await {
        Ok(posts) => {
            let views: Vec<SummaryView> = posts.iter().map(SummaryView::from).collect();
            let mut context = state.context(&theme.0);
            context.insert("posts", &views);
            state.page(StatusCode::OK, "blog_index.html", &context)
        }
        Err(e) => {
            tracing::error!("Blog listing failed: {}", e);
            let status = error_status(&e);
            state.error_page(status, error_message(status), &theme.0)
        }
    }
}

/// `GET /blog/:id`
pub async fn show(
    State(state): State<Arc<AppState>>,
    Extension(theme): Extension<Theme>,
    Path(id): Path<String>,
) -> Response {
    match state.blog.detail(&id).await {
        Ok(Some(post)) => {
            let mut context = state.context(&theme.0);
            context.insert("post", &post);
            state.page(StatusCode::OK, "blog_post.html", &context)
        }
        Ok(None) => state.error_page(StatusCode::NOT_FOUND, "Post not found", &theme.0),
        Err(e) => {
            tracing::error!("Loading post {:?} failed: {}", id, e);
            let status = error_status(&e);
            state.error_page(status, error_message(status), &theme.0)
        }
    }
}

/// `GET /api/posts`
pub async fn api_index(State(state): State<Arc<AppState>>) -> Response {
    match state.blog.listing().await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => {
            tracing::error!("Blog listing failed: {}", e);
            let status = error_status(&e);
            (status, Json(json!({ "error": error_message(status) }))).into_response()
        }
    }
}

/// `GET /api/posts/:id`
pub async fn api_show(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.blog.detail(&id).await {
        Ok(Some(post)) => Json(post).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Post not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Loading post {:?} failed: {}", id, e);
            let status = error_status(&e);
            (status, Json(json!({ "error": error_message(status) }))).into_response()
        }
    }
}

/// `GET /assets/syntax.css`
pub async fn syntax_css(State(state): State<Arc<AppState>>) -> Response {
    match state.blog.renderer().theme_css() {
        Ok(css) => ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response(),
        Err(e) => {
            tracing::error!("Failed to build highlight stylesheet: {:#}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
