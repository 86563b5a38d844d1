//! Routing playground: dynamic segments, catch-all segments and page metadata

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Extension,
};
use std::sync::Arc;

use super::middleware::Theme;
use super::AppState;

/// Highest review id that exists
const MAX_REVIEW_ID: u64 = 1000;

/// Document title for a product page
pub fn product_title(product_id: &str) -> String {
    format!("Product - iPhone {}", product_id)
}

/// Reviews above the limit are missing. The id is read like a leading
/// integer: `1001abc` counts as 1001, while ids without leading digits and
/// negative ids always render.
fn review_exists(review_id: &str) -> bool {
    let trimmed = review_id.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];
    if digits.is_empty() || negative {
        return true;
    }

    // Too many digits for u64 is still a number above the limit
    digits
        .parse::<u64>()
        .map_or(false, |id| id <= MAX_REVIEW_ID)
}

/// Catch-all path split into its non-empty segments
fn slug_segments(slug: &str) -> Vec<&str> {
    slug.split('/').filter(|s| !s.is_empty()).collect()
}

/// `GET /`
pub async fn home(State(state): State<Arc<AppState>>, Extension(theme): Extension<Theme>) -> Response {
    let context = state.context(&theme.0);
    state.page(StatusCode::OK, "home.html", &context)
}

/// `GET /product/:productid`
pub async fn product_details(
    State(state): State<Arc<AppState>>,
    Extension(theme): Extension<Theme>,
    Path(product_id): Path<String>,
) -> Response {
    let mut context = state.context(&theme.0);
    context.insert("page_title", &product_title(&product_id));
    context.insert("product_id", &product_id);
    state.page(StatusCode::OK, "product_details.html", &context)
}

/// `GET /product/:productid/reviews/:reviewid`
pub async fn product_review(
    State(state): State<Arc<AppState>>,
    Extension(theme): Extension<Theme>,
    Path((product_id, review_id)): Path<(String, String)>,
) -> Response {
    if !review_exists(&review_id) {
        return state.error_page(StatusCode::NOT_FOUND, "Review not found", &theme.0);
    }

    let mut context = state.context(&theme.0);
    context.insert("page_title", &product_title(&product_id));
    context.insert("product_id", &product_id);
    context.insert("review_id", &review_id);
    state.page(StatusCode::OK, "product_review.html", &context)
}

/// `GET /docs/*slug`
pub async fn docs(
    State(state): State<Arc<AppState>>,
    Extension(theme): Extension<Theme>,
    Path(slug): Path<String>,
) -> Response {
    let mut context = state.context(&theme.0);
    context.insert("slug", &slug_segments(&slug));
    state.page(StatusCode::OK, "docs.html", &context)
}

/// Fallback for unmatched routes
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    Extension(theme): Extension<Theme>,
) -> Response {
    state.error_page(StatusCode::NOT_FOUND, "This page could not be found.", &theme.0)
}
