//! HTTP server - routes for the blog, users and routing playground demos

mod blog;
pub mod middleware;
mod playground;
mod users;


use anyhow::Result;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::trace::TraceLayer;

use crate::blog::Blog;
use crate::config::SiteConfig;
use crate::templates::TemplateRenderer;
use crate::users::UserDirectory;
use crate::Site;
use middleware::{decorate_response, ResponseDecorations};

/// Shared, immutable state for every request
pub struct AppState {
    pub config: SiteConfig,
    pub blog: Blog,
    pub users: Arc<dyn UserDirectory>,
    pub templates: TemplateRenderer,
    pub decorations: ResponseDecorations,
}

impl AppState {
    pub fn new(config: SiteConfig, blog: Blog, users: Arc<dyn UserDirectory>) -> Result<Self> {
        let decorations = ResponseDecorations::new(&config.middleware)?;
        Ok(Self {
            config,
            blog,
            users,
            templates: TemplateRenderer::new()?,
            decorations,
        })
    }

    /// Build the state for a site: stores, HTTP client and database pool
    pub fn from_site(site: &Site) -> Result<Self> {
        Self::new(site.config.clone(), site.blog()?, site.users()?)
    }

    /// Base template context for a page rendered with `theme`
    fn context(&self, theme: &str) -> Context {
        TemplateRenderer::page_context(&self.config, theme)
    }

    /// Render a page, falling back to a plain 500 when the template fails
    fn page(&self, status: StatusCode, template: &str, context: &Context) -> Response {
        match self.templates.render(template, context) {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render {}: {:#}", template, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }

    /// Render the error page
    fn error_page(&self, status: StatusCode, message: &str, theme: &str) -> Response {
        let mut context = self.context(theme);
        context.insert("status", &status.as_u16());
        context.insert("message", message);
        self.page(status, "error.html", &context)
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(playground::home))
        .route("/blog", get(blog::index))
        .route("/blog/:id", get(blog::show))
        .route("/api/posts", get(blog::api_index))
        .route("/api/posts/:id", get(blog::api_show))
        .route("/assets/syntax.css", get(blog::syntax_css))
        .route("/users", get(users::page))
        .route("/api/users", get(users::api_index))
        .route("/product/:productid", get(playground::product_details))
        .route(
            "/product/:productid/reviews/:reviewid",
            get(playground::product_review),
        )
        .route("/docs/*slug", get(playground::docs))
        .fallback(playground::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            decorate_response,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_site(site)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
