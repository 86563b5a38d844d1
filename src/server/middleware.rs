//! Request middleware: theme cookie and fixed response header

use anyhow::{Context as _, Result};
use axum::{
    extract::{Request, State},
    http::{header::SET_COOKIE, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;

use super::AppState;
use crate::config::MiddlewareConfig;

/// Theme resolved for the current request, available to handlers as an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme(pub String);

/// Validated middleware settings
#[derive(Debug, Clone)]
pub struct ResponseDecorations {
    theme_cookie: String,
    default_theme: String,
    header_name: HeaderName,
    header_value: HeaderValue,
}

impl ResponseDecorations {
    pub fn new(config: &MiddlewareConfig) -> Result<Self> {
        let header_name = HeaderName::from_bytes(config.header_name.as_bytes())
            .with_context(|| format!("invalid header name {:?}", config.header_name))?;
        let header_value = HeaderValue::from_str(&config.header_value)
            .with_context(|| format!("invalid header value {:?}", config.header_value))?;
        if config.theme_cookie.is_empty() {
            anyhow::bail!("theme cookie name must not be empty");
        }

        Ok(Self {
            theme_cookie: config.theme_cookie.clone(),
            default_theme: config.default_theme.clone(),
            header_name,
            header_value,
        })
    }
}

fn theme_cookie(name: &str, value: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .path("/")
        .build()
}

/// Set the theme cookie when the request has none, and always add the custom header
pub async fn decorate_response(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let settings = &state.decorations;
    let existing = jar
        .get(&settings.theme_cookie)
        .map(|cookie| cookie.value().to_string());

    let theme = existing
        .clone()
        .unwrap_or_else(|| settings.default_theme.clone());
    request.extensions_mut().insert(Theme(theme));

    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = theme_cookie(&settings.theme_cookie, &settings.default_theme);
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => tracing::warn!("Could not encode theme cookie: {}", e),
        }
    }

    response
        .headers_mut()
        .insert(settings.header_name.clone(), settings.header_value.clone());

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decorations() {
        let decorations = ResponseDecorations::new(&MiddlewareConfig::default()).unwrap();
        assert_eq!(decorations.header_name.as_str(), "custom-header");
        assert_eq!(decorations.header_value, "custom-value");
        assert_eq!(
            theme_cookie(&decorations.theme_cookie, &decorations.default_theme).to_string(),
            "theme=dark; Path=/"
        );
    }

    #[test]
    fn test_invalid_header_name_rejected() {
        let config = MiddlewareConfig {
            header_name: "bad header".to_string(),
            ..Default::default()
        };
        assert!(ResponseDecorations::new(&config).is_err());
    }
}
