//! Remote post store - fetches posts from a JSON API
//!
//! The listing lives at the configured endpoint and single posts at
//! `{endpoint}/{id}`. Each call performs exactly one request; there is no
//! caching and no retry.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::config::RemoteConfig;
use crate::content::RemotePost;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        source: reqwest::Error,
    },
    #[error("unexpected post shape from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

/// A source of remote posts
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the full listing
    async fn list(&self) -> Result<Vec<RemotePost>, RemoteError>;

    /// Fetch one post, `Ok(None)` when the remote does not have it
    async fn get(&self, id: &str) -> Result<Option<RemotePost>, RemoteError>;
}

/// [`RemoteSource`] backed by a JSON HTTP endpoint
#[derive(Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: String,
}

impl RemoteStore {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build().map_err(RemoteError::Client)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Remote ids are numeric; anything else cannot exist remotely
    pub fn is_valid_id(id: &str) -> bool {
        id.parse::<u64>().is_ok()
    }
}

#[async_trait]
impl RemoteSource for RemoteStore {
    async fn list(&self) -> Result<Vec<RemotePost>, RemoteError> {
        let url = self.endpoint.clone();
        tracing::debug!("Fetching remote listing from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| RemoteError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<RemotePost>>()
            .await
            .map_err(|source| RemoteError::Request { url, source })
    }

    async fn get(&self, id: &str) -> Result<Option<RemotePost>, RemoteError> {
        if !Self::is_valid_id(id) {
            return Ok(None);
        }

        let url = format!("{}/{}", self.endpoint, id);
        tracing::debug!("Fetching remote post from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| RemoteError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| RemoteError::Request {
                url: url.clone(),
                source,
            })?;

        // An empty object is how the API says "no such post" with a 200
        if value.as_object().is_some_and(|fields| fields.is_empty()) {
            tracing::debug!("{} returned an empty object", url);
            return Ok(None);
        }

        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| RemoteError::Decode { url, source })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    /// Serve a fake posts API on an ephemeral port and return its endpoint
    pub(crate) async fn spawn_fake_api() -> String {
        let app = Router::new()
            .route(
                "/posts",
                get(|| async {
                    Json(json!([
                        {"userId": 1, "id": 1, "title": "A", "body": "B"},
                        {"userId": 1, "id": 2, "title": "Second", "body": "Two"},
                    ]))
                }),
            )
            .route(
                "/posts/:id",
                get(|Path(id): Path<u64>| async move {
                    match id {
                        1 => Ok(Json(json!({"userId": 1, "id": 1, "title": "A", "body": "B"}))),
                        2 => Ok(Json(
                            json!({"userId": 1, "id": 2, "title": "Second", "body": "Two"}),
                        )),
                        7 => Ok(Json(json!({}))),
                        8 => Ok(Json(json!({"id": 8}))),
                        500 => Err(StatusCode::INTERNAL_SERVER_ERROR),
                        _ => Err(StatusCode::NOT_FOUND),
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/posts", addr)
    }

    fn store_for(endpoint: String) -> RemoteStore {
        RemoteStore::new(&RemoteConfig {
            endpoint,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_posts() {
        let store = store_for(spawn_fake_api().await);
        let posts = store.list().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[1].title, "Second");
    }

    #[tokio::test]
    async fn test_get_post() {
        let store = store_for(format!("{}/", spawn_fake_api().await));
        let post = store.get("1").await.unwrap().unwrap();
        assert_eq!(post.title, "A");
        assert_eq!(post.body, "B");
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let store = store_for(spawn_fake_api().await);
        assert!(store.get("99").await.unwrap().is_none());
        assert!(store.get("not-a-number").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_object_is_missing() {
        let store = store_for(spawn_fake_api().await);
        assert!(store.get("7").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_post_is_decode_error() {
        let store = store_for(spawn_fake_api().await);
        assert!(matches!(
            store.get("8").await,
            Err(RemoteError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_server_error() {
        let store = store_for(spawn_fake_api().await);
        let err = store.get("500").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = store_for(format!("http://{}/posts", addr));
        assert!(matches!(
            store.list().await,
            Err(RemoteError::Request { .. })
        ));
    }
}
