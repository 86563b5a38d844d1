//! Blog demo - dual-source post resolution and listing

mod listing;
mod resolver;

pub use listing::normalize;
pub use resolver::{resolve, PostDetail, Resolution};

use std::sync::Arc;
use thiserror::Error;

use tokio::task::JoinError;

use crate::content::{MarkdownPost, MarkdownRenderer, MarkdownStore, PostSummary, StoreError};
use crate::remote::{RemoteError, RemoteSource};

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("markdown store: {0}")]
    Store(#[from] StoreError),
    #[error("remote store: {0}")]
    Remote(#[from] RemoteError),
    #[error("markdown store task failed: {0}")]
    Task(#[from] JoinError),
}

/// Both post stores plus the renderer used for detail views
#[derive(Clone)]
pub struct Blog {
    markdown: MarkdownStore,
    remote: Arc<dyn RemoteSource>,
    renderer: Arc<MarkdownRenderer>,
}

impl Blog {
    pub fn new(
        markdown: MarkdownStore,
        remote: Arc<dyn RemoteSource>,
        renderer: Arc<MarkdownRenderer>,
    ) -> Self {
        Self {
            markdown,
            remote,
            renderer,
        }
    }

    pub fn markdown(&self) -> &MarkdownStore {
        &self.markdown
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Summaries of every markdown post followed by every remote post
    pub async fn listing(&self) -> Result<Vec<PostSummary>, BlogError> {
        let markdown = self.markdown_posts().await?;
        let remote = self.remote.list().await?;
        tracing::debug!(
            "Listing {} markdown and {} remote posts",
            markdown.len(),
            remote.len()
        );
        Ok(normalize(&markdown, &remote))
    }

    /// Summaries of the markdown store only
    pub async fn markdown_listing(&self) -> Result<Vec<PostSummary>, BlogError> {
        Ok(normalize(&self.markdown_posts().await?, &[]))
    }

    /// Summaries of the remote store only
    pub async fn remote_listing(&self) -> Result<Vec<PostSummary>, BlogError> {
        Ok(normalize(&[], &self.remote.list().await?))
    }

    /// Ids of every markdown post: the detail pages known without asking the remote store
    pub async fn markdown_ids(&self) -> Result<Vec<String>, BlogError> {
        let store = self.markdown.clone();
        Ok(tokio::task::spawn_blocking(move || store.ids()).await??)
    }

    async fn markdown_posts(&self) -> Result<Vec<MarkdownPost>, BlogError> {
        let store = self.markdown.clone();
        Ok(tokio::task::spawn_blocking(move || store.list()).await??)
    }

    /// Resolve one id against both stores
    pub async fn resolve(&self, id: &str) -> Resolution {
        resolve(&self.markdown, self.remote.as_ref(), id).await
    }

    /// Resolve one id into its detail-view shape
    pub async fn detail(&self, id: &str) -> Result<Option<PostDetail>, BlogError> {
        match self.resolve(id).await {
            Resolution::Local(post) => Ok(Some(PostDetail::from_markdown(post, &self.renderer))),
            Resolution::Remote(post) => Ok(Some(PostDetail::from_remote(post, &self.renderer))),
            Resolution::NotFound => Ok(None),
            Resolution::Unavailable(e) => Err(e.into()),
        }
    }
}
