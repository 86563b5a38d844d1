//! Post resolver - markdown store first, remote store as fallback

use serde::Serialize;

use crate::content::{
    parse_date_string, MarkdownPost, MarkdownRenderer, MarkdownStore, PostOrigin, RemotePost,
};
use crate::remote::{RemoteError, RemoteSource};

/// Outcome of resolving an id against both stores
#[derive(Debug)]
pub enum Resolution {
    /// Found in the markdown store
    Local(MarkdownPost),
    /// Not in the markdown store, found in the remote store
    Remote(RemotePost),
    /// Neither store has the id
    NotFound,
    /// The markdown store did not have the id and the remote store failed
    Unavailable(RemoteError),
}

/// Resolve `id`: load the markdown post, or fall back to the remote store
/// when the file is absent or unreadable.
///
/// The file read runs on the blocking pool.
pub async fn resolve(
    markdown: &MarkdownStore,
    remote: &dyn RemoteSource,
    id: &str,
) -> Resolution {
    let store = markdown.clone();
    let owned_id = id.to_string();
    match tokio::task::spawn_blocking(move || store.get(&owned_id)).await {
        Ok(Ok(post)) => return Resolution::Local(post),
        Ok(Err(e)) if e.is_missing() => {
            tracing::debug!("{}, trying remote store", e);
        }
        Ok(Err(e)) => {
            tracing::warn!("Markdown post {:?} unusable, trying remote store: {}", id, e);
        }
        Err(e) => {
            tracing::warn!("Loading markdown post {:?} panicked, trying remote store: {}", id, e);
        }
    }

    match remote.get(id).await {
        Ok(Some(post)) => Resolution::Remote(post),
        Ok(None) => Resolution::NotFound,
        Err(e) => {
            tracing::warn!("Remote lookup for {:?} failed: {}", id, e);
            Resolution::Unavailable(e)
        }
    }
}

/// Detail-view shape shared by both sources, with HTML ready to embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub author: Option<String>,
    pub html: String,
    pub origin: PostOrigin,
}

impl PostDetail {
    pub fn from_markdown(post: MarkdownPost, renderer: &MarkdownRenderer) -> Self {
        let html = match post.content_html {
            Some(html) => html,
            None => renderer
                .render_safe(&post.content)
                .unwrap_or_else(|_| renderer.render_plain(&post.content)),
        };
        let date = post
            .date
            .map(|d| match parse_date_string(&d) {
                Some(dt) => dt.format("%B %-d, %Y").to_string(),
                None => d,
            });

        Self {
            id: post.id,
            title: post.title,
            date,
            author: post.author,
            html,
            origin: PostOrigin::Markdown,
        }
    }

    pub fn from_remote(post: RemotePost, renderer: &MarkdownRenderer) -> Self {
        Self {
            id: post.id.to_string(),
            html: renderer.render_plain(&post.body),
            title: post.title,
            date: None,
            author: None,
            origin: PostOrigin::Remote,
        }
    }
}
