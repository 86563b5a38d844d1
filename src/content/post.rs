//! Post models for both sources and the listing projection

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};

/// Title used when front-matter does not provide one
pub const UNTITLED: &str = "Untitled";

/// Characters escaped when an id is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A post read from a markdown file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownPost {
    /// File name without the `.md` extension
    pub id: String,

    /// Title from front-matter, or [`UNTITLED`]
    pub title: String,

    pub date: Option<String>,

    pub author: Option<String>,

    /// Raw markdown body (front-matter removed)
    pub content: String,

    /// Rendered and sanitized HTML, present when loaded for a detail view
    pub content_html: Option<String>,
}

/// A post returned by the remote JSON API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Which store a post came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostOrigin {
    Markdown,
    Remote,
}

impl PostOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostOrigin::Markdown => "markdown",
            PostOrigin::Remote => "remote",
        }
    }
}

/// The `{id, title}` projection used by listing views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub origin: PostOrigin,
}

impl PostSummary {
    /// Link to the detail page for this post
    pub fn href(&self) -> String {
        format!("/blog/{}", utf8_percent_encode(&self.id, PATH_SEGMENT))
    }
}

impl From<&MarkdownPost> for PostSummary {
    fn from(post: &MarkdownPost) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            origin: PostOrigin::Markdown,
        }
    }
}

impl From<&RemotePost> for PostSummary {
    fn from(post: &RemotePost) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            origin: PostOrigin::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_post_wire_format() {
        let json = r#"{"userId": 1, "id": 1, "title": "A", "body": "B"}"#;
        let post: RemotePost = serde_json::from_str(json).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.body, "B");

        let summary = PostSummary::from(&post);
        assert_eq!(summary.id, "1");
        assert_eq!(summary.title, "A");
        assert_eq!(summary.origin, PostOrigin::Remote);
    }

    #[test]
    fn test_markdown_summary() {
        let post = MarkdownPost {
            id: "first-post".to_string(),
            title: UNTITLED.to_string(),
            date: None,
            author: None,
            content: String::new(),
            content_html: None,
        };
        let summary = PostSummary::from(&post);
        assert_eq!(summary.id, "first-post");
        assert_eq!(summary.title, "Untitled");
        assert_eq!(summary.href(), "/blog/first-post");
    }

    #[test]
    fn test_href_escapes_id() {
        let summary = PostSummary {
            id: "a b/c".to_string(),
            title: "t".to_string(),
            origin: PostOrigin::Markdown,
        };
        assert_eq!(summary.href(), "/blog/a%20b%2Fc");
    }

    #[test]
    fn test_origin_serializes_lowercase() {
        let json = serde_json::to_string(&PostOrigin::Remote).unwrap();
        assert_eq!(json, "\"remote\"");
    }
}
