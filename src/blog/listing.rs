//! Listing normalizer - merges both post sources into summaries

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::content::{MarkdownPost, PostSummary, RemotePost};

/// Project markdown posts then remote posts onto [`PostSummary`].
///
/// Order is concatenation: every markdown post in store order, then every
/// remote post in response order. When a remote id equals a markdown id the
/// remote entry is dropped, matching the resolver which always serves the
/// markdown post for that id.
pub fn normalize(markdown: &[MarkdownPost], remote: &[RemotePost]) -> Vec<PostSummary> {
    let mut summaries: IndexMap<String, PostSummary> =
        IndexMap::with_capacity(markdown.len() + remote.len());

    for summary in markdown
        .iter()
        .map(PostSummary::from)
        .chain(remote.iter().map(PostSummary::from))
    {
        match summaries.entry(summary.id.clone()) {
            Entry::Occupied(existing) => {
                tracing::debug!(
                    "Dropping {} post {:?}: id already listed from {}",
                    summary.origin.as_str(),
                    summary.id,
                    existing.get().origin.as_str()
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(summary);
            }
        }
    }

    summaries.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostOrigin;

    fn md(id: &str, title: &str) -> MarkdownPost {
        MarkdownPost {
            id: id.to_string(),
            title: title.to_string(),
            date: None,
            author: None,
            content: String::new(),
            content_html: None,
        }
    }

    fn remote(id: u64, title: &str) -> RemotePost {
        RemotePost {
            user_id: 1,
            id,
            title: title.to_string(),
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_markdown_first_then_remote() {
        let summaries = normalize(
            &[md("b-post", "B"), md("a-post", "A")],
            &[remote(2, "Two"), remote(1, "One")],
        );

        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b-post", "a-post", "2", "1"]);
        assert_eq!(summaries.len(), 4);
        assert_eq!(summaries[0].origin, PostOrigin::Markdown);
        assert_eq!(summaries[3].origin, PostOrigin::Remote);
    }

    #[test]
    fn test_remote_summary_shape() {
        let summaries = normalize(&[], &[remote(1, "A")]);
        assert_eq!(summaries[0].id, "1");
        assert_eq!(summaries[0].title, "A");
    }

    #[test]
    fn test_collision_keeps_markdown() {
        let summaries = normalize(&[md("1", "Local one")], &[remote(1, "Remote one"), remote(2, "Two")]);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Local one");
        assert_eq!(summaries[0].origin, PostOrigin::Markdown);
        assert_eq!(summaries[1].id, "2");
    }

    #[test]
    fn test_empty_sources() {
        assert!(normalize(&[], &[]).is_empty());
    }
}
