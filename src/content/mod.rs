//! Content module - markdown posts, remote post shapes, and rendering

mod frontmatter;
mod markdown;
mod post;
pub mod store;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{MarkdownPost, PostOrigin, PostSummary, RemotePost, UNTITLED};
pub use store::{MarkdownStore, StoreError};
