//! Markdown post store - reads posts from a flat directory of `*.md` files

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownPost, MarkdownRenderer, UNTITLED};

lazy_static! {
    /// Ids map directly to file names: no separators, no control characters, no leading dot
    static ref POST_ID: Regex = Regex::new(r"^[^./\\\p{Cc}][^/\\\p{Cc}]*$").unwrap();
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post not found: {0}")]
    NotFound(String),
    #[error("invalid post id: {0:?}")]
    InvalidId(String),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl StoreError {
    /// Whether the post simply does not exist in this store
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::NotFound(_) | StoreError::InvalidId(_))
    }
}

/// Reads markdown posts from a directory
#[derive(Clone)]
pub struct MarkdownStore {
    dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl MarkdownStore {
    pub fn new<P: Into<PathBuf>>(dir: P, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            dir: dir.into(),
            renderer,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Check whether an id names a single file inside the posts directory
    pub fn is_valid_id(id: &str) -> bool {
        if !POST_ID.is_match(id) {
            return false;
        }
        let mut components = Path::new(id).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(name)), None) if name == id
        )
    }

    /// Load every post without rendering bodies, ordered by file name
    pub fn list(&self) -> Result<Vec<MarkdownPost>, StoreError> {
        self.markdown_files()?
            .into_iter()
            .map(|(id, path)| self.load(id, &path, false))
            .collect()
    }

    /// Ids of every post, ordered by file name
    pub fn ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .markdown_files()?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    /// Load one post by id and render its body to sanitized HTML
    pub fn get(&self, id: &str) -> Result<MarkdownPost, StoreError> {
        if !Self::is_valid_id(id) {
            return Err(StoreError::InvalidId(id.to_string()));
        }

        let path = self.dir.join(format!("{}.md", id));
        if !path.is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.load(id.to_string(), &path, true)
    }

    fn markdown_files(&self) -> Result<Vec<(String, PathBuf)>, StoreError> {
        if !self.dir.exists() {
            tracing::debug!("Posts directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| StoreError::Io {
                path: self.dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping {:?}: file name is not valid UTF-8", path);
                continue;
            };
            if !Self::is_valid_id(id) {
                tracing::warn!("Skipping {:?}: {:?} cannot be used as a post id", path, id);
                continue;
            }
            files.push((id.to_string(), path.to_path_buf()));
        }

        Ok(files)
    }

    fn load(&self, id: String, path: &Path, render: bool) -> Result<MarkdownPost, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let content_html = if render {
            let html = self
                .renderer
                .render_safe(body)
                .map_err(|e| StoreError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            Some(html)
        } else {
            None
        };

        Ok(MarkdownPost {
            id,
            title: fm.title.unwrap_or_else(|| UNTITLED.to_string()),
            date: fm.date,
            author: fm.author,
            content: body.to_string(),
            content_html,
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
