//! demo-site: small demo web applications on axum
//!
//! A markdown blog that falls back to a remote JSON API, a users listing
//! backed by PostgreSQL, a portfolio landing page, and a routing playground,
//! all behind one cookie/header middleware.

pub mod blog;
pub mod commands;
pub mod config;
pub mod content;
pub mod remote;
pub mod server;
pub mod templates;
pub mod users;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A demo site rooted at a base directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            let mut config = config::SiteConfig::default();
            config.apply_env();
            config
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        Self {
            config,
            base_dir,
            posts_dir,
        }
    }

    /// Markdown renderer configured for this site
    pub fn renderer(&self) -> Arc<content::MarkdownRenderer> {
        Arc::new(content::MarkdownRenderer::with_options(
            &self.config.highlight,
        ))
    }

    /// The blog with its markdown and remote stores
    pub fn blog(&self) -> Result<blog::Blog> {
        let renderer = self.renderer();
        let markdown = content::MarkdownStore::new(&self.posts_dir, renderer.clone());
        let remote = remote::RemoteStore::new(&self.config.remote)?;
        Ok(blog::Blog::new(markdown, Arc::new(remote), renderer))
    }

    /// The user directory, or a stand-in that always fails when no database is configured
    pub fn users(&self) -> Result<Arc<dyn users::UserDirectory>> {
        match users::PgUserDirectory::connect_lazy(&self.config.database)? {
            Some(directory) => Ok(Arc::new(directory)),
            None => {
                tracing::warn!("No database configured; /api/users will report errors");
                Ok(Arc::new(users::UnconfiguredDirectory))
            }
        }
    }

    /// Initialize a new site
    pub fn init(&self) -> Result<()> {
        commands::init::init_site(&self.base_dir)
    }

    /// Create a new markdown post
    pub fn new_post(&self, title: &str, author: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, author)
    }
}
