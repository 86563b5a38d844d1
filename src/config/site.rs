//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub language: String,

    // Directory
    /// Directory holding the markdown posts, relative to the base directory
    pub posts_dir: String,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Remote post API
    #[serde(default)]
    pub remote: RemoteConfig,

    // Users demo
    #[serde(default)]
    pub database: DatabaseConfig,

    // Request middleware
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    // Markdown rendering
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            posts_dir: "posts".to_string(),

            server: ServerConfig::default(),
            remote: RemoteConfig::default(),
            database: DatabaseConfig::default(),
            middleware: MiddlewareConfig::default(),
            highlight: HighlightConfig::default(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Apply environment overrides (`DATABASE_URL`)
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                tracing::debug!("Using DATABASE_URL from environment");
                self.database.url = Some(url);
            }
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Remote JSON post source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Listing endpoint; single posts live at `{endpoint}/{id}`
    pub endpoint: String,
    /// Request timeout in seconds, 0 disables it
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://jsonplaceholder.typicode.com/posts".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Relational database for the users demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

/// Cookie and header injected on every response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiddlewareConfig {
    pub theme_cookie: String,
    pub default_theme: String,
    pub header_name: String,
    pub header_value: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            theme_cookie: "theme".to_string(),
            default_theme: "dark".to_string(),
            header_name: "custom-header".to_string(),
            header_value: "custom-value".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
