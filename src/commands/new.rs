//! Create a new markdown post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{FrontMatter, MarkdownStore};
use crate::Site;

/// Create a post named after the slugified title; returns the new file's path
pub fn create_post(site: &Site, title: &str, author: Option<&str>) -> Result<PathBuf> {
    let id = slug::slugify(title);
    if !MarkdownStore::is_valid_id(&id) {
        anyhow::bail!("Cannot derive a post id from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)?;
    let file_path = site.posts_dir.join(format!("{}.md", id));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        author: Some(author.unwrap_or(&site.config.author).to_string()),
        ..Default::default()
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", id);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_round_trips_through_store() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_post(&site, "Hello: A New World", Some("Ann")).unwrap();
        assert_eq!(path, site.posts_dir.join("hello-a-new-world.md"));

        let post = site.blog().unwrap().markdown().get("hello-a-new-world").unwrap();
        assert_eq!(post.title, "Hello: A New World");
        assert_eq!(post.author.as_deref(), Some("Ann"));
        assert!(post.date.is_some());
    }

    #[test]
    fn test_create_post_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        create_post(&site, "Twice", None).unwrap();
        assert!(create_post(&site, "Twice", None).is_err());
    }

    #[test]
    fn test_create_post_rejects_empty_slug() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert!(create_post(&site, "!!!", None).is_err());
    }
}
