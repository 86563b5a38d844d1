//! Resolve and print a single post

use anyhow::Result;

use crate::blog::PostDetail;
use crate::Site;

/// Resolve `id` against both stores
pub async fn detail(site: &Site, id: &str) -> Result<PostDetail> {
    match site.blog()?.detail(id).await? {
        Some(post) => Ok(post),
        None => anyhow::bail!("No post with id {:?} in either store", id),
    }
}

/// Print a resolved post
pub async fn run(site: &Site, id: &str) -> Result<()> {
    let post = detail(site, id).await?;

    println!("{} [{}]", post.title, post.origin.as_str());
    if let Some(date) = &post.date {
        println!("Date: {}", date);
    }
    if let Some(author) = &post.author {
        println!("Author: {}", author);
    }
    println!();
    println!("{}", post.html);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::PostOrigin;
    use crate::remote::tests::spawn_fake_api;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_detail_from_both_stores() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.remote.endpoint = spawn_fake_api().await;
        let site = Site::with_config(dir.path().to_path_buf(), config);

        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join("local.md"), "---\ntitle: Local\n---\nText").unwrap();

        let local = detail(&site, "local").await.unwrap();
        assert_eq!(local.origin, PostOrigin::Markdown);

        let remote = detail(&site, "2").await.unwrap();
        assert_eq!(remote.title, "Second");
        assert_eq!(remote.origin, PostOrigin::Remote);

        assert!(detail(&site, "404").await.is_err());
    }
}
