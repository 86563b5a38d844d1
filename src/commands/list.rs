//! List blog posts

use anyhow::Result;
use clap::ValueEnum;

use crate::content::PostSummary;
use crate::Site;

/// Which store to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSource {
    Markdown,
    Remote,
    All,
}

/// Collect summaries for the chosen source
pub async fn summaries(site: &Site, source: ListSource) -> Result<Vec<PostSummary>> {
    let blog = site.blog()?;
    let summaries = match source {
        ListSource::Markdown => blog.markdown_listing().await?,
        ListSource::Remote => blog.remote_listing().await?,
        ListSource::All => blog.listing().await?,
    };
    Ok(summaries)
}

/// Print post summaries
pub async fn run(site: &Site, source: ListSource) -> Result<()> {
    let summaries = summaries(site, source).await?;

    println!("Posts ({}):", summaries.len());
    for summary in summaries {
        println!(
            "  {} - {} [{}]",
            summary.id,
            summary.title,
            summary.origin.as_str()
        );
    }

    Ok(())
}

/// Print the markdown post ids, one per line
pub async fn run_ids(site: &Site) -> Result<()> {
    for id in site.blog()?.markdown_ids().await? {
        println!("{}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_markdown_summaries_need_no_network() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join("b.md"), "---\ntitle: Bee\n---\n").unwrap();
        fs::write(site.posts_dir.join("a.md"), "no front matter").unwrap();

        let summaries = summaries(&site, ListSource::Markdown).await.unwrap();
        let pairs: Vec<(&str, &str)> = summaries
            .iter()
            .map(|s| (s.id.as_str(), s.title.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "Untitled"), ("b", "Bee")]);
    }
}
