//! Built-in page templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping stays on; post
//! bodies are sanitized before rendering and inserted with `| safe`.

use anyhow::Result;
use chrono::Datelike;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

/// Site-wide values every page needs
#[derive(Debug, Serialize)]
struct SiteContext<'a> {
    title: &'a str,
    author: &'a str,
    language: &'a str,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("users.html", include_str!("site/users.html")),
            ("product.html", include_str!("site/product.html")),
            (
                "product_details.html",
                include_str!("site/product_details.html"),
            ),
            (
                "product_review.html",
                include_str!("site/product_review.html"),
            ),
            ("docs.html", include_str!("site/docs.html")),
            ("error.html", include_str!("site/error.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Base context shared by every page
    pub fn page_context(config: &SiteConfig, theme: &str) -> Context {
        let mut context = Context::new();
        context.insert(
            "site",
            &SiteContext {
                title: &config.title,
                author: &config.author,
                language: &config.language,
            },
        );
        context.insert("theme", theme);
        context.insert("year", &chrono::Local::now().year());
        context
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(name: &str, extra: &[(&str, serde_json::Value)]) -> String {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = TemplateRenderer::page_context(&SiteConfig::default(), "dark");
        for (key, value) in extra {
            context.insert(*key, value);
        }
        renderer.render(name, &context).unwrap()
    }

    #[test]
    fn test_home_has_footer_year() {
        let html = render("home.html", &[]);
        let year = chrono::Local::now().year().to_string();
        assert!(html.contains("Welcome to My Portfolio"));
        assert!(html.contains(&format!("&copy; {} My Portfolio. All rights reserved.", year)));
        assert!(html.contains("theme-dark"));
        assert!(html.contains("Built by John Doe"));
    }

    #[test]
    fn test_post_body_is_not_escaped_but_title_is() {
        let html = render(
            "blog_post.html",
            &[(
                "post",
                serde_json::json!({
                    "title": "<b>Title</b>",
                    "html": "<p>Body</p>",
                    "date": null,
                    "author": null,
                }),
            )],
        );
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains("&lt;b&gt;Title&lt;"));
    }

    #[test]
    fn test_docs_segments() {
        let two = render("docs.html", &[("slug", serde_json::json!(["a", "b"]))]);
        assert!(two.contains("<h1>a and b</h1>"));

        let one = render("docs.html", &[("slug", serde_json::json!(["a"]))]);
        assert!(one.contains("<h1>a</h1>"));

        let many = render("docs.html", &[("slug", serde_json::json!(["a", "b", "c"]))]);
        assert!(many.contains("doc home page"));
    }

    #[test]
    fn test_product_layout_wraps_details() {
        let html = render(
            "product_details.html",
            &[
                ("product_id", serde_json::json!("7")),
                ("page_title", serde_json::json!("Product - iPhone 7")),
            ],
        );
        assert!(html.contains("<title>Product - iPhone 7</title>"));
        assert!(html.contains("Details about product 7"));
        assert!(html.contains("Featured Product Layout"));
    }
}
