//! Markdown rendering with syntax highlighting and HTML sanitization
//!
//! Rendering and sanitizing are separate steps: [`MarkdownRenderer::render`]
//! produces whatever pulldown-cmark emits (raw inline HTML included), and
//! [`MarkdownRenderer::sanitize`] strips anything unsafe before the result is
//! embedded in a page. [`MarkdownRenderer::render_safe`] runs both.

use anyhow::{anyhow, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "syntax-" };

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    sanitizer: ammonia::Builder<'static>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            sanitizer: build_sanitizer(),
        }
    }

    /// Render markdown to HTML without sanitizing it
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Strip scripts, event handlers and other unsafe markup from HTML
    pub fn sanitize(&self, html: &str) -> String {
        self.sanitizer.clean(html).to_string()
    }

    /// Render markdown and sanitize the result
    pub fn render_safe(&self, markdown: &str) -> Result<String> {
        Ok(self.sanitize(&self.render(markdown)?))
    }

    /// Render a plain-text body (no markdown) as escaped paragraphs
    pub fn render_plain(&self, text: &str) -> String {
        let html = text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                let lines: Vec<String> = p.lines().map(html_escape).collect();
                format!("<p>{}</p>\n", lines.join("<br>\n"))
            })
            .collect::<String>();
        self.sanitize(&html)
    }

    /// Stylesheet for the `syntax-` classes emitted by highlighted code blocks
    pub fn theme_css(&self) -> Result<String> {
        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| anyhow!("No highlight themes available"))?;
        Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);
        for line in LinesWithEndings::from(code) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                return format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape(lang),
                    html_escape(code)
                );
            }
        }

        format!(
            r#"<pre class="syntax-code"><code class="language-{}">{}</code></pre>"#,
            html_escape(lang),
            generator.finalize()
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn build_sanitizer() -> ammonia::Builder<'static> {
    let mut builder = ammonia::Builder::default();
    builder.add_tag_attributes("span", &["class"]);
    builder.add_tag_attributes("pre", &["class"]);
    builder.add_tag_attributes("code", &["class"]);
    builder.add_tag_attributes("input", &["type", "checked", "disabled"]);
    builder.add_tags(&["input"]);
    builder
}

/// Simple HTML escaping
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render_safe("```rust\nfn main() {}\n```")
            .unwrap();
        assert!(html.contains("language-rust"));
        assert!(html.contains("syntax-"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_code_block_without_highlight() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            enable: false,
            ..Default::default()
        });
        let html = renderer.render("```\nlet x = 1;\n```").unwrap();
        assert!(html.contains("<pre><code>let x = 1;"));
    }

    #[test]
    fn test_render_keeps_raw_html_until_sanitized() {
        let renderer = MarkdownRenderer::new();
        let markdown = "Hello\n\n<script>alert(1)</script>\n\n<a href=\"#\" onclick=\"x()\">link</a>";

        let raw = renderer.render(markdown).unwrap();
        assert!(raw.contains("<script>"));

        let safe = renderer.sanitize(&raw);
        assert!(!safe.contains("<script"));
        assert!(!safe.contains("onclick"));
        assert!(safe.contains("link</a>"));
        assert!(safe.contains("Hello"));
    }

    #[test]
    fn test_render_plain_escapes_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render_plain("line one\nline <two>\n\nsecond para");
        assert!(html.contains("line one<br>"));
        assert!(html.contains("line &lt;two&gt;"));
        assert!(html.contains("<p>second para</p>"));
    }

    #[test]
    fn test_theme_css() {
        let renderer = MarkdownRenderer::new();
        let css = renderer.theme_css().unwrap();
        assert!(css.contains(".syntax-"));
    }
}
