use anyhow::Context as _;
use serde::Serialize;
use tera::Tera;

use crate::markdown::escape_html;

pub const LANDING: &str = "pages/landing.html";
pub const GENERIC_MD_PAGE: &str = "pages/generic_md_page.html";
pub const BLOG: &str = "pages/blog.html";
pub const WIKI: &str = "pages/wiki.html";
pub const WIKI_SEARCH: &str = "pages/wiki_search.html";
pub const THUMBNAILS: &str = "components/wiki/thumbnails.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    (LANDING, include_str!("../templates/pages/landing.html")),
    (GENERIC_MD_PAGE, include_str!("../templates/pages/generic_md_page.html")),
    (BLOG, include_str!("../templates/pages/blog.html")),
    (WIKI, include_str!("../templates/pages/wiki.html")),
    (WIKI_SEARCH, include_str!("../templates/pages/wiki_search.html")),
    (THUMBNAILS, include_str!("../templates/components/wiki/thumbnails.html")),
];

/// Compiled page templates. Every page also sees `nav_pages`, the route table in order.
#[derive(Debug, Clone)]
pub struct Renderer {
    tera: Tera,
    nav_pages: Vec<String>,
}

impl Renderer {
    pub fn new(nav_pages: Vec<String>) -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .context("compile templates")?;
        // Leaves '/' intact so URLs in attributes stay readable.
        tera.set_escape_fn(escape_html);
        Ok(Self { tera, nav_pages })
    }

    /// Renders `name` with the fields of `context` at the top level.
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> anyhow::Result<String> {
        let mut ctx = tera::Context::from_serialize(context)
            .with_context(|| format!("build template context: {name}"))?;
        ctx.insert("nav_pages", &self.nav_pages);
        self.tera
            .render(name, &ctx)
            .with_context(|| format!("render template: {name}"))
    }

    /// Renders a pre-built markdown body into `name`.
    pub fn render_content(&self, name: &str, content: &str) -> anyhow::Result<String> {
        self.render(name, &serde_json::json!({ "content": content }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> anyhow::Result<Renderer> {
        Renderer::new(vec!["about".to_owned(), "blogs".to_owned()])
    }

    #[test]
    fn markdown_body_is_not_escaped() -> anyhow::Result<()> {
        let html = renderer()?.render_content(GENERIC_MD_PAGE, "<p>Hello <em>you</em></p>")?;
        assert!(html.contains("<p>Hello <em>you</em></p>"));
        assert!(html.contains("<a href=\"/about\">About</a>"));
        Ok(())
    }

    #[test]
    fn plain_fields_are_escaped() -> anyhow::Result<()> {
        let html = renderer()?.render(
            THUMBNAILS,
            &serde_json::json!({ "query": "<script>", "thumbnails": [] }),
        )?;
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("wiki-no-results"));
        Ok(())
    }

    #[test]
    fn urls_survive_escaping() -> anyhow::Result<()> {
        let html = renderer()?.render(
            THUMBNAILS,
            &serde_json::json!({
                "query": "a/b",
                "thumbnails": [{
                    "src": "A_B",
                    "title": "A/B",
                    "image": "/static/img/generated/A_B/Overview.webp",
                    "overview": "<p>x</p>...",
                }],
            }),
        )?;
        assert!(html.contains("src=\"/static/img/generated/A_B/Overview.webp\""));
        assert!(html.contains("<h3>A/B</h3>"));
        assert!(html.contains("<p>x</p>..."));
        Ok(())
    }

    #[test]
    fn every_page_template_renders() -> anyhow::Result<()> {
        let renderer = renderer()?;
        assert!(renderer.render(LANDING, &serde_json::json!({}))?.contains("terminal"));
        assert!(renderer.render(WIKI_SEARCH, &serde_json::json!({}))?.contains("search_text"));
        assert!(renderer.render_content(BLOG, "x")?.contains("All posts"));
        Ok(())
    }

    #[test]
    fn missing_template_is_an_error() -> anyhow::Result<()> {
        assert!(renderer()?.render("pages/nope.html", &serde_json::json!({})).is_err());
        Ok(())
    }
}
