use std::path::Path;

use anyhow::Context as _;
use tokio::fs;

use crate::config::SiteConfig;
use crate::markdown::render_markdown;

/// Renders the markdown behind a route-table entry.
///
/// `Ok(None)` when the route is unknown or its file does not exist.
pub async fn render_page(config: &SiteConfig, route: &str) -> anyhow::Result<Option<String>> {
    let Some(path) = config.page_source(route) else {
        return Ok(None);
    };
    render_file(&path).await
}

/// Renders `{blog_dir}/{name}.md`.
pub async fn render_blog(config: &SiteConfig, name: &str) -> anyhow::Result<Option<String>> {
    if !is_plain_name(name) {
        tracing::debug!(name, "rejecting blog name");
        return Ok(None);
    }
    let path = config.blog_dir().join(format!("{name}.md"));
    render_file(&path).await
}

pub fn list_pages(config: &SiteConfig) -> Vec<String> {
    config.pages.iter().map(|page| page.route.clone()).collect()
}

/// Stems of every `*.md` post in the blog dir, excluding the summary page, sorted.
pub async fn list_blogs(config: &SiteConfig) -> anyhow::Result<Vec<String>> {
    let dir = config.blog_dir();
    let mut entries = fs::read_dir(&dir)
        .await
        .with_context(|| format!("read blog dir: {}", dir.display()))?;

    let mut blogs = Vec::new();
    while let Some(entry) = entries.next_entry().await.context("read blog dir entry")? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(config.blog_summary.as_str()) {
            continue;
        }
        if !entry.file_type().await.context("stat blog entry")?.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            blogs.push(stem.to_owned());
        }
    }
    blogs.sort();
    Ok(blogs)
}

async fn render_file(path: &Path) -> anyhow::Result<Option<String>> {
    let text = match fs::read_to_string(path).await {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "markdown page not found");
            return Ok(None);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read markdown: {}", path.display()));
        }
    };
    Ok(Some(render_markdown(&text)))
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\'])
}
