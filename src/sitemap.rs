use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;
use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::markdown::escape_html;
use crate::pages::list_blogs;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
    pub lastmod: Option<NaiveDate>,
}

/// Blog posts first (monthly, dated today), then route-table pages (yearly).
pub async fn collect_entries(
    config: &SiteConfig,
    today: NaiveDate,
) -> anyhow::Result<Vec<SitemapEntry>> {
    let base = config.base_url();
    let mut entries = Vec::new();

    for blog in list_blogs(config).await? {
        entries.push(SitemapEntry {
            loc: format!("{base}/blog/{}", blog_slug(&blog)),
            changefreq: "monthly",
            priority: "0.8",
            lastmod: Some(today),
        });
    }
    for page in &config.pages {
        entries.push(SitemapEntry {
            loc: format!("{base}/{}", page.route),
            changefreq: "yearly",
            priority: "0.6",
            lastmod: None,
        });
    }
    Ok(entries)
}

/// URL form of a blog file stem: lower-cased, apostrophes dropped, spaces to hyphens.
pub fn blog_slug(stem: &str) -> String {
    stem.to_lowercase().replace('\'', "").replace(' ', "-")
}

pub fn render(entries: &[SitemapEntry]) -> String {
    let mut out = String::new();
    out.push_str("<?xml version='1.0' encoding='utf-8'?>\n");
    let _ = writeln!(out, "<urlset xmlns=\"{SITEMAP_NS}\">");
    for entry in entries {
        out.push_str("  <url>\n");
        let _ = writeln!(out, "    <loc>{}</loc>", escape_html(&entry.loc));
        let _ = writeln!(out, "    <changefreq>{}</changefreq>", entry.changefreq);
        let _ = writeln!(out, "    <priority>{}</priority>", entry.priority);
        if let Some(lastmod) = entry.lastmod {
            let _ = writeln!(out, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
        }
        out.push_str("  </url>\n");
    }
    out.push_str("</urlset>\n");
    out
}

pub async fn generate(config: &SiteConfig, today: NaiveDate) -> anyhow::Result<String> {
    Ok(render(&collect_entries(config, today).await?))
}

pub async fn write(config: &SiteConfig, out_path: &Path, today: NaiveDate) -> anyhow::Result<usize> {
    let entries = collect_entries(config, today).await?;
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create sitemap parent dir: {}", parent.display()))?;
    }
    std::fs::write(out_path, render(&entries))
        .with_context(|| format!("write sitemap: {}", out_path.display()))?;
    tracing::info!(path = %out_path.display(), urls = entries.len(), "wrote sitemap");
    Ok(entries.len())
}
