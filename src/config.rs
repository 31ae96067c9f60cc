use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::wiki::WikiPaths;

pub const BASE_URL_ENV: &str = "MDSITE_BASE_URL";

/// Paths the server mounts itself; a page route may not shadow them.
const RESERVED_ROUTES: &[&str] = &["healthz", "static"];

/// Site layout. Relative paths resolve against `content_root`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub content_root: PathBuf,
    /// Public origin used for sitemap URLs.
    pub base_url: String,
    /// Markdown pages served at `/{route}`, in listing order.
    pub pages: Vec<PageRoute>,
    pub blog_dir: PathBuf,
    /// File in `blog_dir` that is not itself a blog post.
    pub blog_summary: String,
    pub wiki: WikiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PageRoute {
    pub route: String,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WikiConfig {
    pub topics: PathBuf,
    pub section_bodies: PathBuf,
    pub personal_sections: PathBuf,
    pub book_refs: PathBuf,
    pub article_refs: PathBuf,
    pub facts: PathBuf,
    /// URL prefix of generated section images.
    pub image_base: String,
    pub personal_image: String,
    pub result_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let page = |route: &str, source: &str| PageRoute {
            route: route.to_owned(),
            source: PathBuf::from(source),
        };
        Self {
            content_root: PathBuf::from("app/static"),
            base_url: "https://prestonblackburn.com".to_owned(),
            pages: vec![
                page("videos", "content/videos/my-videos.md"),
                page("projects", "content/projects/projects-page.md"),
                page("consulting", "content/consulting/consulting-overview.md"),
                page("tools", "content/tools/my-tools.md"),
                page("about", "content/about/about.md"),
                page("contact", "content/contact/contact.md"),
                page("blogs", "content/blogs/summary.md"),
            ],
            blog_dir: PathBuf::from("content/blogs"),
            blog_summary: "summary.md".to_owned(),
            wiki: WikiConfig::default(),
        }
    }
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            topics: PathBuf::from("content/generated/generated_topics.txt"),
            section_bodies: PathBuf::from("content/generated/section_bodies.json"),
            personal_sections: PathBuf::from("content/generated/related_to_me.json"),
            book_refs: PathBuf::from("content/generated/book_refs.json"),
            article_refs: PathBuf::from("content/generated/article_refs.json"),
            facts: PathBuf::from("content/facts/alfred_hitchcock.json"),
            image_base: "/static/img/generated".to_owned(),
            personal_image: "/static/img/wiki/icons/placeholder_image.jpg".to_owned(),
            result_limit: crate::wiki::search::DEFAULT_LIMIT,
        }
    }
}

impl SiteConfig {
    /// Reads a YAML config; keys left out keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, else defaults; then applies `root` and env overrides.
    pub fn from_sources(path: Option<&Path>, root: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(root) = root {
            config.content_root = root.to_path_buf();
        }
        if let Some(base_url) = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
        {
            config.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.route.trim().is_empty() {
                anyhow::bail!("page route must not be empty");
            }
            if page.route.contains('/') {
                anyhow::bail!("page route must not contain '/': {}", page.route);
            }
            if RESERVED_ROUTES.contains(&page.route.as_str()) {
                anyhow::bail!("page route is reserved: {}", page.route);
            }
            if !seen.insert(page.route.as_str()) {
                anyhow::bail!("duplicate page route: {}", page.route);
            }
        }

        let url = url::Url::parse(&self.base_url)
            .with_context(|| format!("parse base_url: {}", self.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("base_url must be http/https: {}", self.base_url);
        }
        Ok(())
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.content_root.join(path)
        }
    }

    pub fn page_source(&self, route: &str) -> Option<PathBuf> {
        self.pages
            .iter()
            .find(|page| page.route == route)
            .map(|page| self.resolve(&page.source))
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.resolve(&self.blog_dir)
    }

    /// Origin without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn wiki_paths(&self) -> WikiPaths {
        WikiPaths {
            topics: self.resolve(&self.wiki.topics),
            section_bodies: self.resolve(&self.wiki.section_bodies),
            personal_sections: self.resolve(&self.wiki.personal_sections),
            book_refs: self.resolve(&self.wiki.book_refs),
            article_refs: self.resolve(&self.wiki.article_refs),
            facts: self.resolve(&self.wiki.facts),
            personal_image: self.wiki.personal_image.clone(),
        }
    }
}
