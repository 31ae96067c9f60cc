//! Batch commands behind the `mdsite` binary.

use std::sync::Arc;

use anyhow::Context as _;

use crate::cli::{SitemapArgs, WikiPageArgs, WikiSearchArgs};
use crate::config::SiteConfig;
use crate::wiki::topic::check_topic_collisions;
use crate::wiki::{LocalFsTopicStore, PageComposer, TopicStore as _};

pub async fn sitemap(config: &SiteConfig, args: SitemapArgs) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let urls = crate::sitemap::write(config, &args.out, today).await?;
    println!("{urls} urls -> {}", args.out.display());
    Ok(())
}

pub async fn topics_check(config: &SiteConfig) -> anyhow::Result<()> {
    let store = LocalFsTopicStore::new(config.wiki_paths());
    let topics = store.list_topics().await.context("load topic list")?;
    check_topic_collisions(topics.iter().map(String::as_str))?;
    tracing::info!(topics = topics.len(), "topic keys are unique");
    println!("ok: {} topics", topics.len());
    Ok(())
}

pub async fn wiki_page(config: &SiteConfig, args: WikiPageArgs) -> anyhow::Result<()> {
    let page = composer(config)
        .render_topic_page(&args.topic)
        .await
        .with_context(|| format!("compose topic page: {}", args.topic))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}

pub async fn wiki_search(config: &SiteConfig, args: WikiSearchArgs) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(config.wiki.result_limit);
    let results = composer(config)
        .with_result_limit(limit)
        .render_search_results(&args.query)
        .await?;
    println!("{}", serde_json::to_string_pretty(&results.hits)?);
    Ok(())
}

pub fn composer(config: &SiteConfig) -> PageComposer {
    let store = LocalFsTopicStore::new(config.wiki_paths());
    PageComposer::new(Arc::new(store), config.wiki.image_base.clone())
        .with_result_limit(config.wiki.result_limit)
}
