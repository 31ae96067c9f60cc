use serde::Serialize;

use crate::wiki::error::WikiError;
use crate::wiki::fuzzy::{default_process, weighted_ratio};
use crate::wiki::store::TopicStore;
use crate::wiki::topic::normalize_topic;

pub const DEFAULT_LIMIT: usize = 10;
pub const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub topic: String,
    pub score: f64,
    /// 1-based position in the result list.
    pub rank: usize,
    /// Position of the topic in the topic list.
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumbnail {
    /// Normalized topic, used as the link target.
    pub src: String,
    pub title: String,
    pub image: String,
    pub overview: String,
}

/// Scores every topic against `query` and keeps the best `limit`.
///
/// Equal scores keep topic-list order. Fewer than `limit` topics are returned as-is, never
/// padded.
pub fn rank_topics(
    query: &str,
    topics: &[String],
    limit: usize,
) -> Result<Vec<SearchHit>, WikiError> {
    if query.trim().is_empty() {
        return Err(WikiError::EmptyQuery);
    }
    // May be empty for punctuation-only input; every topic then scores 0.
    let query = default_process(query);

    let mut scored: Vec<(usize, f64)> = topics
        .iter()
        .enumerate()
        .map(|(index, topic)| (index, weighted_ratio(&query, &default_process(topic))))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(pos, (index, score))| SearchHit {
            topic: topics[index].clone(),
            score,
            rank: pos + 1,
            index,
        })
        .collect())
}

pub async fn search_topics(
    store: &dyn TopicStore,
    query: &str,
    limit: usize,
) -> Result<Vec<SearchHit>, WikiError> {
    if query.trim().is_empty() {
        return Err(WikiError::EmptyQuery);
    }
    let topics = store.list_topics().await?;
    let hits = rank_topics(query, &topics, limit)?;
    tracing::debug!(query, hits = hits.len(), "ranked topics");
    Ok(hits)
}

/// Builds a preview card per hit from that topic's overview section.
pub async fn thumbnails_for(
    store: &dyn TopicStore,
    hits: &[SearchHit],
    image_base: &str,
) -> Result<Vec<Thumbnail>, WikiError> {
    let mut thumbnails = Vec::with_capacity(hits.len());
    for hit in hits {
        let sections = store
            .sections_for(&hit.topic, image_base)
            .await
            .inspect_err(|err| {
                if err.is_not_found() {
                    tracing::warn!(topic = %hit.topic, "search hit has no section data");
                }
            })?;
        let Some(overview) = sections.into_iter().next() else {
            return Err(WikiError::EmptySectionList {
                topic: hit.topic.clone(),
            });
        };
        thumbnails.push(Thumbnail {
            src: normalize_topic(&hit.topic).to_string(),
            title: hit.topic.clone(),
            image: overview.section_image_link,
            overview: truncate_preview(&overview.section_content, PREVIEW_CHARS),
        });
    }
    Ok(thumbnails)
}

/// First `max_chars` chars followed by `...`.
///
/// Counts chars, not bytes, so multi-byte text is never split; HTML tags may still be cut.
pub fn truncate_preview(html: &str, max_chars: usize) -> String {
    let mut out: String = html.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
