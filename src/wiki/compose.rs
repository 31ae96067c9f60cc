use std::sync::Arc;

use rand::Rng;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom as _;
use serde::Serialize;

use crate::wiki::assemble::assemble;
use crate::wiki::error::WikiError;
use crate::wiki::model::{PersonalSection, Section};
use crate::wiki::reference::merge_references;
use crate::wiki::search::{DEFAULT_LIMIT, SearchHit, Thumbnail, search_topics, thumbnails_for};
use crate::wiki::store::TopicStore;
use crate::wiki::topic::{display_title, normalize_topic};

pub const SEE_ALSO_MIN: usize = 3;
pub const SEE_ALSO_MAX: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeeAlsoLink {
    pub title: String,
    pub href: String,
}

/// Everything the topic page template needs.
#[derive(Debug, Clone, Serialize)]
pub struct TopicPage {
    pub title: String,
    pub overview_title: String,
    pub overview_image_link: String,
    pub overview_image_caption: String,
    pub overview_content: String,
    pub section_data: Vec<Section>,
    pub personal_section: PersonalSection,
    pub see_also: Vec<SeeAlsoLink>,
    pub refs: Vec<String>,
    /// References dropped because their record failed validation.
    pub skipped_refs: usize,
    /// Structured-data copy of the hidden token.
    pub metadata: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResultsPage {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub thumbnails: Vec<Thumbnail>,
}

#[derive(Clone)]
pub struct PageComposer {
    store: Arc<dyn TopicStore>,
    image_base: String,
    result_limit: usize,
}

impl PageComposer {
    pub fn new(store: Arc<dyn TopicStore>, image_base: impl Into<String>) -> Self {
        Self {
            store,
            image_base: image_base.into(),
            result_limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    pub fn store(&self) -> &dyn TopicStore {
        self.store.as_ref()
    }

    pub async fn render_topic_page(&self, topic: &str) -> Result<TopicPage, WikiError> {
        let mut rng = StdRng::from_entropy();
        self.render_topic_page_with(topic, &mut rng).await
    }

    pub async fn render_topic_page_with<R: Rng + Send>(
        &self,
        topic: &str,
        rng: &mut R,
    ) -> Result<TopicPage, WikiError> {
        let store = self.store.as_ref();

        let pool = store.fact_pool().await?;
        let token = pool.choose(&mut *rng).ok_or(WikiError::EmptyFactPool)?;
        let assembled = assemble(store, topic, &self.image_base, &token).await?;

        let personal_section = store.personal_section_for(topic).await?;
        let topics = store.list_topics().await?;
        let see_also = sample_see_also(&topics, rng);

        let books = store.book_refs_for(topic).await?;
        let articles = store.article_refs_for(topic).await?;
        let skipped_refs = books.rejected.len() + articles.rejected.len();
        if skipped_refs > 0 {
            tracing::warn!(topic, skipped_refs, "rendering page without malformed references");
        }
        let refs = merge_references(&books.records, &articles.records);

        tracing::debug!(
            topic,
            sections = assembled.rest.len() + 1,
            see_also = see_also.len(),
            refs = refs.len(),
            "composed topic page"
        );

        let overview = assembled.overview;
        Ok(TopicPage {
            title: display_title(topic),
            overview_image_caption: format!(
                "A diagram representation of {topic} and {}",
                overview.section_title
            ),
            overview_title: overview.section_title,
            overview_image_link: overview.section_image_link,
            overview_content: overview.section_content,
            section_data: assembled.rest,
            personal_section,
            see_also,
            refs,
            skipped_refs,
            metadata: token.structured,
        })
    }

    pub async fn render_search_results(
        &self,
        query: &str,
    ) -> Result<SearchResultsPage, WikiError> {
        tracing::info!(query, "searching topics");
        let hits = search_topics(self.store.as_ref(), query, self.result_limit).await?;
        let thumbnails = thumbnails_for(self.store.as_ref(), &hits, &self.image_base).await?;
        Ok(SearchResultsPage {
            query: query.to_owned(),
            hits,
            thumbnails,
        })
    }
}

/// Uniform sample of 3 to 8 topics without replacement, capped at the list size.
///
/// The current topic is not excluded.
pub fn sample_see_also<R: Rng>(topics: &[String], rng: &mut R) -> Vec<SeeAlsoLink> {
    let amount = rng.gen_range(SEE_ALSO_MIN..=SEE_ALSO_MAX).min(topics.len());
    topics
        .choose_multiple(rng, amount)
        .map(|topic| SeeAlsoLink {
            title: topic.clone(),
            href: format!("/wiki/{}", normalize_topic(topic)),
        })
        .collect()
}
