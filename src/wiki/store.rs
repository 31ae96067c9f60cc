use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::fs;

use crate::markdown::render_markdown;
use crate::wiki::error::WikiError;
use crate::wiki::model::{
    ArticleReference, BookReference, PERSONAL_SECTION_TITLE, PersonalSection, ReferenceSet,
    RejectedReference, Section,
};
use crate::wiki::token::FactPool;
use crate::wiki::topic::{TopicKey, normalize_topic};

/// Read-only access to the wiki's data files.
///
/// Every call goes back to the source; nothing is cached between calls.
#[async_trait]
pub trait TopicStore: Send + Sync {
    async fn list_topics(&self) -> Result<Vec<String>, WikiError>;
    async fn sections_for(&self, topic: &str, image_base: &str)
    -> Result<Vec<Section>, WikiError>;
    async fn personal_section_for(&self, topic: &str) -> Result<PersonalSection, WikiError>;
    async fn book_refs_for(&self, topic: &str)
    -> Result<ReferenceSet<BookReference>, WikiError>;
    async fn article_refs_for(
        &self,
        topic: &str,
    ) -> Result<ReferenceSet<ArticleReference>, WikiError>;
    async fn fact_pool(&self) -> Result<FactPool, WikiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPaths {
    /// Newline-delimited topic names.
    pub topics: PathBuf,
    pub section_bodies: PathBuf,
    pub personal_sections: PathBuf,
    pub book_refs: PathBuf,
    pub article_refs: PathBuf,
    pub facts: PathBuf,
    pub personal_image: String,
}

#[derive(Debug, Clone)]
pub struct LocalFsTopicStore {
    paths: WikiPaths,
}

impl LocalFsTopicStore {
    pub fn new(paths: WikiPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &WikiPaths {
        &self.paths
    }

    async fn load_reference_set<T: DeserializeOwned>(
        &self,
        path: &Path,
        topic: &str,
        kind: &'static str,
    ) -> Result<ReferenceSet<T>, WikiError> {
        let value = lookup_topic(path, topic).await?;
        let Value::Array(items) = value else {
            return Err(WikiError::Shape {
                path: path.to_path_buf(),
                message: format!("references for {topic} must be an array"),
            });
        };

        let mut set = ReferenceSet::default();
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<T>(item) {
                Ok(record) => set.records.push(record),
                Err(err) => {
                    let err = WikiError::MalformedReference {
                        topic: topic.to_owned(),
                        kind,
                        index,
                        reason: err.to_string(),
                    };
                    tracing::warn!(%err, "skipping reference");
                    set.rejected.push(RejectedReference {
                        index,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(set)
    }
}

#[async_trait]
impl TopicStore for LocalFsTopicStore {
    async fn list_topics(&self) -> Result<Vec<String>, WikiError> {
        let text = read_text(&self.paths.topics).await?;
        Ok(parse_topic_list(&text))
    }

    async fn sections_for(
        &self,
        topic: &str,
        image_base: &str,
    ) -> Result<Vec<Section>, WikiError> {
        let path = &self.paths.section_bodies;
        let Value::Object(sections) = lookup_topic(path, topic).await? else {
            return Err(WikiError::Shape {
                path: path.clone(),
                message: format!("sections for {topic} must be an object"),
            });
        };

        sections
            .into_iter()
            .map(|(title, content)| {
                let Value::String(content) = content else {
                    return Err(WikiError::Shape {
                        path: path.clone(),
                        message: format!("section {title:?} of {topic} must be a string"),
                    });
                };
                Ok(Section {
                    section_image_link: Section::image_path(topic, &title, image_base),
                    section_content: render_markdown(&content),
                    section_title: title,
                })
            })
            .collect()
    }

    async fn personal_section_for(&self, topic: &str) -> Result<PersonalSection, WikiError> {
        let path = &self.paths.personal_sections;
        let Value::String(content) = lookup_topic(path, topic).await? else {
            return Err(WikiError::Shape {
                path: path.clone(),
                message: format!("personal section for {topic} must be a string"),
            });
        };

        Ok(PersonalSection {
            section_title: PERSONAL_SECTION_TITLE.to_owned(),
            section_content: render_markdown(&content),
            section_image_link: self.paths.personal_image.clone(),
        })
    }

    async fn book_refs_for(
        &self,
        topic: &str,
    ) -> Result<ReferenceSet<BookReference>, WikiError> {
        self.load_reference_set(&self.paths.book_refs, topic, "book")
            .await
    }

    async fn article_refs_for(
        &self,
        topic: &str,
    ) -> Result<ReferenceSet<ArticleReference>, WikiError> {
        self.load_reference_set(&self.paths.article_refs, topic, "article")
            .await
    }

    async fn fact_pool(&self) -> Result<FactPool, WikiError> {
        let pool: FactPool = read_json(&self.paths.facts).await?;
        if pool.facts.is_empty() {
            tracing::error!(path = %self.paths.facts.display(), "fact pool is empty");
            return Err(WikiError::EmptyFactPool);
        }
        Ok(pool)
    }
}

/// One topic per line in file order. Blank lines are skipped, duplicates kept.
pub fn parse_topic_list(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

async fn read_text(path: &Path) -> Result<String, WikiError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| WikiError::Io {
            path: path.to_path_buf(),
            source,
        })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, WikiError> {
    let text = read_text(path).await?;
    serde_json::from_str(&text).map_err(|source| WikiError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a topic-keyed JSON object and takes the entry for `topic`.
async fn lookup_topic(path: &Path, topic: &str) -> Result<Value, WikiError> {
    let map: Map<String, Value> = read_json(path).await?;
    let mut keyed = normalize_keys(path, map)?;
    keyed
        .remove(&normalize_topic(topic))
        .ok_or_else(|| WikiError::UnknownTopic {
            topic: topic.to_owned(),
        })
}

/// Re-keys a store by normalized topic, rejecting raw keys that collide.
pub fn normalize_keys(
    path: &Path,
    map: Map<String, Value>,
) -> Result<HashMap<TopicKey, Value>, WikiError> {
    let mut raw_keys: HashMap<TopicKey, String> = HashMap::with_capacity(map.len());
    let mut keyed = HashMap::with_capacity(map.len());
    for (raw, value) in map {
        let key = normalize_topic(&raw);
        if let Some(first) = raw_keys.get(&key) {
            tracing::error!(path = %path.display(), %key, "topic key collision");
            return Err(WikiError::TopicKeyCollision {
                key: key.to_string(),
                first: first.clone(),
                second: raw,
            });
        }
        raw_keys.insert(key.clone(), raw);
        keyed.insert(key, value);
    }
    Ok(keyed)
}
