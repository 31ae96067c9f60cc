use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::wiki::error::WikiError;

const SEPARATORS: [char; 4] = [' ', '-', ',', '/'];

/// Lookup key shared by every topic-keyed store.
///
/// Built only through [`normalize_topic`], so two stores can never disagree on how a raw
/// topic name maps to its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TopicKey(String);

impl TopicKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Replaces spaces, hyphens, commas and slashes with underscores.
///
/// Idempotent: the output contains none of the replaced characters.
pub fn normalize_topic(topic: &str) -> TopicKey {
    TopicKey(topic.replace(SEPARATORS, "_"))
}

/// Display form of a topic as it appears in a URL (`Machine_Learning` -> `Machine Learning`).
pub fn display_title(topic: &str) -> String {
    topic.replace('_', " ")
}

/// Fails when two distinct raw names share a normalized key.
///
/// Exact duplicates are not collisions; the topic list is never deduplicated.
pub fn check_topic_collisions<'a, I>(topics: I) -> Result<(), WikiError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<TopicKey, &'a str> = HashMap::new();
    for topic in topics {
        let key = normalize_topic(topic);
        match seen.get(&key) {
            Some(first) if *first != topic => {
                return Err(WikiError::TopicKeyCollision {
                    key: key.to_string(),
                    first: (*first).to_owned(),
                    second: topic.to_owned(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(key, topic);
            }
        }
    }
    Ok(())
}
