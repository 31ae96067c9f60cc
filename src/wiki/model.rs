use serde::{Deserialize, Serialize};

use crate::wiki::topic::normalize_topic;

pub const PERSONAL_SECTION_TITLE: &str = "Related To Preston Blackburn";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub section_title: String,
    /// Rendered HTML.
    pub section_content: String,
    pub section_image_link: String,
}

impl Section {
    /// `{base_path}/{topic key}/{section key}.webp`
    pub fn image_path(topic: &str, section_title: &str, base_path: &str) -> String {
        format!(
            "{base_path}/{}/{}.webp",
            normalize_topic(topic),
            normalize_topic(section_title)
        )
    }

    pub fn set_image_path(&mut self, topic: &str, base_path: &str) {
        self.section_image_link = Self::image_path(topic, &self.section_title, base_path);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalSection {
    pub section_title: String,
    pub section_content: String,
    pub section_image_link: String,
}

/// Book citation as stored in `book_refs.json`.
///
/// Every field must be present; an empty string marks it as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookReference {
    pub authors: String,
    pub source_date: String,
    pub source_name: String,
    pub source_link: String,
    pub publisher: String,
    pub pages: String,
    pub isbn_number: String,
}

/// Web article citation as stored in `article_refs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArticleReference {
    pub reference_author: String,
    pub reference_title: String,
    pub reference_link: String,
    pub reference_source: String,
    pub reference_date: String,
    pub archive_link: String,
    pub archive_date: String,
    // The generated data files spell this key "retreived_date".
    #[serde(rename = "retreived_date", alias = "retrieved_date")]
    pub retrieved_date: String,
}

/// References for one topic plus the records that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSet<T> {
    pub records: Vec<T>,
    pub rejected: Vec<RejectedReference>,
}

impl<T> Default for ReferenceSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedReference {
    pub index: usize,
    pub reason: String,
}
