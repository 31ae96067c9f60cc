use serde::Serialize;

use crate::wiki::error::WikiError;
use crate::wiki::model::Section;
use crate::wiki::store::TopicStore;
use crate::wiki::token::HiddenToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssembledSections {
    pub overview: Section,
    pub rest: Vec<Section>,
}

impl AssembledSections {
    /// Sections in their original order, overview first.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        std::iter::once(&self.overview).chain(self.rest.iter())
    }
}

/// Fetches a topic's sections and lays them out for the page.
pub async fn assemble(
    store: &dyn TopicStore,
    topic: &str,
    image_base: &str,
    token: &HiddenToken,
) -> Result<AssembledSections, WikiError> {
    let sections = store.sections_for(topic, image_base).await?;
    assemble_sections(topic, sections, image_base, token)
}

/// Recomputes every image path and appends the token fragment to the last section.
///
/// The token always lands in the positionally last section, which is the overview itself
/// when the topic has a single section.
pub fn assemble_sections(
    topic: &str,
    mut sections: Vec<Section>,
    image_base: &str,
    token: &HiddenToken,
) -> Result<AssembledSections, WikiError> {
    for section in &mut sections {
        section.set_image_path(topic, image_base);
    }
    if let Some(last) = sections.last_mut() {
        last.section_content = format!("{} {}", last.section_content, token.html);
    }

    let mut sections = sections.into_iter();
    let Some(overview) = sections.next() else {
        return Err(WikiError::EmptySectionList {
            topic: topic.to_owned(),
        });
    };
    Ok(AssembledSections {
        overview,
        rest: sections.collect(),
    })
}
