//! Generated topic pages: topic store, citations, section layout, fuzzy search and the page
//! composer that ties them together.

pub mod assemble;
pub mod compose;
pub mod error;
pub mod fuzzy;
pub mod model;
pub mod reference;
pub mod search;
pub mod store;
pub mod token;
pub mod topic;

#[cfg(test)]
pub(crate) mod fixtures;

pub use compose::{PageComposer, SearchResultsPage, TopicPage};
pub use error::WikiError;
pub use store::{LocalFsTopicStore, TopicStore, WikiPaths};
pub use topic::{TopicKey, normalize_topic};
