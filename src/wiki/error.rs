use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    #[error("unknown topic: {topic}")]
    UnknownTopic { topic: String },

    #[error("topic has no sections: {topic}")]
    EmptySectionList { topic: String },

    #[error("malformed {kind} reference #{index} for {topic}: {reason}")]
    MalformedReference {
        topic: String,
        kind: &'static str,
        index: usize,
        reason: String,
    },

    #[error("search query is empty")]
    EmptyQuery,

    #[error("fact pool is empty")]
    EmptyFactPool,

    #[error("topic names {first:?} and {second:?} both normalize to {key:?}")]
    TopicKeyCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected shape in {path}: {message}")]
    Shape { path: PathBuf, message: String },
}

impl WikiError {
    /// True for conditions the request layer reports as "page not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownTopic { .. })
    }
}
