use std::path::PathBuf;

use crate::reading_time::DEFAULT_WORDS_PER_MINUTE;

pub const DEFAULT_INDEX_PATH: &str = "/data.json";
pub const DEFAULT_BOOKMARK_KEY: &str = "pb:bookmarks";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL or directory the content index and animations are served from.
    pub source: String,
    pub index_path: String,
    pub words_per_minute: u32,
    pub storage: String,
    pub storage_path: PathBuf,
    pub bookmark_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: "public".to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            storage: "file".to_string(),
            storage_path: PathBuf::from("local_storage.json"),
            bookmark_key: DEFAULT_BOOKMARK_KEY.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_words_per_minute(mut self, wpm: u32) -> Self {
        self.words_per_minute = wpm;
        self
    }

    pub fn with_storage(mut self, kind: impl Into<String>, path: Option<PathBuf>) -> Self {
        self.storage = kind.into();
        if let Some(path) = path {
            self.storage_path = path;
        }
        self
    }
}
