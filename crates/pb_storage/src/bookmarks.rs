use pb_core::config::DEFAULT_BOOKMARK_KEY;
use pb_core::{ArticleId, BookmarkSet, LocalStorage, Result};
use std::sync::Arc;
use tracing::info;

/// Reads and writes the bookmark set under a single storage key.
pub struct BookmarkManager {
    storage: Arc<dyn LocalStorage>,
    key: String,
}

impl BookmarkManager {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self::with_key(storage, DEFAULT_BOOKMARK_KEY)
    }

    pub fn with_key(storage: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub async fn load(&self) -> Result<BookmarkSet> {
        match self.storage.get_item(&self.key).await? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(BookmarkSet::new()),
        }
    }

    pub async fn save(&self, set: &BookmarkSet) -> Result<()> {
        let raw = serde_json::to_string(set)?;
        self.storage.set_item(&self.key, &raw).await
    }

    /// Flips `id`, persists the result, and returns whether it is now bookmarked.
    pub async fn toggle(&self, id: &ArticleId) -> Result<bool> {
        let mut set = self.load().await?;
        let bookmarked = set.toggle(id);
        self.save(&set).await?;
        info!(
            "{} {}",
            if bookmarked { "🔖 Bookmarked" } else { "🗑️ Removed bookmark" },
            id
        );
        Ok(bookmarked)
    }

    pub async fn is_bookmarked(&self, id: &ArticleId) -> Result<bool> {
        Ok(self.load().await?.contains(id))
    }
}
