use pb_core::{Error, LocalStorage, Result};
use std::path::Path;
use std::sync::Arc;

pub mod backends;
pub mod bookmarks;

pub use backends::*;
pub use bookmarks::BookmarkManager;

pub trait StorageBackend: LocalStorage {
    fn get_error_message() -> &'static str;
}

/// Opens the named local-storage backend (`memory` or `file`).
pub async fn create_storage(kind: &str, path: &Path) -> Result<Arc<dyn LocalStorage>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStorage::new())),
        "file" => {
            let storage = FileStorage::open(path).await.map_err(|e| {
                Error::Storage(format!("{} ({})", FileStorage::get_error_message(), e))
            })?;
            Ok(Arc::new(storage))
        }
        other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{BookmarkManager, StorageBackend};
}
