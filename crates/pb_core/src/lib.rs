pub mod bookmarks;
pub mod config;
pub mod error;
pub mod reading_time;
pub mod site;
pub mod storage;
pub mod types;

pub use bookmarks::BookmarkSet;
pub use config::SiteConfig;
pub use error::{Error, Result};
pub use reading_time::{estimate as estimate_reading_time, ReadingTime};
pub use storage::LocalStorage;
pub use types::{AnimationData, Article, ArticleId, ContentIndex, Enrichment};
