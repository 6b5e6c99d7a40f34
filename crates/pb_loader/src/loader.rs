use futures::future::join_all;
use pb_core::config::DEFAULT_INDEX_PATH;
use pb_core::reading_time::DEFAULT_WORDS_PER_MINUTE;
use pb_core::{AnimationData, Article, ContentIndex, Error, Result, SiteConfig};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::source::{create_source, ContentSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub index_path: String,
    pub words_per_minute: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            index_path: DEFAULT_INDEX_PATH.to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl From<&SiteConfig> for LoaderConfig {
    fn from(config: &SiteConfig) -> Self {
        Self {
            index_path: config.index_path.clone(),
            words_per_minute: config.words_per_minute,
        }
    }
}

/// Everything the landing page shows.
#[derive(Debug, Clone)]
pub struct LandingView {
    pub articles: Vec<Article>,
    /// Animations keyed by slug. Articles whose animation failed to load are absent.
    pub animations: HashMap<String, AnimationData>,
}

impl LandingView {
    pub fn animation_for(&self, article: &Article) -> Option<&AnimationData> {
        self.animations.get(&article.slug)
    }

    pub fn cards(&self) -> impl Iterator<Item = (&Article, Option<&AnimationData>)> {
        self.articles.iter().map(move |a| (a, self.animation_for(a)))
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub article: Article,
    pub animation: AnimationData,
}

pub struct ContentLoader {
    source: Arc<dyn ContentSource>,
    config: LoaderConfig,
}

impl ContentLoader {
    pub fn new(source: Arc<dyn ContentSource>, config: LoaderConfig) -> Self {
        Self { source, config }
    }

    pub fn from_site_config(config: &SiteConfig) -> Result<Self> {
        Ok(Self::new(create_source(&config.source)?, LoaderConfig::from(config)))
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Fetches the content index. Reading times are left as published.
    pub async fn load_index(&self) -> Result<ContentIndex> {
        let value = self.source.fetch_json(&self.config.index_path).await?;
        if value.get("variations").is_none() {
            return Err(Error::Format("missing `variations` collection".to_string()));
        }
        let index: ContentIndex = serde_json::from_value(value)
            .map_err(|e| Error::Format(format!("{}: {}", self.config.index_path, e)))?;
        info!(
            "📚 Loaded {} articles from {}",
            index.variations.len(),
            self.source.describe()
        );
        Ok(index)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Article> {
        if slug.trim().is_empty() {
            return Err(Error::InvalidSlug);
        }
        let index = self.load_index().await?;
        index
            .find(slug)
            .cloned()
            .map(|a| a.with_reading_time(self.config.words_per_minute))
            .ok_or_else(|| Error::NotFound(slug.to_string()))
    }

    pub async fn load_animation(&self, path: &str) -> Result<AnimationData> {
        if path.trim().is_empty() {
            return Err(Error::Format("article has no animation path".to_string()));
        }
        let value = self.source.fetch_json(path).await?;
        Ok(AnimationData::new(value))
    }

    /// Loads every article and, concurrently, every article's animation.
    ///
    /// A failed animation only costs that card its animation; a failed index
    /// fetch fails the whole view.
    pub async fn load_landing(&self) -> Result<LandingView> {
        let index = self.load_index().await?;
        let wpm = self.config.words_per_minute;
        let articles: Vec<Article> = index
            .variations
            .into_iter()
            .map(|a| a.with_reading_time(wpm))
            .collect();

        let animation_futures: Vec<_> = articles
            .iter()
            .map(|article| async move {
                match self.load_animation(&article.lottie).await {
                    Ok(data) => Some((article.slug.clone(), data)),
                    Err(e) => {
                        warn!("⚠️ Animation for {} failed to load: {}", article.slug, e);
                        None
                    }
                }
            })
            .collect();

        let animations: HashMap<_, _> = join_all(animation_futures).await.into_iter().flatten().collect();
        info!("🎞️ Loaded {}/{} animations", animations.len(), articles.len());

        Ok(LandingView { articles, animations })
    }

    /// Loads one article and its animation; either failing fails the view.
    pub async fn load_detail(&self, slug: &str) -> Result<DetailView> {
        let article = self.find_by_slug(slug).await?;
        let animation = self.load_animation(&article.lottie).await.map_err(|e| {
            warn!("⚠️ Animation for {} failed to load: {}", slug, e);
            e
        })?;
        Ok(DetailView { article, animation })
    }

    /// Case-insensitive match on heading, subheading and tags.
    ///
    /// Returns `None` for a blank query, in which case no index fetch happens.
    pub async fn search(&self, query: &str) -> Result<Option<Vec<Article>>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let index = self.load_index().await?;
        let wpm = self.config.words_per_minute;
        let hits = index
            .variations
            .into_iter()
            .filter(|a| {
                a.heading.to_lowercase().contains(&needle)
                    || a.sub_heading.to_lowercase().contains(&needle)
                    || a.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .map(|a| a.with_reading_time(wpm))
            .collect();
        Ok(Some(hits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockSource {
        documents: HashMap<String, serde_json::Value>,
        fetches: AtomicUsize,
    }

    impl MockSource {
        fn new(documents: Vec<(&str, serde_json::Value)>) -> Arc<Self> {
            Arc::new(Self {
                documents: documents.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ContentSource for MockSource {
        async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.documents.get(path).cloned().ok_or_else(|| Error::Status {
                path: path.to_string(),
                status: 404,
            })
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    fn index() -> serde_json::Value {
        json!({
            "variations": [
                { "id": 1, "slug": "a", "heading": "H", "subHeading": "First", "lottie": "/lottie/a.json",
                  "description": "short text", "tags": ["Python"] },
                { "id": 2, "slug": "b", "heading": "Second", "subHeading": "Deep Learning basics",
                  "lottie": "/lottie/b.json", "readTime": "9 min read" },
                { "id": 3, "slug": "c", "heading": "Third", "lottie": "/lottie/missing.json" }
            ]
        })
    }

    fn loader(source: Arc<MockSource>) -> ContentLoader {
        ContentLoader::new(source, LoaderConfig::default())
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let source = MockSource::new(vec![("/data.json", index())]);
        let article = loader(source).find_by_slug("a").await.unwrap();
        assert_eq!(article.heading, "H");
        assert_eq!(article.sub_heading, "First");
        assert_eq!(article.read_time.as_deref(), Some("1 min read"));
    }

    #[tokio::test]
    async fn test_missing_slug_is_not_found() {
        let source = MockSource::new(vec![("/data.json", index())]);
        let err = loader(source).find_by_slug("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(ref s) if s == "missing"));
    }

    #[tokio::test]
    async fn test_blank_slug_is_invalid() {
        let source = MockSource::new(vec![("/data.json", index())]);
        let loader = loader(source.clone());
        assert!(matches!(loader.find_by_slug(" ").await, Err(Error::InvalidSlug)));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_index_without_collection_is_format_error() {
        let source = MockSource::new(vec![("/data.json", json!({ "posts": [] }))]);
        let err = loader(source).load_index().await.unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[tokio::test]
    async fn test_record_missing_field_is_format_error() {
        let source = MockSource::new(vec![("/data.json", json!({ "variations": [{ "slug": "x" }] }))]);
        let err = loader(source).load_index().await.unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[tokio::test]
    async fn test_record_without_id_is_format_error() {
        let source = MockSource::new(vec![(
            "/data.json",
            json!({ "variations": [
                { "slug": "a", "heading": "A", "lottie": "/lottie/a.json" },
                { "slug": "b", "heading": "B", "lottie": "/lottie/b.json" }
            ] }),
        )]);
        let loader = loader(source);
        assert!(matches!(loader.load_index().await, Err(Error::Format(_))));
        assert!(matches!(loader.find_by_slug("a").await, Err(Error::Format(_))));
    }

    #[tokio::test]
    async fn test_landing_tolerates_failed_animations() {
        let source = MockSource::new(vec![
            ("/data.json", index()),
            ("/lottie/a.json", json!({ "nm": "A" })),
            ("/lottie/b.json", json!({ "nm": "B" })),
        ]);
        let view = loader(source.clone()).load_landing().await.unwrap();
        assert_eq!(view.articles.len(), 3);
        assert_eq!(view.animations.len(), 2);
        let cards: Vec<_> = view.cards().map(|(a, anim)| (a.slug.as_str(), anim.is_some())).collect();
        assert_eq!(cards, vec![("a", true), ("b", true), ("c", false)]);
        assert_eq!(view.articles[1].read_time.as_deref(), Some("9 min read"));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_landing_fails_when_index_fails() {
        let source = MockSource::new(vec![]);
        let err = loader(source).load_landing().await.unwrap_err();
        assert!(matches!(err, Error::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_detail_requires_animation() {
        let source = MockSource::new(vec![("/data.json", index()), ("/lottie/a.json", json!({ "nm": "A" }))]);
        let loader = loader(source);

        let view = loader.load_detail("a").await.unwrap();
        assert_eq!(view.article.heading, "H");
        assert_eq!(view.animation.name(), Some("A"));

        let err = loader.load_detail("c").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!err.is_not_found());

        let err = loader.load_detail("zzz").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search() {
        let source = MockSource::new(vec![("/data.json", index())]);
        let loader = loader(source.clone());

        assert!(loader.search("   ").await.unwrap().is_none());
        assert_eq!(source.fetches.load(Ordering::SeqCst), 0);

        let hits = loader.search("deep").await.unwrap().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "b");

        let hits = loader.search("python").await.unwrap().unwrap();
        assert_eq!(hits[0].slug, "a");
    }
}
