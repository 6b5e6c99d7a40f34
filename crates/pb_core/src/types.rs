use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::reading_time;

/// Article identifier as it appears in the content index.
///
/// Older documents carry numeric ids, newer ones strings; both collapse to
/// the same textual form so bookmarks keep working across either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ArticleId(n.to_string()),
            RawId::Text(s) => ArticleId(s),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Warning and alert blocks share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    #[serde(default)]
    pub title: Option<String>,
    pub text: String,
}

/// Case studies and success stories share one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub outcome: Option<String>,
}

/// A borrowed view of one optional block attached to an article.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enrichment<'a> {
    Quote(&'a Quote),
    Statistic(&'a Statistic),
    Warning(&'a Callout),
    CaseStudy(&'a Story),
    SuccessStory(&'a Story),
    Alert(&'a Callout),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub slug: String,
    pub heading: String,
    #[serde(default)]
    pub sub_heading: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sub_heading2: String,
    #[serde(default)]
    pub description2: String,
    #[serde(default)]
    pub list: Vec<String>,
    #[serde(default)]
    pub sub_heading3: String,
    #[serde(default)]
    pub description3: String,
    #[serde(default)]
    pub list2: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default)]
    pub lottie: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistic: Option<Statistic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<Callout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study: Option<Story>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_story: Option<Story>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert: Option<Callout>,
}

impl Article {
    /// Text the reading-time estimate is computed from.
    pub fn reading_text(&self) -> String {
        format!("{} {} {}", self.description, self.description2, self.description3)
    }

    /// Returns the record with `read_time` filled in, keeping an explicit value.
    pub fn with_reading_time(mut self, words_per_minute: u32) -> Self {
        let missing = self.read_time.as_deref().map_or(true, |t| t.trim().is_empty());
        if missing {
            let estimate = reading_time::estimate(&self.reading_text(), words_per_minute);
            self.read_time = Some(estimate.to_string());
        }
        self
    }

    pub fn published_on(&self) -> Option<NaiveDate> {
        let raw = self.published_date.trim();
        ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y"]
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    }

    pub fn enrichments(&self) -> Vec<Enrichment<'_>> {
        let mut blocks = Vec::new();
        if let Some(q) = &self.quote {
            blocks.push(Enrichment::Quote(q));
        }
        if let Some(s) = &self.statistic {
            blocks.push(Enrichment::Statistic(s));
        }
        if let Some(w) = &self.warning {
            blocks.push(Enrichment::Warning(w));
        }
        if let Some(c) = &self.case_study {
            blocks.push(Enrichment::CaseStudy(c));
        }
        if let Some(s) = &self.success_story {
            blocks.push(Enrichment::SuccessStory(s));
        }
        if let Some(a) = &self.alert {
            blocks.push(Enrichment::Alert(a));
        }
        blocks
    }
}

/// Vector-animation document handed to a playback surface untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationData(serde_json::Value);

impl AnimationData {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The animation's `nm` field, when present.
    pub fn name(&self) -> Option<&str> {
        self.0.get("nm").and_then(|v| v.as_str())
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIndex {
    pub variations: Vec<Article>,
}

impl ContentIndex {
    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.variations.iter().find(|a| a.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": 7,
            "slug": "intro-to-ml",
            "heading": "Intro to ML",
            "subHeading": "Where to begin",
            "description": "one two three",
            "subHeading2": "Tools",
            "description2": "four five",
            "list": ["numpy", "pandas"],
            "subHeading3": "Next",
            "description3": "six",
            "list2": ["practice"],
            "tags": ["ML"],
            "publishedDate": "2024-03-15",
            "lottie": "/lottie/ml.json",
            "quote": { "text": "Data beats opinions." }
        })
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let article: Article = serde_json::from_value(sample()).unwrap();
        assert_eq!(article.id.as_str(), "7");

        let mut raw = sample();
        raw["id"] = json!("post-7");
        let article: Article = serde_json::from_value(raw).unwrap();
        assert_eq!(article.id, ArticleId::from("post-7"));
    }

    #[test]
    fn test_wire_field_names() {
        let article: Article = serde_json::from_value(sample()).unwrap();
        assert_eq!(article.sub_heading, "Where to begin");
        assert_eq!(article.sub_heading2, "Tools");
        assert_eq!(article.list2, vec!["practice".to_string()]);
        assert_eq!(article.reading_text(), "one two three four five six");
    }

    #[test]
    fn test_minimal_record_defaults() {
        let article: Article = serde_json::from_value(json!({
            "id": 7,
            "slug": "a",
            "heading": "H"
        }))
        .unwrap();
        assert_eq!(article.id.as_str(), "7");
        assert_eq!(article.heading, "H");
        assert!(article.tags.is_empty());
        assert!(article.lottie.is_empty());
        assert!(article.read_time.is_none());
        assert!(article.enrichments().is_empty());
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        let err = serde_json::from_value::<Article>(json!({ "slug": "a", "heading": "A" })).unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_distinct_records_keep_distinct_bookmarks() {
        let a: Article = serde_json::from_value(json!({ "id": 1, "slug": "a", "heading": "A" })).unwrap();
        let b: Article = serde_json::from_value(json!({ "id": "2", "slug": "b", "heading": "B" })).unwrap();
        let mut set = crate::BookmarkSet::new();
        assert!(set.toggle(&a.id));
        assert!(set.contains(&a.id));
        assert!(!set.contains(&b.id));
    }

    #[test]
    fn test_with_reading_time_keeps_explicit_value() {
        let mut raw = sample();
        raw["readTime"] = json!("12 min read");
        let article: Article = serde_json::from_value(raw).unwrap();
        let article = article.with_reading_time(200);
        assert_eq!(article.read_time.as_deref(), Some("12 min read"));
    }

    #[test]
    fn test_with_reading_time_fills_missing_value() {
        let article: Article = serde_json::from_value(sample()).unwrap();
        let article = article.with_reading_time(200);
        assert_eq!(article.read_time.as_deref(), Some("1 min read"));
    }

    #[test]
    fn test_published_on_formats() {
        let mut article: Article = serde_json::from_value(sample()).unwrap();
        assert_eq!(article.published_on(), NaiveDate::from_ymd_opt(2024, 3, 15));

        article.published_date = "March 5, 2023".to_string();
        assert_eq!(article.published_on(), NaiveDate::from_ymd_opt(2023, 3, 5));

        article.published_date = "someday".to_string();
        assert_eq!(article.published_on(), None);
    }

    #[test]
    fn test_enrichments_order() {
        let mut raw = sample();
        raw["alert"] = json!({ "text": "Deprecated API" });
        raw["statistic"] = json!({ "value": "87%", "label": "of projects fail" });
        let article: Article = serde_json::from_value(raw).unwrap();
        let blocks = article.enrichments();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Enrichment::Quote(_)));
        assert!(matches!(blocks[1], Enrichment::Statistic(_)));
        assert!(matches!(blocks[2], Enrichment::Alert(_)));
    }

    #[test]
    fn test_animation_name() {
        let data = AnimationData::new(json!({ "v": "5.7.4", "nm": "Rocket", "layers": [] }));
        assert_eq!(data.name(), Some("Rocket"));
        assert_eq!(AnimationData::new(json!({})).name(), None);
    }
}
