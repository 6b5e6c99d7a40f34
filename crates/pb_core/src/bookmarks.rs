use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

use crate::types::ArticleId;

/// Articles the reader has bookmarked.
///
/// Persisted as a JSON object of `id -> true`. Entries stored as `false`
/// are treated as absent and dropped on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ids: BTreeSet<ArticleId>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `id` and returns whether it is now bookmarked.
    pub fn toggle(&mut self, id: &ArticleId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn contains(&self, id: &ArticleId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArticleId> {
        self.ids.iter()
    }
}

impl Serialize for BookmarkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let map: BTreeMap<&str, bool> = self.ids.iter().map(|id| (id.as_str(), true)).collect();
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BookmarkSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let map = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let ids = map
            .into_iter()
            .filter(|(_, present)| *present)
            .map(|(id, _)| ArticleId::new(id))
            .collect();
        Ok(Self { ids })
    }
}
