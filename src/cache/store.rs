// file: src/cache/store.rs
// description: Persistent on-disk cache of enrichment results keyed by repository name
// reference: whole-file json persistence

use crate::error::{PipelineError, Result};
use crate::models::EnrichmentResult;
use crate::models::enrichment::null_as_default;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// The on-disk field names (`llm_data`, `last_updated`) are kept so
/// existing cache files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "llm_data", default, deserialize_with = "null_as_default")]
    pub enrichment: EnrichmentResult,
    #[serde(rename = "last_updated", default, deserialize_with = "null_as_default")]
    pub timestamp: String,
}

impl CacheEntry {
    pub fn new(
        description: Option<String>,
        enrichment: EnrichmentResult,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            description,
            enrichment,
            timestamp: timestamp.into(),
        }
    }

    /// An entry is only reusable while the upstream description is unchanged.
    pub fn is_valid_for(&self, description: Option<&str>) -> bool {
        self.description.as_deref() == description
    }
}

pub struct CacheStore {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Never fails: a missing, unreadable or malformed file is an empty
    /// cache, and malformed entries are dropped individually.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(path);

        let contents = match fs::read_to_string(&store.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No existing cache file found at {:?}", store.path);
                return store;
            }
            Err(e) => {
                warn!("Failed to read cache {:?}, starting fresh: {}", store.path, e);
                return store;
            }
        };

        let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to parse cache {:?}, starting fresh: {}", store.path, e);
                return store;
            }
        };

        for (name, value) in raw {
            match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => {
                    store.entries.insert(name, entry);
                }
                Err(e) => warn!("Dropping malformed cache entry {}: {}", name, e),
            }
        }

        info!("Loaded {} cached enrichments", store.entries.len());
        store
    }

    /// Pretty-printed, non-ASCII text written as-is.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| PipelineError::FileOperation {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)?;

        fs::write(&self.path, contents)
            .await
            .map_err(|source| PipelineError::FileOperation {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved {} cache entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CacheEntry> {
        self.entries.get(name)
    }

    /// The entry for `name`, but only if it is still valid for `description`.
    pub fn lookup(&self, name: &str, description: Option<&str>) -> Option<&CacheEntry> {
        self.get(name).filter(|entry| entry.is_valid_for(description))
    }

    pub fn put(&mut self, name: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Drops entries whose name is not in `names`; returns how many went.
    pub fn retain_names(&mut self, names: &HashSet<&str>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|name, _| names.contains(name.as_str()));
        before - self.entries.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entry(description: Option<&str>, category: &str, enhanced: &str) -> CacheEntry {
        CacheEntry::new(
            description.map(str::to_string),
            EnrichmentResult::new(category, enhanced),
            "2025-01-01 12:00:00",
        )
    }

    #[tokio::test]
    async fn test_cache_round_trip_with_non_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("repo_data.json");

        {
            let mut store = CacheStore::load(&path).await;
            assert!(store.is_empty());
            store.put("alpha", entry(Some("A tool"), "Tools", "A simple tool."));
            store.put("beta", entry(Some("镜像仓库"), "学习", "一个学习用的镜像仓库。"));
            store.put("gamma", entry(None, "Unclassified", ""));
            store.save().await.unwrap();
        }

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("一个学习用的镜像仓库。"));
        assert!(raw.contains("\"llm_data\""));
        assert!(raw.contains("\"last_updated\""));

        let store = CacheStore::load(&path).await;
        assert_eq!(store.len(), 3);
        assert_eq!(
            store.get("beta"),
            Some(&entry(Some("镜像仓库"), "学习", "一个学习用的镜像仓库。"))
        );
        assert_eq!(store.get("gamma"), Some(&entry(None, "Unclassified", "")));
    }

    #[tokio::test]
    async fn test_malformed_file_is_empty_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repo_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = CacheStore::load(&path).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_tolerates_missing_and_malformed_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repo_data.json");
        std::fs::write(
            &path,
            r#"{
                "alpha": {"description": "A tool", "llm_data": {"category": "Tools"}},
                "beta": {"description": "Old"},
                "broken": 42
            }"#,
        )
        .unwrap();

        let store = CacheStore::load(&path).await;
        assert_eq!(store.len(), 2);

        let alpha = store.get("alpha").unwrap();
        assert_eq!(alpha.enrichment, EnrichmentResult::new("Tools", ""));
        assert_eq!(alpha.timestamp, "");

        let beta = store.get("beta").unwrap();
        assert!(beta.enrichment.is_unclassified());
        assert!(store.get("broken").is_none());
    }

    #[tokio::test]
    async fn test_null_fields_read_as_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("repo_data.json");
        std::fs::write(
            &path,
            r#"{
                "alpha": {
                    "description": null,
                    "llm_data": {"category": "AI", "enhanced_description": null},
                    "last_updated": null
                },
                "beta": {"description": "Old", "llm_data": null}
            }"#,
        )
        .unwrap();

        let store = CacheStore::load(&path).await;
        assert_eq!(store.len(), 2);

        let alpha = store.get("alpha").unwrap();
        assert_eq!(alpha.enrichment, EnrichmentResult::new("AI", ""));
        assert_eq!(alpha.timestamp, "");
        assert!(alpha.is_valid_for(None));

        assert!(store.get("beta").unwrap().enrichment.is_unclassified());
    }

    #[test]
    fn test_lookup_requires_matching_description() {
        let mut store = CacheStore::new("unused.json");
        store.put("alpha", entry(Some("A tool"), "Tools", "A simple tool."));
        store.put("gamma", entry(None, "Web", "A site."));

        assert!(store.lookup("alpha", Some("A tool")).is_some());
        assert!(store.lookup("alpha", Some("A better tool")).is_none());
        assert!(store.lookup("alpha", None).is_none());
        assert!(store.lookup("gamma", None).is_some());
        assert!(store.lookup("missing", None).is_none());
    }

    #[test]
    fn test_retain_names() {
        let mut store = CacheStore::new("unused.json");
        store.put("alpha", entry(None, "Tools", ""));
        store.put("beta", entry(None, "Tools", ""));

        let keep: HashSet<&str> = ["alpha"].into_iter().collect();
        assert_eq!(store.retain_names(&keep), 1);
        assert!(store.get("beta").is_none());
        assert_eq!(store.entries().count(), 1);
    }
}
