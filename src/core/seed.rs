//! # Seed Loading
//!
//! Produces the label list the store is initialized from.
//!
//! Loading is the only step allowed to suspend. [`load_into`] awaits the
//! whole list before touching the store, so observers never see a partial
//! list and a failed load leaves the previous state in place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;
use thiserror::Error;

use crate::core::store::ItemStore;

pub const DEFAULT_ROW_COUNT: usize = 1000;
pub const DEFAULT_LABEL_PREFIX: &str = "Hello Android #";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file {} is not a JSON array of strings: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("seed source produced no labels")]
    Empty,
}

/// `["{prefix}0", "{prefix}1", ...]`, `count` entries.
pub fn default_labels(count: usize, prefix: &str) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Human-readable origin, used in logs and the title bar.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Vec<String>, SeedError>;
}

/// Labels generated from a prefix and a running index.
#[derive(Debug, Clone)]
pub struct GeneratedSeed {
    pub count: usize,
    pub prefix: String,
}

impl Default for GeneratedSeed {
    fn default() -> Self {
        Self {
            count: DEFAULT_ROW_COUNT,
            prefix: DEFAULT_LABEL_PREFIX.to_string(),
        }
    }
}

#[async_trait]
impl SeedSource for GeneratedSeed {
    fn describe(&self) -> String {
        format!("{} generated labels", self.count)
    }

    async fn load(&self) -> Result<Vec<String>, SeedError> {
        if self.count == 0 {
            return Err(SeedError::Empty);
        }
        Ok(default_labels(self.count, &self.prefix))
    }
}

/// Labels read from disk: a JSON array for `*.json`, otherwise one per line.
#[derive(Debug, Clone)]
pub struct FileSeed {
    pub path: PathBuf,
}

impl FileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Vec<String>, SeedError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        let labels = parse_labels(&self.path, &contents)?;
        if labels.is_empty() {
            return Err(SeedError::Empty);
        }
        Ok(labels)
    }
}

fn parse_labels(path: &Path, contents: &str) -> Result<Vec<String>, SeedError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return serde_json::from_str(contents).map_err(|source| SeedError::Json {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Await `source`, then initialize `store` with the result.
///
/// Returns the number of items loaded. An empty label list is rejected
/// whatever the source, and the store is left as it was.
pub async fn load_into(store: &mut ItemStore, source: &dyn SeedSource) -> Result<usize, SeedError> {
    let labels = source.load().await?;
    if labels.is_empty() {
        return Err(SeedError::Empty);
    }
    let count = labels.len();
    store.initialize(labels);
    info!("Seeded {} items from {}", count, source.describe());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_match_reference_seed() {
        let labels = default_labels(DEFAULT_ROW_COUNT, DEFAULT_LABEL_PREFIX);
        assert_eq!(labels.len(), 1000);
        assert_eq!(labels[0], "Hello Android #0");
        assert_eq!(labels[999], "Hello Android #999");
    }

    #[test]
    fn test_parse_lines_skips_blanks() {
        let labels = parse_labels(Path::new("seed.txt"), "alpha\n\n  beta  \n").unwrap();
        assert_eq!(labels, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_parse_json_array() {
        let labels = parse_labels(Path::new("seed.JSON"), r#"["one", "two"]"#).unwrap();
        assert_eq!(labels, vec!["one", "two"]);
    }

    #[test]
    fn test_parse_json_rejects_objects() {
        let err = parse_labels(Path::new("seed.json"), r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, SeedError::Json { .. }));
    }

    #[tokio::test]
    async fn test_generated_seed_loads() {
        let seed = GeneratedSeed {
            count: 3,
            prefix: "Row ".into(),
        };
        assert_eq!(seed.load().await.unwrap(), vec!["Row 0", "Row 1", "Row 2"]);
    }

    #[tokio::test]
    async fn test_generated_seed_rejects_zero_rows() {
        let seed = GeneratedSeed {
            count: 0,
            prefix: "Row ".into(),
        };
        assert!(matches!(seed.load().await, Err(SeedError::Empty)));

        let mut store = ItemStore::with_labels(["kept"]);
        assert!(matches!(load_into(&mut store, &seed).await, Err(SeedError::Empty)));
        assert_eq!(store.len(), 1);
    }
}
