//! Test fixture loader for the golden reconciliation datasets.
//!
//! Every golden file holds input records, an optional configuration overlay and
//! the expected clustering. Records and configuration stay untyped here so the
//! loader does not depend on the crates under test.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by path.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// A golden reconciliation case.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenCase<R> {
    pub description: String,
    /// Overlay deserialized into the engine configuration; absent keys keep defaults.
    #[serde(default)]
    pub config: serde_json::Value,
    pub records: Vec<R>,
    pub expected: Expected,
}

/// Expected result of a golden case.
#[derive(Debug, Clone, Deserialize)]
pub struct Expected {
    /// Member ids of every output cluster.
    pub clusters: Vec<Vec<u64>>,
    /// Rounds until the fixpoint, when the case pins it.
    #[serde(default)]
    pub rounds: Option<usize>,
    /// Ids SimSort must exclude from their component.
    #[serde(default)]
    pub excluded: Vec<u64>,
}

impl Expected {
    /// Clusters with sorted members, sorted by first member.
    pub fn normalized_clusters(&self) -> Vec<Vec<u64>> {
        normalize_clusters(self.clusters.clone())
    }
}

/// Sort members within each cluster and clusters by their first member.
pub fn normalize_clusters(mut clusters: Vec<Vec<u64>>) -> Vec<Vec<u64>> {
    for members in &mut clusters {
        members.sort_unstable();
    }
    clusters.sort();
    clusters
}

/// Load a golden case.
pub fn load_golden<R: DeserializeOwned>(relative_path: &str) -> GoldenCase<R> {
    load_fixture(relative_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_files_exist() {
        let files = [
            "golden/geo/merge_basic.json",
            "golden/music/tracks.json",
            "golden/simsort/canaima.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_files_parse_with_disjoint_expectations() {
        let mut total = 0;
        for dir in ["golden/geo", "golden/music", "golden/simsort"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let case: GoldenCase<serde_json::Value> = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                let mut ids: Vec<u64> = case.expected.clusters.iter().flatten().copied().collect();
                let before = ids.len();
                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), before, "{}: clusters overlap", file.display());
                assert_eq!(ids.len(), case.records.len(), "{}: records not covered", file.display());
                total += 1;
            }
        }
        assert_eq!(total, 3);
    }

    #[test]
    fn normalization_orders_clusters() {
        let clusters = normalize_clusters(vec![vec![11, 10], vec![4, 1, 3]]);
        assert_eq!(clusters, vec![vec![1, 3, 4], vec![10, 11]]);
    }
}
