//! Profile and listing store interfaces.
//!
//! The ranking core never opens a connection itself; callers inject a
//! [`ProfileStore`] and a [`ListingStore`]. Three implementations ship
//! with the crate:
//! - [`InMemoryStore`]: records held in memory (tests, embedding);
//! - [`JsonFileStore`]: a dataset file re-read on every call;
//! - [`RetryingStore`]: wraps another store and retries transient
//!   failures a bounded number of times.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{JobRankError, Result};
use crate::model::{CandidateProfile, JobListing, ListingRecord, ProfileRecord};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Looks up candidate profiles by user id.
pub trait ProfileStore: Send + Sync {
    /// `Ok(None)` when no profile exists for `user_id`.
    fn get(&self, user_id: u64) -> Result<Option<CandidateProfile>>;
}

/// Lists the currently open job postings.
pub trait ListingStore: Send + Sync {
    /// Only open listings are returned. An empty vector is a valid answer.
    fn list_open(&self) -> Result<Vec<JobListing>>;
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// On-disk dataset layout: `{ "profiles": [...], "listings": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
    #[serde(default, alias = "lokers")]
    pub listings: Vec<ListingRecord>,
}

impl Dataset {
    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JobRankError::store_with_source(
                format!("reading dataset '{}'", path.display()),
                e,
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            JobRankError::data_with_source(
                format!("failed to parse dataset '{}'", path.display()),
                e,
            )
        })
    }

    /// Write the dataset as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            JobRankError::data_with_source("failed to serialize dataset as JSON", e)
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                JobRankError::io(format!("creating directory '{}'", parent.display()), e)
            })?;
        }
        std::fs::write(path, json)
            .map_err(|e| JobRankError::io(format!("writing dataset to '{}'", path.display()), e))
    }

    fn find_profile(&self, user_id: u64) -> Option<CandidateProfile> {
        self.profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned()
            .map(CandidateProfile::from)
    }

    fn open_listings(&self, open_status: &str) -> Vec<JobListing> {
        self.listings
            .iter()
            .cloned()
            .map(JobListing::from)
            .filter(|l| l.is_open(open_status))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store backed by an in-memory [`Dataset`].
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    dataset: Dataset,
    open_status: String,
}

impl InMemoryStore {
    pub fn new(dataset: Dataset, open_status: impl Into<String>) -> Self {
        Self {
            dataset,
            open_status: open_status.into(),
        }
    }
}

impl ProfileStore for InMemoryStore {
    fn get(&self, user_id: u64) -> Result<Option<CandidateProfile>> {
        Ok(self.dataset.find_profile(user_id))
    }
}

impl ListingStore for InMemoryStore {
    fn list_open(&self) -> Result<Vec<JobListing>> {
        Ok(self.dataset.open_listings(&self.open_status))
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Store that reads a dataset file on every query, so edits to the file
/// are visible to the next request.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    open_status: String,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, open_status: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            open_status: open_status.into(),
        }
    }
}

impl ProfileStore for JsonFileStore {
    fn get(&self, user_id: u64) -> Result<Option<CandidateProfile>> {
        Ok(Dataset::load(&self.path)?.find_profile(user_id))
    }
}

impl ListingStore for JsonFileStore {
    fn list_open(&self) -> Result<Vec<JobListing>> {
        let listings = Dataset::load(&self.path)?.open_listings(&self.open_status);
        debug!(path = %self.path.display(), open = listings.len(), "loaded listings");
        Ok(listings)
    }
}

// ---------------------------------------------------------------------------
// Retry wrapper
// ---------------------------------------------------------------------------

/// Retries retryable store errors up to `max_attempts` times with a linear
/// backoff. Non-retryable errors are returned immediately.
#[derive(Debug, Clone)]
pub struct RetryingStore<S> {
    inner: S,
    max_attempts: u32,
    backoff: Duration,
}

impl<S> RetryingStore<S> {
    pub fn new(inner: S, max_attempts: u32, backoff: Duration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn from_config(inner: S, config: &StoreConfig) -> Self {
        Self::new(
            inner,
            config.max_attempts,
            Duration::from_millis(config.retry_backoff_ms),
        )
    }

    fn attempt<T>(&self, op: &str, mut f: impl FnMut(&S) -> Result<T>) -> Result<T> {
        let mut attempt = 1;
        loop {
            match f(&self.inner) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.max_attempts => {
                    warn!(op, attempt, max = self.max_attempts, error = %err, "store call failed; retrying");
                    thread::sleep(self.backoff * attempt);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl<S: ProfileStore> ProfileStore for RetryingStore<S> {
    fn get(&self, user_id: u64) -> Result<Option<CandidateProfile>> {
        self.attempt("get_profile", |s| s.get(user_id))
    }
}

impl<S: ListingStore> ListingStore for RetryingStore<S> {
    fn list_open(&self) -> Result<Vec<JobListing>> {
        self.attempt("list_open", |s| s.list_open())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn sample_dataset() -> Dataset {
        serde_json::from_str(
            r#"{
                "profiles": [
                    {"user_id": 1, "bidang_pekerjaan": "Software Engineer", "skills": "python, sql"},
                    {"user_id": 2, "desired_field": null}
                ],
                "listings": [
                    {"id": 10, "posisi": "Software Engineer", "skills": "Python, Django", "status": "open"},
                    {"id": 11, "posisi": "Baker", "skills": "Baking", "status": "closed"},
                    {"id": 12, "posisi": "Barista", "status": "Open"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn in_memory_returns_profile_with_empty_defaults() {
        let store = InMemoryStore::new(sample_dataset(), "open");
        let profile = store.get(2).unwrap().unwrap();
        assert_eq!(profile.desired_field, "");
        assert_eq!(profile.skills, "");
        assert!(store.get(99).unwrap().is_none());
    }

    #[test]
    fn in_memory_filters_open_listings() {
        let store = InMemoryStore::new(sample_dataset(), "open");
        let ids: Vec<u64> = store.list_open().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![10]);
    }

    #[test]
    fn custom_open_status() {
        let mut dataset = sample_dataset();
        dataset.listings[0].status = Some("buka".into());
        let store = InMemoryStore::new(dataset, "buka");
        let ids: Vec<u64> = store.list_open().unwrap().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![10]);
    }

    #[test]
    fn json_file_store_reads_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        sample_dataset().save(&path).unwrap();

        let store = JsonFileStore::new(&path, "open");
        assert_eq!(store.get(1).unwrap().unwrap().desired_field, "Software Engineer");
        assert_eq!(store.list_open().unwrap().len(), 1);
    }

    #[test]
    fn json_file_store_missing_file_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.json"), "open");
        let err = store.list_open().unwrap_err();
        assert!(matches!(err, JobRankError::StoreUnavailable { .. }));
    }

    #[test]
    fn json_file_store_malformed_file_is_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path, "open").get(1).unwrap_err();
        assert!(matches!(err, JobRankError::Data { .. }));
        assert!(!err.is_retryable());
    }

    struct FlakyStore {
        failures_left: AtomicU32,
        calls: AtomicU32,
    }

    impl ListingStore for FlakyStore {
        fn list_open(&self) -> Result<Vec<JobListing>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(JobRankError::store("connection reset"));
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn retrying_store_recovers_from_transient_failures() {
        let store = RetryingStore::new(
            FlakyStore {
                failures_left: AtomicU32::new(2),
                calls: AtomicU32::new(0),
            },
            3,
            Duration::ZERO,
        );
        assert!(store.list_open().unwrap().is_empty());
        assert_eq!(store.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn retrying_store_gives_up_after_max_attempts() {
        let store = RetryingStore::new(
            FlakyStore {
                failures_left: AtomicU32::new(5),
                calls: AtomicU32::new(0),
            },
            2,
            Duration::ZERO,
        );
        let err = store.list_open().unwrap_err();
        assert!(matches!(err, JobRankError::StoreUnavailable { .. }));
        assert_eq!(store.inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn retrying_store_does_not_retry_data_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "42").unwrap();
        let store = RetryingStore::new(JsonFileStore::new(&path, "open"), 3, Duration::ZERO);
        assert!(matches!(store.get(1).unwrap_err(), JobRankError::Data { .. }));
    }
}
