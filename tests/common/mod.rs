//! Shared test utilities and fakes.

#![allow(dead_code, unused_imports)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use counters::domain::usecase::{CountParams, DeleteParams, SearchParams};
use counters::domain::{
    Counter, CountersRepository, CountersUseCases, InMemoryCountersRepository, UseCase,
    UseCaseError,
};
use counters::navigator::{ChannelNavigator, Destination};

pub const WAIT: Duration = Duration::from_secs(2);

/// Counters with fixed ids "1", "2", "3".
pub fn three_counters() -> Vec<Counter> {
    vec![
        Counter {
            id: "1".to_string(),
            title: "Cups of coffee".to_string(),
            count: 3,
        },
        Counter {
            id: "2".to_string(),
            title: "ABC drills".to_string(),
            count: 1,
        },
        Counter {
            id: "3".to_string(),
            title: "Naps".to_string(),
            count: 0,
        },
    ]
}

pub fn seeded_repository() -> Arc<InMemoryCountersRepository> {
    Arc::new(InMemoryCountersRepository::with_counters(three_counters()))
}

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Delete use-case that records every batch and can be told to fail.
pub struct RecordingDelete {
    repository: Arc<InMemoryCountersRepository>,
    pub batches: Mutex<Vec<Vec<String>>>,
    pub failures_left: AtomicUsize,
}

impl RecordingDelete {
    pub fn new(repository: Arc<InMemoryCountersRepository>, failures: usize) -> Self {
        Self {
            repository,
            batches: Mutex::new(Vec::new()),
            failures_left: AtomicUsize::new(failures),
        }
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl UseCase<DeleteParams, usize> for RecordingDelete {
    async fn invoke(&self, params: DeleteParams) -> Result<usize, UseCaseError> {
        self.batches.lock().push(params.counter_ids.clone());
        if self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
        {
            return Err(UseCaseError::Failed("storage unavailable".to_string()));
        }
        Ok(self.repository.delete(&params.counter_ids).await?)
    }
}

/// Increase use-case that counts calls and always fails.
#[derive(Default)]
pub struct FailingIncrease {
    pub calls: AtomicUsize,
}

#[async_trait]
impl UseCase<CountParams, Counter> for FailingIncrease {
    async fn invoke(&self, params: CountParams) -> Result<Counter, UseCaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(UseCaseError::Failed(format!(
            "cannot increase {}",
            params.counter_id
        )))
    }
}

/// Search use-case that records queries before delegating.
pub struct RecordingSearch {
    repository: Arc<InMemoryCountersRepository>,
    pub queries: Mutex<Vec<Option<String>>>,
}

impl RecordingSearch {
    pub fn new(repository: Arc<InMemoryCountersRepository>) -> Self {
        Self {
            repository,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UseCase<SearchParams, ()> for RecordingSearch {
    async fn invoke(&self, params: SearchParams) -> Result<(), UseCaseError> {
        self.queries.lock().push(params.query.clone());
        Ok(self.repository.search(params.query).await?)
    }
}

pub fn use_cases(repository: &Arc<InMemoryCountersRepository>) -> CountersUseCases {
    let repository: Arc<dyn CountersRepository> = repository.clone();
    CountersUseCases::from_repository(repository)
}
