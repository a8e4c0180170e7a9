use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

use super::counter::{filter_by_query, Counter, CounterUpdate};
use super::error::RepositoryError;

/// Storage for counters.
///
/// `counters()` is the live feed screens render from: it yields the current
/// list filtered by the active search query, then a new list every time the
/// counters or the query change. It only ends when the repository is dropped.
#[async_trait]
pub trait CountersRepository: Send + Sync {
    fn counters(&self) -> BoxStream<'static, Vec<Counter>>;

    /// Set the query applied to the `counters()` feed.
    async fn search(&self, query: Option<String>) -> Result<(), RepositoryError>;

    /// One-off listing, independent from the feed's query.
    async fn list(&self, query: Option<&str>) -> Result<Vec<Counter>, RepositoryError>;

    async fn get(&self, id: &str) -> Result<Counter, RepositoryError>;

    async fn create(&self, title: &str) -> Result<Counter, RepositoryError>;

    async fn update(&self, id: &str, update: CounterUpdate) -> Result<Counter, RepositoryError>;

    async fn increase(&self, id: &str) -> Result<Counter, RepositoryError>;

    /// Saturates at zero.
    async fn decrease(&self, id: &str) -> Result<Counter, RepositoryError>;

    /// Removes every listed id that exists and returns how many were removed.
    async fn delete(&self, ids: &[String]) -> Result<usize, RepositoryError>;
}

/// Process-local repository backed by watch channels.
pub struct InMemoryCountersRepository {
    counters: watch::Sender<Vec<Counter>>,
    query: watch::Sender<Option<String>>,
}

impl InMemoryCountersRepository {
    pub fn new() -> Self {
        Self::with_counters(Vec::new())
    }

    pub fn with_counters(counters: Vec<Counter>) -> Self {
        let (counters, _) = watch::channel(counters);
        let (query, _) = watch::channel(None);
        Self { counters, query }
    }

    fn modify<F>(&self, id: &str, change: F) -> Result<Counter, RepositoryError>
    where
        F: FnOnce(&mut Counter),
    {
        let mut result = Err(RepositoryError::NotFound { id: id.to_string() });
        self.counters.send_if_modified(|counters| {
            match counters.iter_mut().find(|counter| counter.id == id) {
                Some(counter) => {
                    change(counter);
                    result = Ok(counter.clone());
                    true
                }
                None => false,
            }
        });
        result
    }
}

impl Default for InMemoryCountersRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_title(title: &str) -> Result<String, RepositoryError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(RepositoryError::EmptyTitle);
    }
    Ok(title.to_string())
}

#[async_trait]
impl CountersRepository for InMemoryCountersRepository {
    fn counters(&self) -> BoxStream<'static, Vec<Counter>> {
        let counters = self.counters.subscribe();
        let query = self.query.subscribe();

        stream::unfold(
            (counters, query, true),
            |(mut counters, mut query, first)| async move {
                if !first {
                    let changed = tokio::select! {
                        changed = counters.changed() => changed,
                        changed = query.changed() => changed,
                    };
                    if changed.is_err() {
                        return None;
                    }
                }
                let list = {
                    let all = counters.borrow_and_update();
                    let active = query.borrow_and_update();
                    filter_by_query(&all, active.as_deref())
                };
                Some((list, (counters, query, false)))
            },
        )
        .boxed()
    }

    async fn search(&self, query: Option<String>) -> Result<(), RepositoryError> {
        let query = query.filter(|query| !query.trim().is_empty());
        self.query.send_if_modified(|active| {
            if *active == query {
                return false;
            }
            *active = query;
            true
        });
        Ok(())
    }

    async fn list(&self, query: Option<&str>) -> Result<Vec<Counter>, RepositoryError> {
        Ok(filter_by_query(&self.counters.borrow(), query))
    }

    async fn get(&self, id: &str) -> Result<Counter, RepositoryError> {
        self.counters
            .borrow()
            .iter()
            .find(|counter| counter.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })
    }

    async fn create(&self, title: &str) -> Result<Counter, RepositoryError> {
        let counter = Counter::new(validate_title(title)?, 0);
        self.counters.send_modify(|counters| counters.push(counter.clone()));
        tracing::debug!(id = %counter.id, title = %counter.title, "Counter created");
        Ok(counter)
    }

    async fn update(&self, id: &str, update: CounterUpdate) -> Result<Counter, RepositoryError> {
        let title = update.title.as_deref().map(validate_title).transpose()?;
        self.modify(id, |counter| {
            if let Some(title) = title {
                counter.title = title;
            }
            if let Some(count) = update.count {
                counter.count = count;
            }
        })
    }

    async fn increase(&self, id: &str) -> Result<Counter, RepositoryError> {
        self.modify(id, |counter| counter.count = counter.count.saturating_add(1))
    }

    async fn decrease(&self, id: &str) -> Result<Counter, RepositoryError> {
        self.modify(id, |counter| counter.count = counter.count.saturating_sub(1))
    }

    async fn delete(&self, ids: &[String]) -> Result<usize, RepositoryError> {
        let mut removed = 0;
        self.counters.send_if_modified(|counters| {
            let before = counters.len();
            counters.retain(|counter| !ids.contains(&counter.id));
            removed = before - counters.len();
            removed > 0
        });
        if removed > 0 {
            tracing::debug!(removed, "Counters deleted");
        }
        Ok(removed)
    }
}
