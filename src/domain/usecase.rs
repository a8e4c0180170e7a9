//! Use-cases: one domain operation each, invoked by screens.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::counter::Counter;
use super::error::UseCaseError;
use super::examples::{default_examples, ExampleCategory};
use super::repository::CountersRepository;

/// Parameter type for use-cases that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

/// A single async operation.
#[async_trait]
pub trait UseCase<P, R>: Send + Sync
where
    P: Send + 'static,
    R: Send,
{
    async fn invoke(&self, params: P) -> Result<R, UseCaseError>;
}

/// An operation producing a lazy, possibly infinite sequence of results.
pub trait FlowUseCase<P, R>: Send + Sync {
    fn invoke(&self, params: P) -> BoxStream<'static, R>;
}

/// Live list of counters, filtered by the active search.
pub struct GetCounters {
    repository: Arc<dyn CountersRepository>,
}

impl GetCounters {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

impl FlowUseCase<NoParams, Vec<Counter>> for GetCounters {
    fn invoke(&self, _params: NoParams) -> BoxStream<'static, Vec<Counter>> {
        self.repository.counters()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
}

pub struct SearchCounters {
    repository: Arc<dyn CountersRepository>,
}

impl SearchCounters {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<SearchParams, ()> for SearchCounters {
    async fn invoke(&self, params: SearchParams) -> Result<(), UseCaseError> {
        Ok(self.repository.search(params.query).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountParams {
    pub counter_id: String,
}

pub struct IncreaseCount {
    repository: Arc<dyn CountersRepository>,
}

impl IncreaseCount {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<CountParams, Counter> for IncreaseCount {
    async fn invoke(&self, params: CountParams) -> Result<Counter, UseCaseError> {
        Ok(self.repository.increase(&params.counter_id).await?)
    }
}

pub struct DecreaseCount {
    repository: Arc<dyn CountersRepository>,
}

impl DecreaseCount {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<CountParams, Counter> for DecreaseCount {
    async fn invoke(&self, params: CountParams) -> Result<Counter, UseCaseError> {
        Ok(self.repository.decrease(&params.counter_id).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteParams {
    pub counter_ids: Vec<String>,
}

pub struct DeleteCounters {
    repository: Arc<dyn CountersRepository>,
}

impl DeleteCounters {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<DeleteParams, usize> for DeleteCounters {
    async fn invoke(&self, params: DeleteParams) -> Result<usize, UseCaseError> {
        Ok(self.repository.delete(&params.counter_ids).await?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    pub title: String,
}

pub struct CreateCounter {
    repository: Arc<dyn CountersRepository>,
}

impl CreateCounter {
    pub fn new(repository: Arc<dyn CountersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UseCase<CreateParams, Counter> for CreateCounter {
    async fn invoke(&self, params: CreateParams) -> Result<Counter, UseCaseError> {
        Ok(self.repository.create(&params.title).await?)
    }
}

/// Built-in example titles, grouped by category.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetExamples;

#[async_trait]
impl UseCase<NoParams, Vec<ExampleCategory>> for GetExamples {
    async fn invoke(&self, _params: NoParams) -> Result<Vec<ExampleCategory>, UseCaseError> {
        Ok(default_examples())
    }
}

/// Every use-case the counters screen depends on.
#[derive(Clone)]
pub struct CountersUseCases {
    pub get_counters: Arc<dyn FlowUseCase<NoParams, Vec<Counter>>>,
    pub search_counters: Arc<dyn UseCase<SearchParams, ()>>,
    pub increase_count: Arc<dyn UseCase<CountParams, Counter>>,
    pub decrease_count: Arc<dyn UseCase<CountParams, Counter>>,
    pub delete_counters: Arc<dyn UseCase<DeleteParams, usize>>,
}

impl CountersUseCases {
    pub fn from_repository(repository: Arc<dyn CountersRepository>) -> Self {
        Self {
            get_counters: Arc::new(GetCounters::new(repository.clone())),
            search_counters: Arc::new(SearchCounters::new(repository.clone())),
            increase_count: Arc::new(IncreaseCount::new(repository.clone())),
            decrease_count: Arc::new(DecreaseCount::new(repository.clone())),
            delete_counters: Arc::new(DeleteCounters::new(repository)),
        }
    }
}
