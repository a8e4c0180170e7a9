//! Counters domain: entity, repository and use-cases.
//!
//! Screens and the REST API both talk to an `Arc<dyn CountersRepository>`;
//! screens go through the use-cases so each operation can be swapped out
//! on its own.

mod counter;
mod error;
pub mod examples;
mod repository;
pub mod usecase;

pub use counter::{filter_by_query, Counter, CounterUpdate};
pub use error::{RepositoryError, UseCaseError};
pub use examples::ExampleCategory;
pub use repository::{CountersRepository, InMemoryCountersRepository};
pub use usecase::{CountersUseCases, FlowUseCase, NoParams, UseCase};
