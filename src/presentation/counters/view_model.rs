use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use thiserror::Error;

use crate::domain::usecase::{CountParams, DeleteParams, SearchParams};
use crate::domain::{Counter, CountersUseCases, NoParams, UseCaseError};
use crate::mvi::{
    Dispatchers, IntentionHandler, Reducer, Session, SessionScope, StateContext, StateStore,
    ToEvent,
};
use crate::navigator::{Destination, NavigationError, Navigator};

use super::intent::CountersIntention;
use super::mappers::{CountersDeletionMapper, CountersSharingMapper};
use super::reducer::{CountersScreenReducer, ScreenSnapshot};
use super::state::CountersState;

pub type CountersStore = StateStore<CountersViewModel>;

#[derive(Debug, Error)]
pub enum CountersError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Results of the counters feed, delivered through the store's runner.
#[derive(Debug, Clone)]
pub enum CountersSignal {
    CountersLoaded(Vec<Counter>),
}

/// Counters screen logic.
///
/// Transient fields (selection, edit/search flags, staged deletion) are only
/// touched from the store's sequential runner.
pub struct CountersViewModel {
    use_cases: CountersUseCases,
    navigator: Arc<dyn Navigator>,
    deletion_mapper: CountersDeletionMapper,
    sharing_mapper: CountersSharingMapper,
    counters: Vec<Counter>,
    is_searching: bool,
    is_editing: bool,
    selected_ids: Vec<String>,
    staged_for_deletion: Option<Vec<String>>,
}

impl CountersViewModel {
    pub fn new(use_cases: CountersUseCases, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            use_cases,
            navigator,
            deletion_mapper: CountersDeletionMapper,
            sharing_mapper: CountersSharingMapper,
            counters: Vec::new(),
            is_searching: false,
            is_editing: false,
            selected_ids: Vec::new(),
            staged_for_deletion: None,
        }
    }

    /// Start a store for one screen session.
    pub fn launch(self, dispatchers: &Dispatchers, session: Session) -> CountersStore {
        StateStore::new(self, CountersState::default(), dispatchers, session)
    }

    fn selected_counters(&self) -> Vec<Counter> {
        self.counters
            .iter()
            .filter(|counter| self.selected_ids.contains(&counter.id))
            .cloned()
            .collect()
    }

    fn render(&self, ctx: &StateContext<CountersState>) {
        let snapshot = ScreenSnapshot {
            counters: self.counters.clone(),
            is_searching: self.is_searching,
            is_editing: self.is_editing,
            selected_ids: self.selected_ids.clone(),
        };
        ctx.update_state(|state| CountersScreenReducer::reduce(state.clone(), snapshot));
    }

    async fn search_counters(
        &mut self,
        query: Option<String>,
        ctx: &StateContext<CountersState>,
    ) -> Result<(), CountersError> {
        let is_searching = query.as_deref().is_some_and(|query| !query.trim().is_empty());
        self.use_cases
            .search_counters
            .invoke(SearchParams { query })
            .await?;
        self.is_searching = is_searching;
        // The visible list changes, so an earlier confirmation no longer applies.
        self.staged_for_deletion = None;
        self.render(ctx);
        Ok(())
    }

    fn select_or_deselect(&mut self, counter_id: String, ctx: &StateContext<CountersState>) {
        match self.selected_ids.iter().position(|id| *id == counter_id) {
            Some(index) => {
                self.selected_ids.remove(index);
            }
            None => self.selected_ids.push(counter_id),
        }
        // A changed selection needs a fresh confirmation.
        self.staged_for_deletion = None;
        self.render(ctx);
    }

    fn try_deleting(&mut self, ctx: &StateContext<CountersState>) {
        let items = self.selected_counters();
        if items.is_empty() {
            self.staged_for_deletion = None;
            return;
        }
        let confirmation = self.deletion_mapper.map(&items);
        self.staged_for_deletion = Some(confirmation.counter_ids.clone());
        ctx.update_state(|state| CountersState {
            delete_confirmation_event: Some(confirmation.to_event()),
            ..state.clone()
        });
    }

    async fn delete_selected_counters(
        &mut self,
        ctx: &StateContext<CountersState>,
    ) -> Result<(), CountersError> {
        // Only a batch confirmed through TryDeleting is ever deleted.
        let Some(batch) = self.staged_for_deletion.clone() else {
            tracing::debug!("Nothing staged for deletion");
            return Ok(());
        };
        let removed = self
            .use_cases
            .delete_counters
            .invoke(DeleteParams { counter_ids: batch })
            .await?;
        tracing::info!(removed, "Deleted selected counters");
        self.staged_for_deletion = None;
        self.selected_ids.clear();
        self.render(ctx);
        Ok(())
    }

    fn share_selected_counters(&self, ctx: &StateContext<CountersState>) {
        let items = self.selected_counters();
        if items.is_empty() {
            return;
        }
        let text = self.sharing_mapper.map(&items);
        ctx.update_state(|state| CountersState {
            share_event: Some(text.to_event()),
            ..state.clone()
        });
    }

    fn finish_editing(&mut self, ctx: &StateContext<CountersState>) {
        self.is_editing = false;
        self.selected_ids.clear();
        self.staged_for_deletion = None;
        self.render(ctx);
    }
}

#[async_trait]
impl IntentionHandler for CountersViewModel {
    type State = CountersState;
    type Intent = CountersIntention;
    type Signal = CountersSignal;
    type Error = CountersError;

    async fn on_start(&mut self, scope: &SessionScope<Self>) {
        let mut feed = self.use_cases.get_counters.invoke(NoParams);
        let signals = scope.signal_sender();
        scope.launch(async move {
            while let Some(counters) = feed.next().await {
                if !signals.send(CountersSignal::CountersLoaded(counters)) {
                    break;
                }
            }
        });
    }

    async fn handle_intention(
        &mut self,
        intention: CountersIntention,
        ctx: &StateContext<CountersState>,
    ) -> Result<(), CountersError> {
        tracing::debug!(?intention, "Handling counters intention");
        match intention {
            CountersIntention::SearchCounters { query } => self.search_counters(query, ctx).await?,
            CountersIntention::Increase { counter_id } => {
                self.use_cases
                    .increase_count
                    .invoke(CountParams { counter_id })
                    .await?;
            }
            CountersIntention::Decrease { counter_id } => {
                self.use_cases
                    .decrease_count
                    .invoke(CountParams { counter_id })
                    .await?;
            }
            CountersIntention::StartEditing { counter_id } => {
                self.is_editing = true;
                self.select_or_deselect(counter_id, ctx);
            }
            CountersIntention::SelectOrDeselectCounter { counter_id } => {
                self.select_or_deselect(counter_id, ctx)
            }
            CountersIntention::TryDeleting => self.try_deleting(ctx),
            CountersIntention::DeleteSelectedCounters => self.delete_selected_counters(ctx).await?,
            CountersIntention::ShareSelectedCounters => self.share_selected_counters(ctx),
            CountersIntention::FinishEditing => self.finish_editing(ctx),
            CountersIntention::NavigateToCreateCounter => {
                self.navigator.navigate(Destination::CreateCounter).await?
            }
        }
        Ok(())
    }

    async fn handle_signal(
        &mut self,
        signal: CountersSignal,
        ctx: &StateContext<CountersState>,
    ) -> Result<(), CountersError> {
        match signal {
            CountersSignal::CountersLoaded(counters) => {
                self.counters = counters;
                self.render(ctx);
            }
        }
        Ok(())
    }

    fn recover(&self, state: &CountersState, error: &CountersError) -> CountersState {
        CountersState {
            error_event: Some(error.to_string().to_event()),
            ..state.clone()
        }
    }
}
