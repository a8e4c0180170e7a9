use std::convert::Infallible;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::usecase::CreateParams;
use crate::domain::{Counter, ExampleCategory, NoParams, UseCase, UseCaseError};
use crate::mvi::{Dispatchers, IntentionHandler, Session, StateContext, StateStore, ToEvent};
use crate::navigator::{Destination, NavigationError, Navigator};

use super::intent::ExamplesIntention;
use super::state::ExamplesState;

pub type ExamplesStore = StateStore<ExamplesViewModel>;

#[derive(Debug, Error)]
pub enum ExamplesError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

pub struct ExamplesViewModel {
    get_examples: Arc<dyn UseCase<NoParams, Vec<ExampleCategory>>>,
    create_counter: Arc<dyn UseCase<CreateParams, Counter>>,
    navigator: Arc<dyn Navigator>,
}

impl ExamplesViewModel {
    pub fn new(
        get_examples: Arc<dyn UseCase<NoParams, Vec<ExampleCategory>>>,
        create_counter: Arc<dyn UseCase<CreateParams, Counter>>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            get_examples,
            create_counter,
            navigator,
        }
    }

    pub fn launch(self, dispatchers: &Dispatchers, session: Session) -> ExamplesStore {
        StateStore::new(self, ExamplesState::default(), dispatchers, session)
    }
}

#[async_trait]
impl IntentionHandler for ExamplesViewModel {
    type State = ExamplesState;
    type Intent = ExamplesIntention;
    type Signal = Infallible;
    type Error = ExamplesError;

    async fn handle_intention(
        &mut self,
        intention: ExamplesIntention,
        ctx: &StateContext<ExamplesState>,
    ) -> Result<(), ExamplesError> {
        match intention {
            ExamplesIntention::GetExamples => {
                ctx.update_state(|state| ExamplesState {
                    is_loading: true,
                    ..state.clone()
                });
                let categories = self.get_examples.invoke(NoParams).await?;
                ctx.update_state(|state| ExamplesState {
                    categories,
                    is_loading: false,
                    ..state.clone()
                });
            }
            ExamplesIntention::SelectExample { name } => {
                let counter = self
                    .create_counter
                    .invoke(CreateParams { title: name })
                    .await?;
                ctx.update_state(|state| ExamplesState {
                    created_event: Some(counter.title.to_event()),
                    ..state.clone()
                });
                self.navigator.navigate(Destination::Back).await?;
            }
            ExamplesIntention::Close => self.navigator.navigate(Destination::Back).await?,
        }
        Ok(())
    }

    fn recover(&self, state: &ExamplesState, error: &ExamplesError) -> ExamplesState {
        ExamplesState {
            is_loading: false,
            error_event: Some(error.to_string().to_event()),
            ..state.clone()
        }
    }
}
