use crate::domain::ExampleCategory;
use crate::mvi::{Event, UiState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExamplesState {
    pub categories: Vec<ExampleCategory>,
    pub is_loading: bool,
    /// Title of the counter created from an example.
    pub created_event: Option<Event<String>>,
    pub error_event: Option<Event<String>>,
}

impl UiState for ExamplesState {}
