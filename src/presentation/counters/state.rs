use crate::mvi::{Event, UiState};

use super::mappers::DeleteConfirmation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterViewData {
    Counter {
        id: String,
        title: String,
        count: u32,
    },
    Edit {
        id: String,
        title: String,
        count: u32,
        is_selected: bool,
    },
}

impl CounterViewData {
    pub fn id(&self) -> &str {
        match self {
            Self::Counter { id, .. } | Self::Edit { id, .. } => id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Counter { title, .. } | Self::Edit { title, .. } => title,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            Self::Counter { count, .. } | Self::Edit { count, .. } => *count,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Edit { is_selected: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopLayout {
    #[default]
    Default,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainLayout {
    /// Nothing received from the feed yet.
    #[default]
    Loading,
    Default,
    NoCounters,
    NoResults,
}

/// Everything the counters screen renders.
///
/// Fields ending in `_event` fire once; see [`Event`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CountersState {
    pub counters: Vec<CounterViewData>,
    pub total_item_count: usize,
    pub total_times_count: u64,
    pub top_layout: TopLayout,
    pub main_layout: MainLayout,
    pub is_searching: bool,
    pub are_menus_enabled: bool,
    pub is_search_enabled: bool,
    pub number_of_selected_counters: usize,
    pub delete_confirmation_event: Option<Event<DeleteConfirmation>>,
    pub share_event: Option<Event<String>>,
    pub error_event: Option<Event<String>>,
}

impl UiState for CountersState {}

impl CountersState {
    pub fn is_editing(&self) -> bool {
        self.top_layout == TopLayout::Editing
    }

    pub fn counter(&self, id: &str) -> Option<&CounterViewData> {
        self.counters.iter().find(|counter| counter.id() == id)
    }
}
