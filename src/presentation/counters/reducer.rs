use crate::domain::Counter;
use crate::mvi::{Intent, Reducer};

use super::state::{CounterViewData, CountersState, MainLayout, TopLayout};

/// Inputs the counters screen is derived from.
///
/// This is a system intention ("the screen inputs changed") rather than a
/// user action: the view-model builds one after every change and hands it
/// straight to [`CountersScreenReducer`]. It is never published to a store.
#[derive(Debug, Clone, Default)]
pub struct ScreenSnapshot {
    pub counters: Vec<Counter>,
    pub is_searching: bool,
    pub is_editing: bool,
    pub selected_ids: Vec<String>,
}

impl Intent for ScreenSnapshot {}

/// Recomputes the data fields of [`CountersState`]; event fields are kept as they are.
pub struct CountersScreenReducer;

impl Reducer for CountersScreenReducer {
    type State = CountersState;
    type Intent = ScreenSnapshot;

    fn reduce(state: Self::State, snapshot: Self::Intent) -> Self::State {
        let counters: Vec<CounterViewData> = snapshot
            .counters
            .iter()
            .map(|counter| {
                if snapshot.is_editing {
                    CounterViewData::Edit {
                        id: counter.id.clone(),
                        title: counter.title.clone(),
                        count: counter.count,
                        is_selected: snapshot.selected_ids.contains(&counter.id),
                    }
                } else {
                    CounterViewData::Counter {
                        id: counter.id.clone(),
                        title: counter.title.clone(),
                        count: counter.count,
                    }
                }
            })
            .collect();

        let top_layout = if snapshot.is_editing {
            TopLayout::Editing
        } else {
            TopLayout::Default
        };
        let main_layout = if snapshot.is_searching && counters.is_empty() {
            MainLayout::NoResults
        } else if counters.is_empty() {
            MainLayout::NoCounters
        } else {
            MainLayout::Default
        };

        let number_of_selected_counters = counters.iter().filter(|c| c.is_selected()).count();
        let total_times_count = counters.iter().map(|c| u64::from(c.count())).sum();

        CountersState {
            total_item_count: counters.len(),
            total_times_count,
            counters,
            top_layout,
            main_layout,
            is_searching: snapshot.is_searching,
            are_menus_enabled: number_of_selected_counters > 0,
            is_search_enabled: main_layout != MainLayout::NoCounters,
            number_of_selected_counters,
            ..state
        }
    }
}
