use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountersIntention {
    /// `None` or an empty query leaves search mode.
    SearchCounters { query: Option<String> },
    Increase { counter_id: String },
    Decrease { counter_id: String },
    /// Enter edit mode and toggle the long-pressed counter.
    StartEditing { counter_id: String },
    SelectOrDeselectCounter { counter_id: String },
    /// Stage the selection and ask for confirmation. Deletes nothing.
    TryDeleting,
    /// Commit the staged batch.
    DeleteSelectedCounters,
    ShareSelectedCounters,
    FinishEditing,
    NavigateToCreateCounter,
}

impl Intent for CountersIntention {}
