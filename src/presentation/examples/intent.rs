use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamplesIntention {
    GetExamples,
    /// Create a counter titled `name` and leave the screen.
    SelectExample { name: String },
    Close,
}

impl Intent for ExamplesIntention {}
