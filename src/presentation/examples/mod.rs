mod intent;
mod state;
mod view_model;

pub use intent::ExamplesIntention;
pub use state::ExamplesState;
pub use view_model::{ExamplesError, ExamplesStore, ExamplesViewModel};
