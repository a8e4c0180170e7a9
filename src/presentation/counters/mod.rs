mod intent;
mod mappers;
mod reducer;
mod state;
mod view_model;

pub use intent::CountersIntention;
pub use mappers::{CountersDeletionMapper, CountersSharingMapper, DeleteConfirmation};
pub use reducer::{CountersScreenReducer, ScreenSnapshot};
pub use state::{CounterViewData, CountersState, MainLayout, TopLayout};
pub use view_model::{CountersError, CountersSignal, CountersStore, CountersViewModel};
