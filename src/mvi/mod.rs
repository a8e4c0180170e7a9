//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the intention-driven state store shared by every
//! screen, plus the base traits for unidirectional data flow.
//!
//! # Architecture
//!
//! ```text
//! Observer ──publish──→ queue ──→ handler ──update_state──→ State
//!    ↑                                                        │
//!    └──────────────────────── subscribe ─────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of a screen
//! - **Intent**: User actions or system events
//! - **Reducer**: Pure function that transforms state based on intents
//! - **StateStore**: Serializes intentions through one async handler per session

mod dispatchers;
mod event;
mod intent;
mod reducer;
mod session;
mod state;
mod store;

pub use dispatchers::Dispatchers;
pub use event::{Event, ToEvent};
pub use intent::Intent;
pub use reducer::Reducer;
pub use session::Session;
pub use state::UiState;
pub use store::{
    IntentionHandler, SessionScope, SignalSender, StateContext, StateStore, StateSubscription,
    StoreError, DEFAULT_STATE_BUFFER,
};
