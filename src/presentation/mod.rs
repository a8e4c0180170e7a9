//! Screens built on the intention-driven state store.

pub mod counters;
pub mod examples;
