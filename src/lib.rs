//! Counter tracking: an intention-driven state store for screens, the
//! counters domain it orchestrates, and a companion REST API.

pub mod config;
pub mod domain;
pub mod logging;
pub mod mvi;
pub mod navigator;
pub mod presentation;
pub mod server;
