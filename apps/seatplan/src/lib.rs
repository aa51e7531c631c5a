//! # Seatplan Application Library
//!
//! Library target for the Seatplan binary. Exposes the API, CLI, client,
//! config, and snapshot modules so integration tests can exercise them
//! without spawning a process.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod snapshot;
