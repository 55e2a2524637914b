//! Brings up a local Roxy feature-flag server in a container and seeds it
//! with the flags the provider integration tests expect.

pub mod cli;
pub mod client;
pub mod config;
pub mod container;
pub mod flags;
pub mod health;
pub mod logging;
pub mod scaffold;
