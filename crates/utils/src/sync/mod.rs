//! Synchronization helpers

pub mod env;
