//! Core domain types, errors, and constants for the `stratum` workspace.
//!
//! This crate establishes the foundational data structures and error handling
//! mechanisms used throughout the entire codebase. It carries no
//! context-specific behavior of its own; detection and enforcement of the
//! execution context live in `stratum-context`.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Domain types for the layered deployment topology, such as
//!   `Layer`, `Environment`, and `SecretBundle`.
//! - **`providers`**: Capability traits with one implementation per execution
//!   context, wired together by the registry in the `stratum` crate.
//! - **`constants`**: Shared static constants such as environment variable
//!   names and conventional file paths.

pub mod constants;
pub mod errors;
pub mod providers;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result, ResultExt},
    providers::{CredentialSource, EnvironmentDetector, SecretOrigin},
    types::*,
};
