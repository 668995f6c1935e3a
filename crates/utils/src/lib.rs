//! Shared utilities for stratum.
//!
//! Small pure helpers used across the workspace: synchronized process
//! environment access, a subprocess wrapper with consistent error mapping,
//! and ancestor-directory discovery for project-level files.

pub mod command;
pub mod paths;
pub mod sync;

pub use command::{run_command, CommandOutput};
pub use paths::find_in_ancestors;
pub use sync::env::SyncEnv;
