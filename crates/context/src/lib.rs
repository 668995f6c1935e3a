//! Execution-context detection for stratum.
//!
//! Determines whether code is running inside the cluster or on a local
//! workstation. This is the single source of truth for context detection
//! used by the provider registry and by every context-specific constructor.

pub mod guards;
pub mod probe;

pub use guards::{ensure_cluster, ensure_local};
pub use probe::{is_in_cluster, ContextProbe};
