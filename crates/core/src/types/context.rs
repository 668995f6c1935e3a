//! Execution context of the current process

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the current process is executing.
///
/// Governs which concrete providers are legal to construct. Derived from the
/// presence of the cluster credential mount; the probe that performs the
/// check lives in `stratum-context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionContext {
    /// Developer workstation
    Local,
    /// Cluster pod
    Cluster,
}

impl ExecutionContext {
    #[must_use]
    pub fn is_cluster(self) -> bool {
        matches!(self, ExecutionContext::Cluster)
    }

    #[must_use]
    pub fn is_local(self) -> bool {
        matches!(self, ExecutionContext::Local)
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionContext::Local => write!(f, "local"),
            ExecutionContext::Cluster => write!(f, "cluster"),
        }
    }
}
