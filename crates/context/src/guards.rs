//! Constructor-time context guards.
//!
//! Every context-specific implementation calls its guard before performing
//! any I/O, so selecting the wrong arm fails at construction rather than at
//! first use. Vault code must never run in production pods, and cluster
//! adapters are useless on a workstation.

use crate::probe::ContextProbe;
use stratum_core::{Error, ExecutionContext, Result};

/// Refuse to proceed when running inside the cluster
pub fn ensure_local(probe: &ContextProbe) -> Result<()> {
    if probe.is_in_cluster() {
        return Err(Error::wrong_context(
            ExecutionContext::Local,
            "this component reads workstation state (vault files, project configuration) \
             and must not be constructed inside the cluster",
        ));
    }
    Ok(())
}

/// Refuse to proceed when running outside the cluster
pub fn ensure_cluster(probe: &ContextProbe) -> Result<()> {
    if !probe.is_in_cluster() {
        return Err(Error::wrong_context(
            ExecutionContext::Cluster,
            "this component talks to the cluster API from inside a pod \
             and must not be constructed on a dev machine",
        ));
    }
    Ok(())
}
