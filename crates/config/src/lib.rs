//! Environment detection for stratum.
//!
//! Two `EnvironmentDetector` implementations, one per execution context:
//! the local variant reads a `.stratum.yaml` project file, the cluster
//! variant reads a config object in the layer's namespace. Both honor the
//! `STRATUM_ENV` process override first and fall back to the default track
//! when no source declares one.

pub mod cluster;
pub mod local;

pub use cluster::ClusterEnvironmentDetector;
pub use local::LocalEnvironmentDetector;
