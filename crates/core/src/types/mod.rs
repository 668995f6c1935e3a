//! Domain types for the layered deployment topology

mod bundle;
mod context;
mod environment;
mod layer;

pub use bundle::{ResolvedSecrets, SecretBundle, ServiceCredentials};
pub use context::ExecutionContext;
pub use environment::Environment;
pub use layer::Layer;
