//! Deployment environment name

use crate::constants::DEFAULT_ENVIRONMENT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named deployment track (e.g. `dev`, `staging`, `prod`).
///
/// The set of tracks is open-ended: layers may in principle report any name,
/// so this is a thin wrapper over the raw string rather than a closed enum.
/// Resolved per layer at runtime, though in practice one environment is
/// shared by all layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self(DEFAULT_ENVIRONMENT.to_string())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Environment {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<&str> for Environment {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
