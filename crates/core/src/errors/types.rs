//! Core error type definitions

use crate::types::{ExecutionContext, Layer};
use std::path::PathBuf;

/// Result type alias for stratum operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stratum operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A context-specific implementation was constructed in the wrong
    /// execution context. Fatal, surfaced at construction, never retried.
    WrongContext {
        required: ExecutionContext,
        message: String,
    },

    /// A discovered source exists but is malformed, or wiring is invalid
    Configuration { message: String },

    /// No bundle or credential found where one is mandatory
    ServiceNotFound {
        service: String,
        layer: Layer,
        message: String,
    },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing errors for vault and project files
    Yaml { path: PathBuf, message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Command execution errors
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },
}
