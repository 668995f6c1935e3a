//! Builder methods for creating errors with context

use super::types::Error;
use crate::types::{ExecutionContext, Layer};
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a wrong-execution-context error
    #[must_use]
    pub fn wrong_context(required: ExecutionContext, message: impl Into<String>) -> Self {
        Error::WrongContext {
            required,
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a service-not-found error
    #[must_use]
    pub fn service_not_found(
        service: impl Into<String>,
        layer: Layer,
        message: impl Into<String>,
    ) -> Self {
        Error::ServiceNotFound {
            service: service.into(),
            layer,
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a YAML parse error with context
    #[must_use]
    pub fn yaml(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Yaml {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a JSON error with a source error
    #[must_use]
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Error::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }
}
