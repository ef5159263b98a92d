use std::path::PathBuf;

use thiserror::Error;

/// The main error type for kyle operations
#[derive(Debug, Error)]
pub enum KyleError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("yaml parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("unknown format: {0}")]
    UnknownFormat(String),

    #[error("unsupported file format: {0}")]
    UnsupportedExtension(String),

    #[error("no Kylefile found (looked for: {})", .0.join(", "))]
    NotFound(Vec<&'static str>),

    #[error("unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("invalid value '{value}' for {key} (allowed: {allowed})")]
    InvalidConfigValue {
        key: String,
        value: String,
        allowed: String,
    },

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("duplicate task '{0}'")]
    DuplicateTask(String),

    #[error("namespace not found: {namespace} ({})", .path.display())]
    NamespaceNotFound { namespace: String, path: PathBuf },

    #[error("failed to load namespace '{namespace}': {source}")]
    NamespaceLoadFailed {
        namespace: String,
        #[source]
        source: Box<KyleError>,
    },

    #[error("dependency '{dep}' failed: {source}")]
    DependencyFailed {
        dep: String,
        #[source]
        source: Box<KyleError>,
    },

    #[error("dependency cycle detected: {}", .cycle.join(" -> "))]
    DependencyCycle { cycle: Vec<String> },

    #[error("task '{task}' failed: {source}")]
    ExecutionFailed {
        task: String,
        #[source]
        source: std::io::Error,
    },
}

impl KyleError {
    /// Name of the task that ultimately failed, following dependency wrapping
    /// down to the innermost error.
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            KyleError::DependencyFailed { source, .. } => source.failed_task(),
            KyleError::ExecutionFailed { task, .. } => Some(task),
            KyleError::TaskNotFound(name) => Some(name),
            _ => None,
        }
    }
}

/// Result type alias for kyle operations
pub type KyleResult<T> = Result<T, KyleError>;
