//! Result types returned to the CLI for display

use crate::configs::kylefile::TaskConfig;

/// A task as shown by `kyle` with no arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
}

impl TaskInfo {
    pub fn new(name: &str, task: &TaskConfig) -> Self {
        Self {
            name: name.to_string(),
            description: task.description().map(str::to_string),
            dependencies: task.deps.clone(),
        }
    }
}
