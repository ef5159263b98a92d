//! Task references
//!
//! A dependency or command-line task is either a plain name (`build`) or a
//! name in another directory's project file (`backend:build`,
//! `apps/frontend:test`).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::configs::kylefile::Includes;

const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef<'a> {
    pub namespace: Option<&'a str>,
    pub task: &'a str,
}

impl<'a> TaskRef<'a> {
    pub fn local(task: &'a str) -> Self {
        Self {
            namespace: None,
            task,
        }
    }

    pub fn is_namespaced(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for TaskRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(namespace) => write!(f, "{namespace}{SEPARATOR}{}", self.task),
            None => f.write_str(self.task),
        }
    }
}

/// Split `input` at its last `:`. Either side being empty means the whole
/// input is a plain task name.
pub fn parse_task_ref(input: &str) -> TaskRef<'_> {
    match input.rsplit_once(SEPARATOR) {
        Some((namespace, task)) if !namespace.is_empty() && !task.is_empty() => TaskRef {
            namespace: Some(namespace),
            task,
        },
        _ => TaskRef::local(input),
    }
}

/// Directory for `namespace`: the path an `includes` alias points at, or
/// the namespace itself taken as a path under `root`.
pub fn resolve_namespace(root: &Path, includes: &Includes, namespace: &str) -> PathBuf {
    match includes.path_for(namespace) {
        Some(path) => root.join(path),
        None => root.join(namespace),
    }
}
