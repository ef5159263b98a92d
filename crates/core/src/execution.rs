//! Task execution module
//!
//! This module handles the actual execution of tasks: resolving dependencies
//! in order, following references into other directories, running each
//! command once and reporting failures.

pub mod command;
pub mod runner;
pub mod task_ref;

pub use command::{CommandExecutor, ShellExecutor};
pub use runner::TaskRunner;
pub use task_ref::{parse_task_ref, resolve_namespace, TaskRef};
