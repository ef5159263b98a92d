//! Task runner
//!
//! Runs a task after its dependencies, depth-first in declared order. Each
//! task runs at most once per runner, so a dependency shared by several
//! tasks is only executed the first time it is reached.
//!
//! A dependency written as `namespace:task` names a task in the project
//! file of another directory. That file is loaded when the reference is
//! reached and its tasks run in their own directory. Run-once tracking and
//! cycle detection span namespaces: inside a namespace every task is keyed
//! as `namespace:task`.

use std::collections::HashMap;
use std::io;
use std::mem;
use std::path::{Path, PathBuf};

use colored::*;
use tracing::debug;

use crate::configs::kylefile::{Includes, Kylefile, TaskConfig};
use crate::configs::loader::load_from_dir;
use crate::execution::command::{CommandExecutor, ShellExecutor};
use crate::execution::task_ref::{parse_task_ref, resolve_namespace};
use crate::results::TaskInfo;
use crate::settings::Settings;
use crate::types::{KyleError, KyleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Executes tasks of a single [`Kylefile`] for one invocation
pub struct TaskRunner<'a, E = ShellExecutor> {
    kylefile: &'a Kylefile,
    executor: E,
    working_dir: PathBuf,
    // Namespaces resolve against this directory and the root file's includes
    root_dir: PathBuf,
    includes: Includes,
    settings: Settings,
    namespace: Option<String>,
    states: HashMap<String, VisitState>,
    // Tasks currently being resolved, outermost first
    stack: Vec<String>,
}

impl<'a> TaskRunner<'a, ShellExecutor> {
    /// Runner that executes commands with `sh` inside `working_dir`
    pub fn new(kylefile: &'a Kylefile, working_dir: impl Into<PathBuf>) -> Self {
        Self::with_executor(kylefile, ShellExecutor).in_dir(working_dir)
    }
}

impl<'a, E: CommandExecutor> TaskRunner<'a, E> {
    pub fn with_executor(kylefile: &'a Kylefile, executor: E) -> Self {
        Self {
            kylefile,
            executor,
            working_dir: PathBuf::from("."),
            root_dir: PathBuf::from("."),
            includes: kylefile.includes.clone(),
            settings: Settings::default(),
            namespace: None,
            states: HashMap::new(),
            stack: Vec::new(),
        }
    }

    /// Run tasks in `dir`, which is also the root namespaces resolve from.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self.root_dir = self.working_dir.clone();
        self
    }

    /// Settings used when loading namespace project files.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn kylefile(&self) -> &Kylefile {
        self.kylefile
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Whether a task has already run successfully through this runner.
    /// Tasks of other directories are named `namespace:task`.
    pub fn is_executed(&self, key: &str) -> bool {
        self.states.get(key) == Some(&VisitState::Done)
    }

    /// Run a task and, before it, everything it depends on.
    pub fn run(&mut self, task_name: &str) -> KyleResult<()> {
        self.run_with_args(task_name, &[])
    }

    /// Like [`run`](Self::run), appending `args` to the requested task's
    /// command. Dependencies never see the extra arguments.
    pub fn run_with_args(&mut self, task_name: &str, args: &[String]) -> KyleResult<()> {
        let extra_args = if args.is_empty() {
            None
        } else {
            let joined = shlex::try_join(args.iter().map(String::as_str)).map_err(|e| {
                KyleError::ExecutionFailed {
                    task: task_name.to_string(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
                }
            })?;
            Some(joined)
        };

        self.visit(task_name, extra_args.as_deref())
    }

    /// Name and description of every task, in declaration order.
    pub fn list_tasks(&self) -> Vec<TaskInfo> {
        self.kylefile
            .tasks
            .iter()
            .map(|(name, task)| TaskInfo::new(name, task))
            .collect()
    }

    fn visit(&mut self, reference: &str, extra_args: Option<&str>) -> KyleResult<()> {
        // A task literally named `a:b` in this file wins over namespace `a`
        if self.kylefile.task(reference).is_some() {
            return self.visit_local(reference, extra_args);
        }

        let task_ref = parse_task_ref(reference);
        match task_ref.namespace {
            Some(namespace) => self.visit_namespace(namespace, task_ref.task, extra_args),
            None => self.visit_local(reference, extra_args),
        }
    }

    fn visit_local(&mut self, task_name: &str, extra_args: Option<&str>) -> KyleResult<()> {
        let key = self.key(task_name);
        let kylefile = self.kylefile;
        let task = kylefile
            .task(task_name)
            .ok_or_else(|| KyleError::TaskNotFound(key.clone()))?;

        match self.states.get(&key) {
            Some(VisitState::Done) => {
                debug!(task = %key, "already executed, skipping");
                return Ok(());
            }
            Some(VisitState::InProgress) => return Err(self.cycle_error(&key)),
            None => {}
        }

        self.states.insert(key.clone(), VisitState::InProgress);
        self.stack.push(key.clone());

        let result = self
            .run_dependencies(task)
            .and_then(|()| self.execute(&key, task, extra_args));

        self.stack.pop();
        match result {
            Ok(()) => {
                self.states.insert(key, VisitState::Done);
            }
            Err(_) => {
                self.states.remove(&key);
            }
        }
        result
    }

    /// Load the project file of `namespace` and run `task_name` from it in
    /// that directory, sharing this runner's bookkeeping.
    fn visit_namespace(
        &mut self,
        namespace: &str,
        task_name: &str,
        extra_args: Option<&str>,
    ) -> KyleResult<()> {
        let key = format!("{namespace}:{task_name}");
        if self.is_executed(&key) {
            debug!(task = %key, "already executed, skipping");
            return Ok(());
        }

        let dir = resolve_namespace(&self.root_dir, &self.includes, namespace);
        if !dir.is_dir() {
            return Err(KyleError::NamespaceNotFound {
                namespace: namespace.to_string(),
                path: dir,
            });
        }

        let loaded =
            load_from_dir(&dir, &self.settings).map_err(|e| KyleError::NamespaceLoadFailed {
                namespace: namespace.to_string(),
                source: Box::new(e),
            })?;
        debug!(namespace, dir = %dir.display(), source = %loaded.source, "entering namespace");

        let executor: &mut dyn CommandExecutor = &mut self.executor;
        let mut child = TaskRunner {
            kylefile: &loaded.kylefile,
            executor,
            working_dir: dir,
            root_dir: self.root_dir.clone(),
            includes: self.includes.clone(),
            settings: self.settings,
            namespace: Some(namespace.to_string()),
            states: mem::take(&mut self.states),
            stack: mem::take(&mut self.stack),
        };

        let result = child.visit_local(task_name, extra_args);

        self.states = child.states;
        self.stack = child.stack;
        result
    }

    fn run_dependencies(&mut self, task: &TaskConfig) -> KyleResult<()> {
        for dep in &task.deps {
            debug!(dependency = %dep, "resolving dependency");
            self.visit(dep, None).map_err(|e| KyleError::DependencyFailed {
                dep: dep.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    fn execute(
        &mut self,
        key: &str,
        task: &TaskConfig,
        extra_args: Option<&str>,
    ) -> KyleResult<()> {
        let command = match extra_args {
            Some(args) => format!("{} {}", task.run, args),
            None => task.run.clone(),
        };

        println!("{} {}", "→".cyan().bold(), key.bold());

        self.executor
            .execute(&self.working_dir, key, &command)
            .map_err(|source| KyleError::ExecutionFailed {
                task: key.to_string(),
                source,
            })
    }

    /// State key for a task of the file this runner executes.
    fn key(&self, task_name: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{task_name}"),
            None => task_name.to_string(),
        }
    }

    /// Build the cycle from the first in-progress occurrence of `key`.
    fn cycle_error(&self, key: &str) -> KyleError {
        let start = self.stack.iter().position(|name| name == key).unwrap_or(0);
        let mut cycle = self.stack[start..].to_vec();
        cycle.push(key.to_string());
        KyleError::DependencyCycle { cycle }
    }
}
