//! High-level project interface
//!
//! [`Project`] is what the CLI works with: it loads the project file once,
//! remembers where it came from and hands the document to a [`TaskRunner`].
//! It also lists tasks and the namespaces below the project directory.
//!
//! ```rust,no_run
//! use kyle_core::project::{Project, ProjectConfig};
//! use kyle_core::settings::SettingsStore;
//!
//! # fn example() -> kyle_core::KyleResult<()> {
//! let settings = SettingsStore::default_location().load();
//! let project = Project::load(&ProjectConfig::default(), &settings)?;
//!
//! for task in project.list_tasks() {
//!     println!("{}", task.name);
//! }
//! project.run_task("build", &[])?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::configs::{discover_namespaces, load, DiscoveredNamespace, Kylefile};
use crate::configs::{LoadedKylefile, Source};
use crate::execution::TaskRunner;
use crate::results::TaskInfo;
use crate::settings::Settings;
use crate::types::KyleResult;

/// How to find the project file
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// Explicit project file; when unset the current directory is searched.
    pub file: Option<PathBuf>,
}

/// A loaded project file and the directory its tasks run in
#[derive(Debug, Clone)]
pub struct Project {
    pub kylefile: Kylefile,
    pub source: Source,
    pub path: PathBuf,
    pub root_dir: PathBuf,
    pub settings: Settings,
}

impl Project {
    pub fn load(config: &ProjectConfig, settings: &Settings) -> KyleResult<Self> {
        let loaded = load(config.file.as_deref(), settings)?;
        Ok(Self::from_loaded(loaded, settings))
    }

    pub fn from_loaded(loaded: LoadedKylefile, settings: &Settings) -> Self {
        let root_dir = project_root_dir(&loaded.path);
        Self {
            kylefile: loaded.kylefile,
            source: loaded.source,
            path: loaded.path,
            root_dir,
            settings: *settings,
        }
    }

    pub fn runner(&self) -> TaskRunner<'_> {
        TaskRunner::new(&self.kylefile, &self.root_dir).with_settings(self.settings)
    }

    pub fn list_tasks(&self) -> Vec<TaskInfo> {
        self.runner().list_tasks()
    }

    /// Subdirectories with a project file of their own.
    pub fn namespaces(&self) -> Vec<DiscoveredNamespace> {
        discover_namespaces(&self.root_dir)
    }

    /// Run `task_name` and its dependencies with a fresh runner.
    pub fn run_task(&self, task_name: &str, args: &[String]) -> KyleResult<()> {
        self.runner().run_with_args(task_name, args)
    }
}

/// Tasks run next to the project file. A bare filename means the current
/// directory.
fn project_root_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
