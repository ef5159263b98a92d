use std::env;
use std::path::PathBuf;

use anyhow::Result;
use kyle_core::configs::Kylefile;
use kyle_core::execution::{parse_task_ref, TaskRunner};
use kyle_core::settings::Settings;
use tracing::info;

use super::{find_project, no_project};

pub fn execute(
    file: Option<PathBuf>,
    settings: &Settings,
    task: &str,
    args: &[String],
) -> Result<()> {
    if let Some(project) = find_project(file, settings)? {
        info!(task, file = %project.path.display(), "running task");
        project.run_task(task, args)?;
        return Ok(());
    }

    // Without a local project file only `namespace:task` can run
    if !parse_task_ref(task).is_namespaced() {
        return Err(no_project());
    }

    let root = env::current_dir()?;
    info!(task, root = %root.display(), "running namespaced task");
    let empty = Kylefile::default();
    TaskRunner::new(&empty, root)
        .with_settings(*settings)
        .run_with_args(task, args)?;
    Ok(())
}
