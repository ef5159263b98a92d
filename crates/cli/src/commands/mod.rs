pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod run;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use colored::*;
use kyle_core::settings::Settings;
use kyle_core::{KyleError, Project, ProjectConfig};

const INIT_HINT: &str = "Run 'kyle init' to create one.";

pub fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message);
}

/// Load the project, or `None` when the current directory has no project
/// file. Falling back to a Makefile or justfile prints a warning.
pub fn find_project(file: Option<PathBuf>, settings: &Settings) -> Result<Option<Project>> {
    let project = match Project::load(&ProjectConfig { file }, settings) {
        Ok(project) => project,
        Err(KyleError::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if !project.source.is_kylefile() {
        warn(&format!(
            "no Kylefile found, using {}. {INIT_HINT}",
            project.source
        ));
    }

    Ok(Some(project))
}

/// Error for a directory without a project file, with the `kyle init` hint.
pub fn no_project() -> anyhow::Error {
    anyhow!("No Kylefile found in current directory.\n\n  {INIT_HINT}")
}
