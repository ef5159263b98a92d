//! Command execution
//!
//! The runner hands each task's command to a [`CommandExecutor`]. The real
//! implementation spawns a shell; tests substitute one that only records.

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

const SHELL: &str = "sh";
const SHELL_FLAG: &str = "-c";

/// Something that can run a task's command to completion
pub trait CommandExecutor {
    /// Run `command` for `task_name` inside `working_dir`, returning an error
    /// if it could not be started or did not exit successfully.
    fn execute(&mut self, working_dir: &Path, task_name: &str, command: &str) -> io::Result<()>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &mut T {
    fn execute(&mut self, working_dir: &Path, task_name: &str, command: &str) -> io::Result<()> {
        (**self).execute(working_dir, task_name, command)
    }
}

/// Runs commands through `sh -c`, sharing this process's stdin, stdout and
/// stderr with the child.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn execute(&mut self, working_dir: &Path, task_name: &str, command: &str) -> io::Result<()> {
        debug!(task = task_name, command, dir = %working_dir.display(), "spawning shell");

        let status = Command::new(SHELL)
            .arg(SHELL_FLAG)
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(io::Error::other(format!(
                "exit code: {}",
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
