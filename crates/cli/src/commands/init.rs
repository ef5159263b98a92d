use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use kyle_core::configs::Format;
use kyle_core::scaffold::{render, scaffold, TaskDraft, KYLEFILE};
use kyle_core::settings::Settings;

use crate::prompt::Prompter;

const DEFAULT_PROJECT_NAME: &str = "project";

pub struct InitOptions {
    pub name: Option<String>,
    pub format: Option<Format>,
    pub force: bool,
}

/// Run the init wizard and write `Kylefile` into `dir`.
pub fn execute<R: BufRead, W: Write>(
    options: InitOptions,
    settings: &Settings,
    prompter: &mut Prompter<R, W>,
    dir: &Path,
) -> Result<PathBuf> {
    let path = dir.join(KYLEFILE);
    if path.exists() && !options.force {
        bail!("{KYLEFILE} already exists (use --force to overwrite)");
    }

    let name = match options.name {
        Some(name) => name,
        None => {
            let default_name = dir
                .canonicalize()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());
            prompter.ask("Project name", Some(&default_name))?
        }
    };
    let format = options.format.unwrap_or(settings.default_format);

    let mut drafts = Vec::new();
    if prompter.confirm("Add a task?", true)? {
        loop {
            let draft = prompt_task(prompter, &drafts)?;
            drafts.push(draft);
            if !prompter.confirm("Add another task?", false)? {
                break;
            }
        }
    }

    let kylefile = scaffold(&name, drafts)?;
    let content = render(format, &kylefile)?;
    fs::write(&path, content)
        .map_err(|e| anyhow!("failed to write {}: {e}", path.display()))?;

    prompter.say(&format!("\n  Created {KYLEFILE}\n"))?;
    Ok(path)
}

fn prompt_task<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    existing: &[TaskDraft],
) -> Result<TaskDraft> {
    let name = loop {
        let name = prompter.ask("Task name", None)?;
        // An empty name is dropped later, so only real clashes are re-asked
        if name.is_empty() || !existing.iter().any(|draft| draft.name == name) {
            break name;
        }
        prompter.say(&format!("  Task '{name}' already added, pick another name"))?;
    };
    let desc = prompter.ask("Description (optional)", None)?;
    let run = prompter.ask("Command", None)?;
    prompter.say("")?;

    Ok(TaskDraft { name, desc, run })
}
