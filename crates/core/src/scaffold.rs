//! New-project scaffolding
//!
//! `kyle init` collects a project name and a few tasks interactively; this
//! module turns those answers into a [`Kylefile`] and its file contents.

use indexmap::IndexMap;

use crate::configs::{Format, Kylefile, TaskConfig};
use crate::types::{KyleError, KyleResult};

/// Filename written by `kyle init`
pub const KYLEFILE: &str = "Kylefile";

/// A task as entered in the init wizard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub desc: String,
    pub run: String,
}

/// Build the document for `name` from the wizard's drafts. Drafts without a
/// name are dropped; two drafts with the same name are an error.
pub fn scaffold(name: &str, drafts: Vec<TaskDraft>) -> KyleResult<Kylefile> {
    let mut tasks: IndexMap<String, TaskConfig> = IndexMap::new();
    for draft in drafts.into_iter().filter(|draft| !draft.name.is_empty()) {
        if tasks.contains_key(&draft.name) {
            return Err(KyleError::DuplicateTask(draft.name));
        }
        let task = TaskConfig {
            desc: draft.desc,
            run: draft.run,
            deps: Vec::new(),
        };
        tasks.insert(draft.name, task);
    }

    Ok(Kylefile {
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        name: name.to_string(),
        tasks,
        ..Default::default()
    })
}

/// File contents for `kylefile` in `format`.
///
/// The first line names the format so the extensionless `Kylefile` can be
/// read back without consulting settings.
pub fn render(format: Format, kylefile: &Kylefile) -> KyleResult<String> {
    let mut out = format.header();
    out.push('\n');
    out.push_str(&format.serialize(kylefile)?);

    if kylefile.tasks.is_empty() {
        out.push_str(example_task(format));
    }

    Ok(out)
}

fn example_task(format: Format) -> &'static str {
    match format {
        Format::Yaml => {
            "\n# tasks:\n#   example:\n#     desc: An example task\n#     run: echo hello\n"
        }
        Format::Toml => {
            "\n# [tasks.example]\n# desc = \"An example task\"\n# run = \"echo hello\"\n"
        }
    }
}
