//! Namespace discovery
//!
//! Every directory below the project root that holds a project file is a
//! namespace, named by its path relative to the root (`backend`,
//! `apps/frontend`).

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::configs::loader::{discovery_rank, FileKind};

/// Directories that hold dependencies or build output, never namespaces
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "target",
    ".git",
    ".hg",
    ".svn",
    "vendor",
    "__pycache__",
    ".venv",
    "venv",
    "dist",
    "build",
    ".next",
    ".nuxt",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredNamespace {
    pub alias: String,
    pub path: PathBuf,
    pub kind: FileKind,
}

/// Namespaces under `root`, sorted by alias. A directory with several
/// project files is reported with the one `load_from_dir` would pick.
pub fn discover_namespaces(root: &Path) -> Vec<DiscoveredNamespace> {
    let mut found: BTreeMap<String, (usize, DiscoveredNamespace)> = BTreeMap::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(filename) = entry.file_name().to_str() else {
            continue;
        };
        let Some(kind) = FileKind::from_filename(filename) else {
            continue;
        };
        let rank = discovery_rank(filename).unwrap_or(usize::MAX);
        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let Some(alias) = alias_for(root, dir) else {
            continue;
        };

        let namespace = DiscoveredNamespace {
            alias: alias.clone(),
            path: dir.to_path_buf(),
            kind,
        };
        match found.entry(alias) {
            Entry::Vacant(slot) => {
                slot.insert((rank, namespace));
            }
            Entry::Occupied(mut slot) if rank < slot.get().0 => {
                slot.insert((rank, namespace));
            }
            Entry::Occupied(_) => {}
        }
    }

    found.into_values().map(|(_, namespace)| namespace).collect()
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// `/`-separated path of `dir` below `root`; `None` for the root itself.
fn alias_for(root: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
