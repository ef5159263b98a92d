//! Project file parsing
//!
//! A Kylefile is YAML or TOML; when no Kylefile exists a Makefile or justfile
//! in the same directory is read instead. Subdirectories holding any of these
//! are namespaces of the project.

pub mod discovery;
pub mod format;
pub mod justfile;
pub mod kylefile;
pub mod loader;
pub mod makefile;

use regex::Regex;

pub use discovery::{discover_namespaces, DiscoveredNamespace};
pub use format::Format;
pub use kylefile::{Includes, Kylefile, TaskConfig};
pub use loader::{load, load_file, load_from_dir, FileKind, LoadedKylefile, Source};

/// Compile one of the parsers' built-in patterns.
#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("built-in pattern is valid")
}
