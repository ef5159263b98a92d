//! Kyle Core Library
//!
//! This is the core library for the kyle task runner. It provides everything
//! except the command line: reading project files, user settings, project
//! scaffolding and the task execution engine.
//!
//! ## Architecture
//!
//! - [`project`] - Loads a project file and hands it to the runner
//! - [`execution`] - Task runner with dependency resolution and cycle detection
//! - [`configs`] - Kylefile model, YAML/TOML formats, Makefile and justfile fallbacks
//! - [`settings`] - Persistent user settings
//! - [`scaffold`] - Builds and renders new Kylefiles for `kyle init`
//! - [`results`] - Result types for display
//! - [`types`] - Common error type and result alias
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kyle_core::configs::Format;
//! use kyle_core::execution::TaskRunner;
//!
//! # fn example() -> kyle_core::KyleResult<()> {
//! let kylefile = Format::Toml.parse(r#"
//!     [tasks.build]
//!     run = "cargo build"
//!
//!     [tasks.test]
//!     run = "cargo test"
//!     deps = ["build"]
//! "#)?;
//!
//! let mut runner = TaskRunner::new(&kylefile, ".");
//! runner.run("test")?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod project;
pub mod results;
pub mod scaffold;
pub mod settings;
pub mod types;

// Re-export the main types for easier usage
pub use project::{Project, ProjectConfig};
pub use types::{KyleError, KyleResult};
