use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::*;
use kyle_core::configs::Format;
use kyle_core::settings::SettingsStore;

mod commands;
mod logging;
mod prompt;

use commands::config::ConfigAction;
use commands::init::InitOptions;
use logging::LogLevel;
use prompt::Prompter;

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(name = "kyle", about = "kyle - task runner")]
#[command(version = VERSION, disable_version_flag = true)]
struct Cli {
    /// Project file to use instead of searching the current directory
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Log level for diagnostics on stderr (overrides KYLE_LOG)
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,

    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Task to run, `namespace:task` for another directory (lists tasks when omitted)
    #[arg(value_name = "TASK")]
    task: Option<String>,

    /// Arguments appended to the task's command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Kylefile
    Init {
        /// Project name
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Use YAML format
        #[arg(long, conflicts_with = "toml")]
        yaml: bool,

        /// Use TOML format
        #[arg(long)]
        toml: bool,

        /// Overwrite an existing Kylefile
        #[arg(long)]
        force: bool,
    },

    /// Configure kyle settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Print version
    Version,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "error:".red().bold());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    // Settings are read once here and passed down
    let store = SettingsStore::default_location();
    let settings = store.load();

    match cli.command {
        Some(Commands::Init {
            name,
            yaml,
            toml,
            force,
        }) => {
            let format = if yaml {
                Some(Format::Yaml)
            } else if toml {
                Some(Format::Toml)
            } else {
                None
            };
            let options = InitOptions { name, format, force };
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            let cwd = std::env::current_dir()?;
            commands::init::execute(options, &settings, &mut prompter, &cwd)?;
            Ok(())
        }
        Some(Commands::Config { action }) => {
            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            commands::config::execute(action, &store, &mut prompter)
        }
        Some(Commands::Version) => {
            println!("kyle {VERSION}");
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell, &mut Cli::command())
        }
        None => match cli.task {
            Some(task) => commands::run::execute(cli.file, &settings, &task, &cli.args),
            None => commands::list::execute(cli.file, &settings),
        },
    }
}
