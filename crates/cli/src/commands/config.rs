use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use kyle_core::settings::{SettingsStore, DEFAULT_FORMAT_KEY};

use crate::prompt::Prompter;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show all settings
    List,

    /// Get a config value
    Get {
        /// Config key
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },

    /// Show config file path
    Path,
}

pub fn execute<R: BufRead, W: Write>(
    action: Option<ConfigAction>,
    store: &SettingsStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    match action {
        Some(ConfigAction::List) => {
            for (key, value) in store.list() {
                println!("  {key} = {value}");
            }
        }
        Some(ConfigAction::Get { key }) => println!("{}", store.get_value(&key)?),
        Some(ConfigAction::Set { key, value }) => {
            store.set(&key, &value)?;
            println!("  {key} = {value}");
        }
        Some(ConfigAction::Path) => println!("{}", store.path().display()),
        None => run_interactive(store, prompter)?,
    }
    Ok(())
}

fn run_interactive<R: BufRead, W: Write>(
    store: &SettingsStore,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    prompter.say(&format!("\n  {}", "Kyle Configuration".bold()))?;
    prompter.say("  ──────────────────")?;
    prompter.say(&format!("  Config file: {}\n", store.path().display()))?;

    let current = store.load().default_format.to_string();
    let answer = prompter.ask("Default format", Some(&current))?;

    if answer != current {
        store.set(DEFAULT_FORMAT_KEY, &answer)?;
        prompter.say(&format!("  {} Updated", "✓".green()))?;
    }

    prompter.say("")?;
    Ok(())
}
