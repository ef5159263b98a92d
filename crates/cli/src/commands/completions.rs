use std::io;

use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Shell};

pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    generate(shell, cmd, "kyle", &mut io::stdout());
    Ok(())
}
