use std::env;
use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use kyle_core::configs::{discover_namespaces, DiscoveredNamespace, FileKind, Includes};
use kyle_core::settings::Settings;
use kyle_core::Project;

use super::{find_project, no_project};

/// List the project's tasks and the namespaces around it. Without a local
/// project file only discovered namespaces are shown.
pub fn execute(file: Option<PathBuf>, settings: &Settings) -> Result<()> {
    let Some(project) = find_project(file, settings)? else {
        let discovered = discover_namespaces(&env::current_dir()?);
        if discovered.is_empty() {
            return Err(no_project());
        }
        println!("{}", "Discovered namespaces:".bold());
        print_namespaces(&discovered);
        return Ok(());
    };

    print_tasks(&project);

    let includes = &project.kylefile.includes;
    if !includes.is_empty() {
        println!("\n{}", "Namespaces (from includes):".bold());
        print_includes(includes);
    }

    let discovered = project.namespaces();
    if !discovered.is_empty() {
        println!("\n{}", "Discovered namespaces:".bold());
        print_namespaces(&discovered);
    }

    Ok(())
}

fn print_tasks(project: &Project) {
    println!("{}", "Available tasks:".bold());

    let tasks = project.list_tasks();
    if tasks.is_empty() {
        println!("  {}", "No tasks defined".dimmed());
        return;
    }

    for task in tasks {
        match task.description {
            Some(desc) => println!("  {} - {}", task.name.cyan().bold(), desc),
            None => println!("  {}", task.name.cyan().bold()),
        }
    }
}

fn print_includes(includes: &Includes) {
    for (alias, path) in includes.iter() {
        println!("  {}: {}", alias.cyan().bold(), path.dimmed());
    }
}

fn print_namespaces(namespaces: &[DiscoveredNamespace]) {
    for namespace in namespaces {
        let kind = match namespace.kind {
            FileKind::Kylefile => "",
            FileKind::Makefile => " (Makefile)",
            FileKind::Justfile => " (justfile)",
        };
        println!("  {}:{}", namespace.alias.cyan().bold(), kind.dimmed());
    }
}
