//! Read the recipes of a justfile as kyle tasks.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::configs::kylefile::{Kylefile, TaskConfig};
use crate::configs::pattern;

static RECIPE_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^@?([A-Za-z_][A-Za-z0-9_\-]*)(?:\s+[^:]+)?:\s*([^=].*)?$"));

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^#\s*(.*)$"));

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^(set|alias|export|import|mod)\s+"));

pub fn parse(content: &str) -> Kylefile {
    let mut tasks: IndexMap<String, TaskConfig> = IndexMap::new();
    let mut description: Option<String> = None;
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if DIRECTIVE_RE.is_match(line) {
            description = None;
            continue;
        }

        if let Some(caps) = COMMENT_RE.captures(line) {
            let comment = caps[1].trim();
            if !comment.is_empty() && !comment.starts_with('!') {
                description = Some(comment.to_string());
            }
            continue;
        }

        let Some(caps) = RECIPE_RE.captures(line) else {
            description = None;
            continue;
        };

        let name = &caps[1];
        let deps: Vec<String> = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split_whitespace()
            .filter(|dep| !dep.starts_with('(') && !dep.ends_with(')') && !dep.contains('='))
            .map(str::to_string)
            .collect();

        let mut commands = Vec::new();
        while let Some(next) = lines.peek() {
            if next.starts_with('\t') || next.starts_with("    ") {
                let body = next.trim();
                let body = body.strip_prefix('@').unwrap_or(body);
                if !body.is_empty() {
                    commands.push(body.to_string());
                }
            } else if !next.trim().is_empty() {
                break;
            }
            lines.next();
        }

        let desc = description.take().unwrap_or_default();
        if name.starts_with('_') {
            continue;
        }

        tasks.insert(
            name.to_string(),
            TaskConfig {
                desc,
                run: commands.join(" && "),
                deps,
            },
        );
    }

    Kylefile {
        tasks,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_recipe() {
        let kf = parse("build:\n    cargo build\n");
        assert_eq!(kf.tasks["build"].run, "cargo build");
    }

    #[test]
    fn recipe_dependencies() {
        let kf = parse("test: build\n    cargo test\n");
        assert_eq!(kf.tasks["test"].deps, vec!["build"]);
    }

    #[test]
    fn comment_becomes_description() {
        let kf = parse("# Build the project\nbuild:\n    cargo build\n");
        assert_eq!(kf.tasks["build"].desc, "Build the project");
    }

    #[test]
    fn private_recipes_are_hidden() {
        let kf = parse("_helper:\n    echo helper\n\nbuild:\n    echo build\n");
        assert!(!kf.tasks.contains_key("_helper"));
        assert!(kf.tasks.contains_key("build"));
    }

    #[test]
    fn settings_and_aliases_are_skipped() {
        let kf = parse(
            "set shell := [\"bash\", \"-c\"]\nalias b := build\n\nbuild:\n    echo build\n",
        );
        assert_eq!(kf.tasks.len(), 1);
        assert!(kf.tasks.contains_key("build"));
    }

    #[test]
    fn variables_are_skipped() {
        let kf = parse("version := \"1.0\"\n\nbuild:\n    echo {{version}}\n");
        assert_eq!(kf.tasks.len(), 1);
    }

    #[test]
    fn quiet_prefix_and_multiple_lines() {
        let kf = parse("build:\n    @echo step1\n\techo step2\n");
        assert_eq!(kf.tasks["build"].run, "echo step1 && echo step2");
    }

    #[test]
    fn parameters_are_not_dependencies() {
        let kf = parse("deploy env='dev': build (check env)\n    ./deploy.sh {{env}}\n");
        assert_eq!(kf.tasks["deploy"].deps, vec!["build"]);
    }

    #[test]
    fn shebang_comment_is_not_a_description() {
        let kf = parse("#!/usr/bin/env just\nbuild:\n    echo build\n");
        assert_eq!(kf.tasks["build"].desc, "");
    }
}
