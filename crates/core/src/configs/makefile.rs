//! Read the targets of a Makefile as kyle tasks.
//!
//! Only the shape kyle needs is understood: `target: prerequisites` lines
//! with tab-indented recipes. Variables, pattern rules and special targets
//! are skipped rather than interpreted.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::configs::kylefile::{Kylefile, TaskConfig};
use crate::configs::pattern;

static TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^([A-Za-z0-9_.%/\-]+)[ \t]*:([^=].*)?$"));

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^#\s*(.*)$"));

pub fn parse(content: &str) -> Kylefile {
    let mut tasks: IndexMap<String, TaskConfig> = IndexMap::new();
    let mut description: Option<String> = None;
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        if let Some(caps) = COMMENT_RE.captures(line) {
            let comment = caps[1].trim();
            if !comment.is_empty() {
                description = Some(comment.to_string());
            }
            continue;
        }

        let Some(caps) = TARGET_RE.captures(line) else {
            description = None;
            continue;
        };

        let name = &caps[1];
        let deps: Vec<String> = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .split_whitespace()
            .filter(|dep| !dep.starts_with('$') && !dep.contains('%'))
            .map(str::to_string)
            .collect();

        let mut commands = Vec::new();
        while let Some(next) = lines.peek() {
            if let Some(recipe) = next.strip_prefix('\t') {
                let recipe = recipe.trim_start_matches(['@', '-']).trim();
                if !recipe.is_empty() {
                    commands.push(recipe.to_string());
                }
            } else if !next.trim().is_empty() {
                break;
            }
            lines.next();
        }

        let desc = description.take().unwrap_or_default();
        // .PHONY, .DEFAULT and friends, plus pattern rules like %.o
        if name.starts_with('.') || name.contains('%') {
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
