use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub desc: String,
    #[serde(default)]
    pub run: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,
}

impl TaskConfig {
    /// The task description, if one was given.
    pub fn description(&self) -> Option<&str> {
        if self.desc.is_empty() {
            None
        } else {
            Some(&self.desc)
        }
    }
}

/// Namespaces a Kylefile declares up front, either as a list of directories
/// (the alias is the last path component) or as an `alias: path` map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Includes {
    #[default]
    None,
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

impl Includes {
    pub fn is_empty(&self) -> bool {
        match self {
            Includes::None => true,
            Includes::List(paths) => paths.is_empty(),
            Includes::Map(map) => map.is_empty(),
        }
    }

    /// `(alias, path)` pairs in declaration order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Includes::None => Box::new(std::iter::empty()),
            Includes::List(paths) => Box::new(paths.iter().map(|path| {
                let alias = Path::new(path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(path);
                (alias, path.as_str())
            })),
            Includes::Map(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        }
    }

    /// Directory declared for `alias`, if any.
    pub fn path_for(&self, alias: &str) -> Option<&str> {
        self.iter()
            .find(|(name, _)| *name == alias)
            .map(|(_, path)| path)
    }
}

/// In-memory representation of a project file.
///
/// Tasks keep their declaration order, which is also the order they are
/// listed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Kylefile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Includes::is_empty")]
    pub includes: Includes,
    #[serde(
        default,
        deserialize_with = "unique_tasks",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub tasks: IndexMap<String, TaskConfig>,
}

impl Kylefile {
    pub fn task(&self, name: &str) -> Option<&TaskConfig> {
        self.tasks.get(name)
    }
}

/// Deserialize the task table, refusing a task name that appears twice.
fn unique_tasks<'de, D>(deserializer: D) -> Result<IndexMap<String, TaskConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TasksVisitor;

    impl<'de> Visitor<'de> for TasksVisitor {
        type Value = IndexMap<String, TaskConfig>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a table of tasks")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut tasks = IndexMap::new();
            while let Some(name) = map.next_key::<String>()? {
                if tasks.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate task '{name}'")));
                }
                let task = map.next_value::<TaskConfig>()?;
                tasks.insert(name, task);
            }
            Ok(tasks)
        }

        // `tasks:` with nothing under it is YAML null
        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(IndexMap::new())
        }
    }

    deserializer.deserialize_map(TasksVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_none_when_empty() {
        let task = TaskConfig {
            run: "echo hi".into(),
            ..Default::default()
        };
        assert_eq!(task.description(), None);

        let task = TaskConfig {
            desc: "Say hi".into(),
            ..task
        };
        assert_eq!(task.description(), Some("Say hi"));
    }

    #[test]
    fn tasks_keep_declaration_order() {
        let kf: Kylefile = serde_yaml::from_str(
            "name: demo\ntasks:\n  zeta:\n    run: z\n  alpha:\n    run: a\n  mid:\n    run: m\n",
        )
        .unwrap();
        let names: Vec<_> = kf.tasks.keys().map(String::as_str).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_task_is_rejected() {
        let err = serde_yaml::from_str::<Kylefile>(
            "tasks:\n  build:\n    run: one\n  build:\n    run: two\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"), "{err}");
    }

    #[test]
    fn empty_tasks_section_is_allowed() {
        let kf: Kylefile = serde_yaml::from_str("name: demo\ntasks:\n").unwrap();
        assert!(kf.tasks.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result =
            toml::from_str::<Kylefile>("name = \"x\"\n[tasks.a]\nrun = \"a\"\ncmd = \"b\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn includes_as_list() {
        let kf: Kylefile = serde_yaml::from_str(
            "name: demo\nincludes:\n  - backend\n  - apps/frontend\ntasks:\n  build:\n    run: b\n",
        )
        .unwrap();

        let pairs: Vec<_> = kf.includes.iter().collect();
        assert_eq!(pairs, [("backend", "backend"), ("frontend", "apps/frontend")]);
        assert_eq!(kf.includes.path_for("frontend"), Some("apps/frontend"));
        assert_eq!(kf.tasks["build"].run, "b");
    }

    #[test]
    fn includes_as_map() {
        let kf: Kylefile = toml::from_str(
            "[includes]\napi = \"services/api\"\nweb = \"apps/web\"\n\n[tasks.a]\nrun = \"a\"\n",
        )
        .unwrap();

        let pairs: Vec<_> = kf.includes.iter().collect();
        assert_eq!(pairs, [("api", "services/api"), ("web", "apps/web")]);
        assert_eq!(kf.includes.path_for("missing"), None);
    }

    #[test]
    fn includes_are_optional_and_not_written_when_empty() {
        let kf: Kylefile = serde_yaml::from_str("name: demo\n").unwrap();
        assert!(kf.includes.is_empty());

        let yaml = serde_yaml::to_string(&kf).unwrap();
        assert!(!yaml.contains("includes"), "{yaml}");
    }
}
