use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::configs::kylefile::Kylefile;
use crate::types::{KyleError, KyleResult};

/// The textual encodings a Kylefile can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Yaml,
    Toml,
}

impl Format {
    pub const ALL: [Format; 2] = [Format::Yaml, Format::Toml];

    pub fn name(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
        }
    }

    /// File extensions (with the leading dot) mapped to this format
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &[".yaml", ".yml"],
            Self::Toml => &[".toml"],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext))
    }

    pub fn parse(self, content: &str) -> KyleResult<Kylefile> {
        let kylefile = match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(kylefile)
    }

    /// Serialize a document in this format, without any header comment.
    pub fn serialize(self, kylefile: &Kylefile) -> KyleResult<String> {
        let content = match self {
            Self::Yaml => serde_yaml::to_string(kylefile)?,
            Self::Toml => toml::to_string(kylefile)?,
        };
        Ok(content)
    }

    /// The comment placed on the first line so extensionless files can be
    /// sniffed.
    pub fn header(self) -> String {
        format!("# kyle: {}", self.name())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = KyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| KyleError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(Format::from_name("YAML"), Some(Format::Yaml));
        assert_eq!(Format::from_name(" toml "), Some(Format::Toml));
        assert_eq!(Format::from_name("json"), None);
        assert!(matches!(
            "ini".parse::<Format>(),
            Err(KyleError::UnknownFormat(name)) if name == "ini"
        ));
    }

    #[test]
    fn extensions_map_to_formats() {
        assert_eq!(Format::from_extension(".yml"), Some(Format::Yaml));
        assert_eq!(Format::from_extension(".yaml"), Some(Format::Yaml));
        assert_eq!(Format::from_extension(".toml"), Some(Format::Toml));
        assert_eq!(Format::from_extension(".json"), None);
    }

    #[test]
    fn both_formats_produce_the_same_document() {
        let yaml = "\
name: demo
tasks:
  build:
    desc: Build it
    run: cargo build
  test:
    run: cargo test
    deps: [build]
";
        let toml = r#"
name = "demo"

[tasks.build]
desc = "Build it"
run = "cargo build"

[tasks.test]
run = "cargo test"
deps = ["build"]
"#;

        let from_yaml = Format::Yaml.parse(yaml).unwrap();
        let from_toml = Format::Toml.parse(toml).unwrap();

        assert_eq!(from_yaml, from_toml);
        assert_eq!(from_yaml.tasks["test"].deps, vec!["build"]);
    }

    #[test]
    fn malformed_content_is_reported_per_format() {
        assert!(matches!(
            Format::Yaml.parse("tasks: [unclosed"),
            Err(KyleError::Yaml(_))
        ));
        assert!(matches!(
            Format::Toml.parse("name = "),
            Err(KyleError::Toml(_))
        ));
    }
}
