use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::configs::format::Format;
use crate::configs::kylefile::Kylefile;
use crate::configs::{justfile, makefile};
use crate::settings::Settings;
use crate::types::{KyleError, KyleResult};

pub const DEFAULT_FILENAMES: &[&str] =
    &["Kylefile", "Kylefile.yaml", "Kylefile.yml", "Kylefile.toml"];
pub const FALLBACK_FILENAMES: &[&str] =
    &["Makefile", "makefile", "GNUmakefile", "justfile", "Justfile"];

const MAKEFILE_NAMES: &[&str] = &["Makefile", "makefile", "GNUmakefile"];
const JUSTFILE_NAMES: &[&str] = &["justfile", "Justfile"];
const HEADER_PREFIX: &str = "kyle:";

/// Kind of project file, judged by filename alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Kylefile,
    Makefile,
    Justfile,
}

impl FileKind {
    /// Kind of a conventional project filename, `None` for anything else.
    pub fn from_filename(name: &str) -> Option<Self> {
        if DEFAULT_FILENAMES.contains(&name) {
            Some(FileKind::Kylefile)
        } else if MAKEFILE_NAMES.contains(&name) {
            Some(FileKind::Makefile)
        } else if JUSTFILE_NAMES.contains(&name) {
            Some(FileKind::Justfile)
        } else {
            None
        }
    }
}

/// Position of `name` in discovery order; lower wins when a directory holds
/// several project files.
pub fn discovery_rank(name: &str) -> Option<usize> {
    DEFAULT_FILENAMES
        .iter()
        .chain(FALLBACK_FILENAMES)
        .position(|candidate| *candidate == name)
}

/// Where a loaded document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Kylefile(Format),
    Makefile,
    Justfile,
}

impl Source {
    pub fn is_kylefile(self) -> bool {
        matches!(self, Source::Kylefile(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Kylefile(format) => write!(f, "Kylefile ({format})"),
            Source::Makefile => f.write_str("Makefile"),
            Source::Justfile => f.write_str("justfile"),
        }
    }
}

/// A parsed project file together with its origin
#[derive(Debug, Clone)]
pub struct LoadedKylefile {
    pub kylefile: Kylefile,
    pub source: Source,
    pub path: PathBuf,
}

/// Load an explicit file, or discover one in the current directory.
pub fn load(path: Option<&Path>, settings: &Settings) -> KyleResult<LoadedKylefile> {
    match path {
        Some(path) => load_file(path, settings),
        None => load_from_dir(Path::new("."), settings),
    }
}

/// Load the first conventional project file found in `dir`.
pub fn load_from_dir(dir: &Path, settings: &Settings) -> KyleResult<LoadedKylefile> {
    let candidates = DEFAULT_FILENAMES.iter().chain(FALLBACK_FILENAMES);
    for name in candidates.clone() {
        let path = dir.join(name);
        if path.is_file() {
            return load_file(&path, settings);
        }
    }

    Err(KyleError::NotFound(candidates.copied().collect()))
}

pub fn load_file(path: &Path, settings: &Settings) -> KyleResult<LoadedKylefile> {
    let content = fs::read_to_string(path)?;
    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

    // Any other filename given explicitly is read as a Kylefile
    let kind = FileKind::from_filename(filename).unwrap_or(FileKind::Kylefile);
    let (kylefile, source) = match kind {
        FileKind::Makefile => (makefile::parse(&content), Source::Makefile),
        FileKind::Justfile => (justfile::parse(&content), Source::Justfile),
        FileKind::Kylefile => {
            let format = detect_format(path, &content, settings)?;
            (format.parse(&content)?, Source::Kylefile(format))
        }
    };

    debug!(
        path = %path.display(),
        %source,
        tasks = kylefile.tasks.len(),
        "loaded project file"
    );

    Ok(LoadedKylefile {
        kylefile,
        source,
        path: path.to_path_buf(),
    })
}

/// Pick the format from the extension, or from the header comment when the
/// file has none.
fn detect_format(path: &Path, content: &str, settings: &Settings) -> KyleResult<Format> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        let ext = format!(".{ext}");
        return Format::from_extension(&ext).ok_or(KyleError::UnsupportedExtension(ext));
    }

    match header_format(content) {
        Some(name) => Format::from_name(&name).ok_or(KyleError::UnknownFormat(name)),
        None => {
            debug!(format = %settings.default_format, "no format header, using default format");
            Ok(settings.default_format)
        }
    }
}

/// Extract `<format>` from a first line of the form `# kyle: <format>`.
fn header_format(content: &str) -> Option<String> {
    let line = content.lines().next()?.trim().strip_prefix('#')?.trim();
    let line = line.to_ascii_lowercase();
    let name = line.strip_prefix(HEADER_PREFIX)?.trim();
    Some(name.to_string())
}
