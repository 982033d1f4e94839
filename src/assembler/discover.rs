use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use glob::{MatchOptions, Pattern};
use tracing::debug;

use crate::error::{AssembleError, Result};

const SOURCE_PATTERN: &str = "*.md";

static SOURCE_GLOB: LazyLock<Pattern> = LazyLock::new(|| Pattern::new(SOURCE_PATTERN).unwrap());

/// Shell-glob semantics: `*` does not match a leading dot.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A markdown file in the working directory that gets merged into the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

/// List `*.md` files directly inside `dir`, minus `output_name`, sorted by name.
pub fn discover_sources(dir: &Path, output_name: &str) -> Result<Vec<SourceFile>> {
    let entries = fs::read_dir(dir).map_err(|source| AssembleError::Discovery {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AssembleError::Discovery {
            dir: dir.to_path_buf(),
            source,
        })?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            // only names the pattern could select matter; hidden ones never are
            Err(os_name)
                if !os_name.as_encoded_bytes().starts_with(b".")
                    && os_name.to_string_lossy().ends_with(".md") =>
            {
                return Err(AssembleError::NonUtf8Name { name: os_name });
            }
            Err(_) => continue,
        };

        if !SOURCE_GLOB.matches_with(&name, MATCH_OPTIONS) || name == output_name {
            continue;
        }
        // follows symlinks, so a link to a markdown file still counts
        if !entry.path().is_file() {
            debug!("Skipping non-file entry {}", name);
            continue;
        }

        debug!("Found source {}", name);
        sources.push(SourceFile {
            name,
            path: entry.path(),
        });
    }

    sources.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    Ok(sources)
}
