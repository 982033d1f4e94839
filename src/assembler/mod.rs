pub mod discover;
pub mod render;
pub mod title;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{AssembleError, Result};
use crate::settings::Settings;
pub use discover::SourceFile;
pub use render::{Document, Header, Section};

/// Read one source file and derive its heading. The file handle is closed
/// before returning on every path.
pub fn load_section(source: &SourceFile, strict: bool) -> Result<Section> {
    if strict {
        title::validate_name(&source.name)?;
    }

    let bytes = fs::read(&source.path).map_err(|e| AssembleError::Read {
        path: source.path.clone(),
        source: e,
    })?;
    let body = String::from_utf8(bytes).map_err(|_| AssembleError::Decode {
        path: source.path.clone(),
    })?;

    let title = title::derive_title(&source.name);
    if title.is_empty() {
        warn!("{} yields an empty section title", source.name);
    }
    debug!("Loaded {} as \"{}\" ({} bytes)", source.name, title, body.len());

    Ok(Section {
        anchor: title::anchor(&title),
        title,
        body,
    })
}

pub fn header(settings: &Settings) -> Header {
    Header {
        title: settings.title.clone(),
        intro: settings.intro.clone(),
    }
}

/// Discover sources and load every section into a `Document`, ready to
/// render. Nothing touches the output file here.
pub fn assemble(dir: &Path, settings: &Settings) -> Result<Document> {
    assemble_with(dir, settings, |_, _| {})
}

/// Same as [`assemble`], calling `on_loaded(source, total)` after each
/// section is read.
pub fn assemble_with<F>(dir: &Path, settings: &Settings, mut on_loaded: F) -> Result<Document>
where
    F: FnMut(&SourceFile, usize),
{
    let sources = discover::discover_sources(dir, &settings.output)?;
    info!("Found {} source files in {}", sources.len(), dir.display());

    let mut sections = Vec::with_capacity(sources.len());
    for source in &sources {
        sections.push(load_section(source, settings.strict_titles)?);
        on_loaded(source, sources.len());
    }

    Ok(Document {
        header: header(settings),
        sections,
    })
}

/// Whether the file at `path` holds exactly the rendered document.
pub fn check_output(path: &Path, doc: &Document) -> Result<bool> {
    let actual = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AssembleError::MissingOutput {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(AssembleError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let expected = doc.to_bytes().map_err(|source| AssembleError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(actual == expected)
}

/// Create or truncate `path` and write the rendered document to it.
pub fn write_output(path: &Path, doc: &Document) -> Result<usize> {
    let write_err = |source: std::io::Error| AssembleError::Write {
        path: path.to_path_buf(),
        source,
    };

    let bytes = doc.to_bytes().map_err(write_err)?;
    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    out.write_all(&bytes).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    info!("Wrote {} sections ({} bytes) to {}", doc.sections.len(), bytes.len(), path.display());
    Ok(bytes.len())
}
