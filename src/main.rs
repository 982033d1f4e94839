mod assembler;
mod error;
mod settings;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use assembler::{Document, SourceFile};
use error::AssembleError;
use settings::Settings;

#[derive(Parser)]
#[command(
    name = "docasm",
    about = "Merge the numbered markdown files of a directory into one document with a TOC"
)]
struct Cli {
    /// Directory holding the markdown sources
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,
    /// Output file name inside the directory (default: README.md)
    #[arg(short, long, global = true)]
    output: Option<String>,
    /// Title line of the generated document
    #[arg(long, global = true)]
    title: Option<String>,
    /// Paragraph written under the title, e.g. a link to a recording
    #[arg(long, global = true)]
    intro: Option<String>,
    /// Fail on source names that don't follow NN_name.md (build, list and check)
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the output document (default)
    Build {
        /// Print the document instead of writing the output file
        #[arg(long)]
        stdout: bool,
    },
    /// Show discovered sources with their titles and anchors
    List {
        #[arg(long)]
        json: bool,
    },
    /// Fail if the output document is missing or out of date
    Check,
}

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    file: &'a str,
    title: String,
    anchor: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()
        .context("Failed to load DOCASM_* settings")?
        .with_overrides(cli.output, cli.title, cli.intro, cli.strict);
    info!(settings_loaded = ?settings, msg = "Starting document assembly");

    match cli.command.unwrap_or(Commands::Build { stdout: false }) {
        Commands::Build { stdout: true } => {
            let doc = load_document(&cli.dir, &settings)?;
            let mut out = io::stdout().lock();
            doc.render(&mut out).context("Failed to write to stdout")?;
            out.flush()?;
        }
        Commands::Build { stdout: false } => {
            let doc = load_document(&cli.dir, &settings)?;
            assembler::write_output(&cli.dir.join(&settings.output), &doc)?;
        }
        Commands::List { json } => {
            let sources = assembler::discover::discover_sources(&cli.dir, &settings.output)?;
            let entries = list_entries(&sources, settings.strict_titles)?;
            print_entries(&entries, json)?;
        }
        Commands::Check => {
            let doc = assembler::assemble(&cli.dir, &settings)?;
            let path = cli.dir.join(&settings.output);
            if !assembler::check_output(&path, &doc)
                .with_context(|| format!("Cannot check {}", path.display()))? {
                bail!("{} is out of date; run `docasm build`", path.display());
            }
            println!("{} is up to date ({} sections)", path.display(), doc.sections.len());
        }
    }

    debug!("Done in {:.2}s", t0.elapsed().as_secs_f64());
    Ok(())
}

/// Assemble the document with a progress bar ticking per loaded section.
fn load_document(dir: &Path, settings: &Settings) -> anyhow::Result<Document> {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let doc = assembler::assemble_with(dir, settings, |source, total| {
        pb.set_length(total as u64);
        pb.set_message(source.name.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();
    Ok(doc?)
}

/// Titles and anchors as the build would derive them. Strict mode rejects
/// the same names `build` would.
fn list_entries(sources: &[SourceFile], strict: bool) -> Result<Vec<ListEntry<'_>>, AssembleError> {
    sources
        .iter()
        .map(|s| {
            if strict {
                assembler::title::validate_name(&s.name)?;
            }
            let title = assembler::title::derive_title(&s.name);
            Ok(ListEntry {
                file: &s.name,
                anchor: assembler::title::anchor(&title),
                title,
            })
        })
        .collect()
}

fn print_entries(entries: &[ListEntry], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No markdown sources found.");
        return Ok(());
    }
    println!("{:>3} | {:<32} | {:<32} | {}", "#", "File", "Title", "Anchor");
    println!("{}", "-".repeat(90));
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{:>3} | {:<32} | {:<32} | #{}",
            i + 1,
            truncate(e.file, 32),
            truncate(&e.title, 32),
            e.anchor
        );
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}
