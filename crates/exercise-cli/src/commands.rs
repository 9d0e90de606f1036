// SPDX-License-Identifier: AGPL-3.0-or-later
//! Subcommands
//!
//! Documents are read and written as JSON (`{"children": [...]}`). A path of
//! `-` means stdin or stdout.

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use exercise_core::import::{FRAGMENT_MIME, HTML_MIME, PLAIN_MIME};
use exercise_core::render::renderer_for;
use exercise_core::seed::initial_document;
use exercise_core::{ClipboardData, Document, Editor, EditorConfig, PasteSource};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Document to repair
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Where to write the repaired document
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Print the repair report as JSON to stderr
    #[arg(long)]
    pub report: bool,
}

#[derive(Debug, Args)]
pub struct PasteArgs {
    /// Document to paste into
    pub input: PathBuf,

    /// File holding a text/html payload
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// File holding a native fragment payload
    #[arg(long)]
    pub fragment: Option<PathBuf>,

    /// File holding a text/plain payload
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Dotted path of the node whose end receives the paste (e.g. `0.1`).
    /// Without it the paste is appended to the document.
    #[arg(long)]
    pub at: Option<String>,

    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output format (html, outline)
    #[arg(short, long, default_value = "html")]
    pub format: String,

    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct SeedArgs {
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,
}

pub fn normalize(args: NormalizeArgs, config: EditorConfig) -> Result<()> {
    let mut doc = read_document(&args.input)?;
    let report = exercise_core::Normalizer::new(config.normalize).normalize(&mut doc);
    info!(repairs = report.repairs.len(), "normalized {}", args.input.display());

    if args.report {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    write_document(&args.output, &doc)
}

pub fn paste(args: PasteArgs, config: EditorConfig) -> Result<()> {
    let mut data = ClipboardData::new();
    for (mime, file) in [
        (FRAGMENT_MIME, &args.fragment),
        (HTML_MIME, &args.html),
        (PLAIN_MIME, &args.text),
    ] {
        if let Some(file) = file {
            data.set(mime, read_input(file)?);
        }
    }
    if data.is_empty() {
        bail!("Nothing to paste: pass --html, --fragment or --text");
    }

    let mut editor = Editor::new(read_document(&args.input)?, config);
    if let Some(at) = &args.at {
        let path = parse_path(at)?;
        editor
            .select_end_of(&path)
            .with_context(|| format!("Cannot place the cursor at {}", at))?;
    }

    let outcome = editor.insert_data(&data)?;
    match outcome.source {
        PasteSource::Structured { mime, nodes } => info!(mime, nodes, "pasted"),
        PasteSource::PlainText => info!("pasted plain text"),
        PasteSource::Nothing => info!("clipboard held nothing usable"),
    }
    write_document(&args.output, editor.document())
}

pub fn render(args: RenderArgs, config: EditorConfig) -> Result<()> {
    let renderer =
        renderer_for(&args.format).ok_or_else(|| anyhow!("Unsupported format: {}", args.format))?;
    let mut doc = read_document(&args.input)?;
    exercise_core::Normalizer::new(config.normalize).normalize(&mut doc);
    let output = renderer.render(&doc, &config.render)?;
    write_output(&args.output, &output)
}

pub fn seed(args: SeedArgs) -> Result<()> {
    write_document(&args.output, &initial_document())
}

/// Parse a dotted child-index path such as `0.1.2`
fn parse_path(input: &str) -> Result<Vec<usize>> {
    input
        .split('.')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| anyhow!("Invalid path segment {:?} in {:?}", part, input))
        })
        .collect()
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        return Ok(input);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_document(path: &Path) -> Result<Document> {
    let input = read_input(path)?;
    serde_json::from_str(&input).with_context(|| format!("Invalid document {}", path.display()))
}

fn write_output(path: &Path, output: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        if !output.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        return Ok(());
    }
    std::fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))
}

fn write_document(path: &Path, doc: &Document) -> Result<()> {
    write_output(path, &serde_json::to_string_pretty(doc)?)
}
