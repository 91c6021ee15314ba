//! # Mailcraft CLI
//!
//! Command-line host for the Mailcraft template builder.
//!
//! ## Usage
//!
//! ```bash
//! # Export the starter template to ./email-template.html
//! mailcraft export
//!
//! # Apply scripted edits, then copy the result to the clipboard
//! mailcraft export --commands edits.json --clipboard
//!
//! # List placeholder variables, or copy one token to the clipboard
//! mailcraft variables --category Incident
//! mailcraft variables --copy '$client_name$'
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ExportJob` / `PreviewJob` - Resolved configuration for each command
//! - `output` - Delivery to a file, stdout or the system clipboard

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub mod output;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use mailcraft_core::{variables, EditorCommand, EditorSession, Variable};
use mailcraft_renderer::{ExportConfig, HtmlExporter, PreviewRenderer, DEFAULT_FILE_NAME};

use crate::output::{deliver, Delivered, Destination};

/// Command-line arguments for mailcraft.
#[derive(Debug, Clone, Parser)]
#[command(name = "mailcraft")]
#[command(about = "Build email templates and export them as standalone HTML")]
#[command(version)]
pub struct CliArgs {
    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Export the template as a standalone HTML document
    Export(ExportArgs),
    /// Render the editor preview markup
    Preview(PreviewArgs),
    /// List the placeholder variables
    Variables(VariablesArgs),
}

/// Arguments for `mailcraft export`.
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// JSON file of editor commands applied to the starter template
    #[arg(long, env = "MAILCRAFT_COMMANDS")]
    pub commands: Option<PathBuf>,

    /// Output file (default: email-template.html)
    #[arg(long, short, conflicts_with_all = ["stdout", "clipboard"])]
    pub output: Option<PathBuf>,

    /// Write the document to stdout
    #[arg(long, conflicts_with = "clipboard")]
    pub stdout: bool,

    /// Copy the document to the system clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// Maximum container width in pixels
    #[arg(long, env = "MAILCRAFT_MAX_WIDTH", default_value = "600")]
    pub max_width: u32,

    /// Leave out the webfont link
    #[arg(long)]
    pub no_font: bool,
}

/// Arguments for `mailcraft preview`.
#[derive(Debug, Clone, Args)]
pub struct PreviewArgs {
    /// JSON file of editor commands applied to the starter template
    #[arg(long, env = "MAILCRAFT_COMMANDS")]
    pub commands: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Arguments for `mailcraft variables`.
#[derive(Debug, Clone, Args)]
pub struct VariablesArgs {
    /// Only list this category
    #[arg(long)]
    pub category: Option<String>,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,

    /// Copy one variable token to the clipboard instead of listing
    #[arg(long, value_name = "TOKEN", conflicts_with_all = ["category", "json"])]
    pub copy: Option<String>,
}

/// Resolved configuration for an export run.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Command script to apply, if any.
    pub commands: Option<PathBuf>,
    /// Where the document goes.
    pub destination: Destination,
    /// Document shell settings.
    pub export: ExportConfig,
}

impl From<ExportArgs> for ExportJob {
    fn from(args: ExportArgs) -> Self {
        let destination = if args.clipboard {
            Destination::Clipboard
        } else if args.stdout {
            Destination::Stdout
        } else {
            Destination::File(
                args.output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME)),
            )
        };
        let mut export = ExportConfig {
            max_width_px: args.max_width,
            ..ExportConfig::default()
        };
        // Keep the mobile breakpoint just above the container width.
        export.breakpoint_px = args.max_width.saturating_add(20);
        if args.no_font {
            export.font_url = None;
        }
        Self {
            commands: args.commands,
            destination,
            export,
        }
    }
}

/// Resolved configuration for a preview run.
#[derive(Debug, Clone)]
pub struct PreviewJob {
    /// Command script to apply, if any.
    pub commands: Option<PathBuf>,
    /// Where the markup goes.
    pub destination: Destination,
}

impl From<PreviewArgs> for PreviewJob {
    fn from(args: PreviewArgs) -> Self {
        Self {
            commands: args.commands,
            destination: args.output.map_or(Destination::Stdout, Destination::File),
        }
    }
}

/// Run a parsed command line, writing any stdout output to `stdout`.
///
/// # Errors
///
/// Returns an error if a command script cannot be read or parsed, the export
/// configuration is invalid, or output cannot be written.
pub fn run(args: CliArgs, stdout: &mut impl Write) -> anyhow::Result<()> {
    match args.command {
        Command::Export(export) => {
            let delivered = run_export(&ExportJob::from(export), stdout)?;
            report(&delivered, "HTML");
        }
        Command::Preview(preview) => {
            let delivered = run_preview(&PreviewJob::from(preview), stdout)?;
            report(&delivered, "preview");
        }
        Command::Variables(variables) => {
            if let Some(token) = variables.copy {
                let (variable, delivered) = copy_variable(&token, stdout)?;
                report(&delivered, variable.name);
            } else if variables.json {
                list_variables_json(variables.category.as_deref(), stdout)?;
            } else {
                list_variables(variables.category.as_deref(), stdout)?;
            }
        }
    }
    Ok(())
}

/// Start a session on the starter template and apply a command script.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed.
pub fn build_session(commands: Option<&Path>) -> anyhow::Result<EditorSession> {
    let mut session = EditorSession::with_default_template();
    if let Some(path) = commands {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read command script {}", path.display()))?;
        let commands = EditorCommand::parse_script(&script)
            .with_context(|| format!("Invalid command script {}", path.display()))?;
        tracing::debug!("Loaded {} commands from {}", commands.len(), path.display());
        session.apply_all(commands);
    }
    Ok(session)
}

/// Build the session for `job`, export it and deliver the document.
///
/// # Errors
///
/// Returns an error if the session cannot be built, the configuration is
/// invalid, or the document cannot be written.
pub fn run_export(job: &ExportJob, stdout: &mut impl Write) -> anyhow::Result<Delivered> {
    let session = build_session(job.commands.as_deref())?;
    let template = session.template();
    let exporter = HtmlExporter::new(job.export.clone()).context("Invalid export settings")?;
    match &job.destination {
        Destination::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let bytes = exporter
                .write_document(template, BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            Ok(Delivered::File {
                path: path.clone(),
                bytes,
            })
        }
        Destination::Stdout => {
            exporter
                .write_document(template, &mut *stdout)
                .context("Failed to write to stdout")?;
            Ok(Delivered::Stdout)
        }
        Destination::Clipboard => deliver(&exporter.export(template), &job.destination, stdout),
    }
}

/// Build the session for `job` and deliver its preview markup.
///
/// # Errors
///
/// Returns an error if the session cannot be built or the markup cannot be
/// written.
pub fn run_preview(job: &PreviewJob, stdout: &mut impl Write) -> anyhow::Result<Delivered> {
    let session = build_session(job.commands.as_deref())?;
    let markup = PreviewRenderer::render_session(&session);
    deliver(&markup, &job.destination, stdout)
}

/// Print the variable catalog grouped by category.
///
/// # Errors
///
/// Returns an error if `category` matches nothing or writing fails.
pub fn list_variables(category: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    for (name, members) in variable_groups(category)? {
        writeln!(out, "{name}")?;
        for variable in members {
            writeln!(out, "  {:<40} {}", variable.name, variable.description)?;
        }
    }
    Ok(())
}

/// Look a variable up by token, with or without the surrounding `$` signs.
///
/// # Errors
///
/// Returns an error if `token` is not in the catalog.
pub fn resolve_variable(token: &str) -> anyhow::Result<&'static Variable> {
    variables::find(token)
        .or_else(|| variables::find(&format!("${}$", token.trim_matches('$'))))
        .with_context(|| format!("Unknown variable {token:?}"))
}

/// Copy a variable token to the clipboard.
///
/// A clipboard failure is returned as [`Delivered::ClipboardUnavailable`],
/// not an error.
///
/// # Errors
///
/// Returns an error if `token` is not in the catalog; the clipboard is not
/// touched in that case.
pub fn copy_variable(
    token: &str,
    stdout: &mut impl Write,
) -> anyhow::Result<(&'static Variable, Delivered)> {
    let variable = resolve_variable(token)?;
    let delivered = deliver(variable.name, &Destination::Clipboard, stdout)?;
    Ok((variable, delivered))
}

/// Print the variable catalog as a JSON array.
///
/// # Errors
///
/// Returns an error if `category` matches nothing or writing fails.
pub fn list_variables_json(category: Option<&str>, out: &mut impl Write) -> anyhow::Result<()> {
    let selected: Vec<&Variable> = variable_groups(category)?
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect();
    serde_json::to_writer_pretty(&mut *out, &selected)?;
    writeln!(out)?;
    Ok(())
}

fn variable_groups(
    category: Option<&str>,
) -> anyhow::Result<Vec<(&'static str, Vec<&'static Variable>)>> {
    let groups: Vec<_> = variables::by_category()
        .into_iter()
        .filter(|(name, _)| category.is_none_or(|c| name.eq_ignore_ascii_case(c)))
        .collect();
    if groups.is_empty() {
        anyhow::bail!("No variables in category {:?}", category.unwrap_or_default());
    }
    Ok(groups)
}

fn report(delivered: &Delivered, what: &str) {
    match delivered {
        Delivered::File { path, bytes } => {
            tracing::info!("Wrote {bytes} bytes to {}", path.display());
        }
        Delivered::Stdout => {}
        Delivered::Clipboard => eprintln!("Copied {what} to clipboard!"),
        Delivered::ClipboardUnavailable(reason) => {
            eprintln!("Failed to copy {what}: {reason}");
        }
    }
}
