//! Command-line interface module for sortdir.
//!
//! This module handles everything around the organizing core:
//! - Argument parsing
//! - Resolving the target directory
//! - Loading the category configuration
//! - The interactive yes/no gates
//! - Rendering the plan or the final report

use crate::config::{self, ConfigError};
use crate::file_organizer::{self, OrganizeError, OrganizeOptions};
use crate::output::{OutputFormatter, ProgressReporter};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Sort a folder's files, and optionally its subfolders, into category folders.
#[derive(Debug, Clone, Parser)]
#[command(name = "sortdir", version, about)]
pub struct Cli {
    /// Folder to organize, given as one or more path segments that are joined
    /// together. Defaults to the user's download directory.
    pub path: Vec<PathBuf>,

    /// TOML file mapping category names to extensions.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Reorganize subfolders too, without asking.
    #[arg(long, conflicts_with = "no_folders")]
    pub folders: bool,

    /// Leave subfolders untouched, without asking.
    #[arg(long)]
    pub no_folders: bool,

    /// Show where everything would go without moving anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Errors surfaced to the user by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },
    #[error("Could not determine the download directory; pass a folder explicitly")]
    NoDefaultDirectory,
    #[error("Failed to read answer: {0}")]
    Prompt(#[from] io::Error),
    #[error("Input closed before an answer was given")]
    PromptClosed,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Organize(#[from] OrganizeError),
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs the tool with parsed arguments, prompting on stdin.
///
/// With `--json`, prompts go to stderr so stdout carries only the JSON
/// document.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use sortdir::cli::{Cli, run};
///
/// let cli = Cli::parse_from(["sortdir", "/path/to/folder", "--yes", "--folders"]);
/// if let Err(e) = run(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let stdin = io::stdin();
    if cli.json {
        run_with_io(cli, &mut stdin.lock(), &mut io::stderr().lock())
    } else {
        run_with_io(cli, &mut stdin.lock(), &mut io::stdout().lock())
    }
}

/// Runs the tool, reading prompt answers from `input` and writing prompts to
/// `output`.
pub fn run_with_io<R: BufRead, W: Write>(
    cli: &Cli,
    input: &mut R,
    output: &mut W,
) -> Result<(), CliError> {
    let categories = config::load(cli.config.as_deref())?;
    let directory = resolve_directory(&cli.path)?;
    tracing::debug!(
        directory = %directory.display(),
        extensions = categories.extension_count(),
        "Resolved run settings"
    );

    if cli.dry_run {
        let options = OrganizeOptions {
            move_subfolders: !cli.no_folders,
        };
        let plan = file_organizer::plan(&directory, &categories, &options)?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            OutputFormatter::info(&format!("Analyzing folder: {}", directory.display()));
            OutputFormatter::plan(&plan);
            OutputFormatter::success("Dry run complete. Nothing was moved.");
        }
        return Ok(());
    }

    if !cli.json {
        OutputFormatter::info(&format!("Will reorganize folder: {}", directory.display()));
    }
    if !cli.yes && !confirm(input, output, "Proceed?")? {
        if !cli.json {
            OutputFormatter::plain("Nothing was changed.");
        }
        return Ok(());
    }

    let move_subfolders = if cli.folders {
        true
    } else if cli.no_folders {
        false
    } else {
        confirm(input, output, "Reorganize subfolders as well?")?
    };
    let options = OrganizeOptions { move_subfolders };

    if cli.json {
        let report = file_organizer::organize(&directory, &categories, &options)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let mut progress = ProgressReporter::new();
        let result = file_organizer::organize_with_progress(
            &directory,
            &categories,
            &options,
            &mut progress,
        );
        progress.finish();
        OutputFormatter::report(&result?);
    }

    Ok(())
}

/// Resolves the folder to organize from the given path segments.
///
/// No segments selects the user's download directory. The result is made
/// absolute and must exist.
pub fn resolve_directory(segments: &[PathBuf]) -> Result<PathBuf, CliError> {
    let path = if segments.is_empty() {
        default_directory().ok_or(CliError::NoDefaultDirectory)?
    } else {
        segments.iter().collect::<PathBuf>()
    };

    fs::canonicalize(&path).map_err(|_| CliError::DirectoryNotFound { path })
}

/// The user's download directory, or `~/Downloads` where the platform does
/// not define one.
pub fn default_directory() -> Option<PathBuf> {
    dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
}

/// Asks a yes/no question until it gets `y` or `n` (any case).
///
/// # Errors
///
/// Fails if reading or writing fails, or if `input` ends before a valid
/// answer.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool, CliError> {
    loop {
        write!(output, "{} Y/N: ", question)?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Err(CliError::PromptClosed);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => continue,
        }
    }
}
