//! ignore-writer entrypoint.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use core_config::load_from;
use core_lines::LineEditor;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "ignore-writer", version, about = "Edit .gitignore-style files in place")]
struct Args {
    /// File to edit. Defaults to `[file] default_path` from the config (`.gitignore`).
    #[arg(long, short)]
    file: Option<PathBuf>,
    /// Write the result here instead of back to the edited file.
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Optional configuration file path (overrides discovery of `ignore-writer.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Append logs to this file instead of stderr. Filter via `RUST_LOG`.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every line with its zero-based index.
    List,
    /// Exit 0 when VALUE is a line of the file, 1 otherwise (2 on errors).
    Exists { value: String },
    /// Insert lines (appends by default). Present patterns are skipped.
    Add {
        /// Insert before the first line equal to this value.
        #[arg(long, conflicts_with_all = ["after", "at", "start"])]
        before: Option<String>,
        /// Insert after the first line equal to this value.
        #[arg(long, conflicts_with_all = ["at", "start"])]
        after: Option<String>,
        /// Insert at this zero-based line index (clamped to the end).
        #[arg(long, conflicts_with = "start")]
        at: Option<usize>,
        /// Insert at the top of the file.
        #[arg(long)]
        start: bool,
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Remove the first line equal to VALUE.
    Delete { value: String },
    /// Remove COUNT lines starting at OFFSET.
    DeleteOffset {
        offset: usize,
        #[arg(default_value_t = 1)]
        count: usize,
    },
}

/// Exit status for a pattern that `exists` did not find.
const EXIT_NOT_FOUND: u8 = 1;
/// Exit status for any error (bad config path, unwritable target, IO failure).
const EXIT_ERROR: u8 = 2;

/// Result of a successful run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    NotFound,
}

fn exit_status(result: &Result<Outcome>) -> u8 {
    match result {
        Ok(Outcome::Success) => 0,
        Ok(Outcome::NotFound) => EXIT_NOT_FOUND,
        Err(_) => EXIT_ERROR,
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = match configure_logging(args.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("ignore-writer: {err:#}");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    install_panic_hook();
    let stdout = std::io::stdout();
    let result = run(args, &mut stdout.lock());
    if let Err(err) = &result {
        tracing::error!(target: "runtime", error = ?err, "run_failed");
        eprintln!("ignore-writer: {err:#}");
    }
    ExitCode::from(exit_status(&result))
}

fn configure_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let Some(path) = log_file else {
        // Another subscriber may already be installed; keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return Ok(None);
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    let file_appender = tracing_appender::rolling::never(dir, name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Ok(Some(guard)),
        // Global tracing subscriber already installed; drop guard so writer shuts down.
        Err(_err) => Ok(None),
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn run(args: Args, out: &mut impl Write) -> Result<Outcome> {
    let config = load_from(args.config.clone())?;
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.default_path().to_path_buf());
    let mut editor = LineEditor::open_with_options(&path, config.edit_options())
        .with_context(|| format!("cannot edit {}", path.display()))?;
    let config_str = config.source.as_ref().map(|p| p.display().to_string());
    info!(
        target: "runtime.startup",
        file = %path.display(),
        lines = editor.len(),
        config = config_str.as_deref(),
        "bootstrap_complete"
    );

    match args.command {
        Command::List => {
            for (idx, line) in editor.lines().iter().enumerate() {
                writeln!(out, "{idx:>4}  {line}")?;
            }
            return Ok(Outcome::Success);
        }
        Command::Exists { value } => {
            let found = editor.exists(&value);
            return Ok(if found {
                Outcome::Success
            } else {
                Outcome::NotFound
            });
        }
        Command::Add {
            before,
            after,
            at,
            start,
            lines,
        } => {
            if let Some(find) = before {
                editor.before(&find, lines);
            } else if let Some(find) = after {
                editor.after(&find, lines);
            } else {
                if start {
                    editor.rewind();
                } else if let Some(n) = at {
                    editor.seek(n);
                }
                editor.add(lines);
            }
        }
        Command::Delete { value } => {
            editor.delete(&value);
        }
        Command::DeleteOffset { offset, count } => {
            editor.delete_offset(offset, count);
        }
    }

    editor
        .save(args.output.as_deref())
        .context("saving edited file failed")?;
    Ok(Outcome::Success)
}
