mod cmd;
mod ui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use popcal::data::persistence;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "popcal", about = "calendar popout for date inputs")]
struct Cli {
    /// Path to the data directory containing config.yaml and tags.yaml (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config and sample tags
    Init,
    /// Print the 6x7 grid for the month containing DATE
    Grid {
        /// Date in the configured format (default: seed date, then today)
        date: Option<String>,
        /// Emit the projected cells as JSON
        #[arg(long)]
        json: bool,
    },
    /// List configured tags
    Tags,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    persistence::set_data_dir(data_dir.clone());

    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    // The TUI owns the terminal, so its logs go to a file.
    match cli.command {
        None => init_file_logging(&data_dir)?,
        Some(_) => init_stderr_logging(),
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Grid { date, json }) => cmd::grid::run(date.as_deref(), json),
        Some(Commands::Tags) => cmd::tags::run(),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_file_logging(dir: &Path) -> anyhow::Result<()> {
    let path = dir.join("popcal.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_needs_init_nonexistent() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(&tmp.path().join("does_not_exist")));
    }

    #[test]
    fn test_dir_needs_init_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_dir_needs_init_nonempty_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tags.yaml"), "tags: []").unwrap();
        assert!(!dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_cli_parses_grid_with_json() {
        let cli = Cli::try_parse_from(["popcal", "grid", "15/03/2024", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Grid { date, json }) => {
                assert_eq!(date.as_deref(), Some("15/03/2024"));
                assert!(json);
            }
            _ => panic!("expected grid command"),
        }
    }

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::try_parse_from(["popcal"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, PathBuf::from("./config"));
    }
}
