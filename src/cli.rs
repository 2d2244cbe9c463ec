use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub quiet: bool,             // global --quiet
    pub no_color: bool,          // global --no-color
    pub dry_run: bool,           // global --dry-run
    pub config: Option<PathBuf>, // global --config
}

impl AppContext {
    /// Success mark, colored unless --no-color
    pub fn paint_ok(&self) -> String {
        if self.no_color {
            "✓".to_string()
        } else {
            "✓".green().to_string()
        }
    }
}

#[derive(Parser)]
#[command(name = "projclean")]
#[command(about = "Deduplicate and group free-text project-name lists exported from legacy systems")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be written without writing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./projclean.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean and deduplicate a raw project list
    Dedup(DedupArgs),

    /// Group a cleaned project list into a report
    Organize(OrganizeArgs),

    /// Dedup then organize in one pass
    Run(RunArgs),

    /// Initialize a projclean.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
pub struct DedupArgs {
    /// Raw project list (one record per line)
    pub input: PathBuf,

    /// Output file path [default: paths.cleaned_output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a JSON summary instead of human text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct OrganizeArgs {
    /// Cleaned project list produced by `dedup`
    pub input: PathBuf,

    /// Output file path [default: paths.organized_output]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print a JSON summary instead of human text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Raw project list (one record per line)
    pub input: PathBuf,

    /// Cleaned list path [default: paths.cleaned_output]
    #[arg(long)]
    pub cleaned: Option<PathBuf>,

    /// Report path [default: paths.organized_output]
    #[arg(long)]
    pub organized: Option<PathBuf>,

    /// Print a JSON summary instead of human text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
