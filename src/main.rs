use anyhow::Result;
use clap::Parser;
use projclean::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("projclean=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        config: cli.config,
    };

    match cli.command {
        Commands::Dedup(args) => projclean::core::dedup_run(args, &ctx),
        Commands::Organize(args) => projclean::core::organize_run(args, &ctx),
        Commands::Run(args) => projclean::core::pipeline_run(args, &ctx),
        Commands::Init(args) => projclean::infra::config::init(args, &ctx),
        Commands::Completions(args) => projclean::completion::run(args, &ctx),
    }
}
