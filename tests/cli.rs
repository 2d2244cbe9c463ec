use clap::Parser;
use projclean::cli::{Cli, Commands, DedupArgs, RunArgs};

#[test]
fn dedup_flag_parsing() {
    // Given
    let argv = vec![
        "projclean",
        "--quiet",
        "dedup",
        "legacy/projects_2025_2026.txt",
        "-o",
        "out/cleaned.txt",
        "--json",
    ];

    // When
    let cmd = Cli::parse_from(argv);

    // Then
    assert!(cmd.quiet);
    match cmd.command {
        Commands::Dedup(DedupArgs { input, output, json }) => {
            assert!(input.ends_with("projects_2025_2026.txt"));
            assert_eq!(output.expect("output captured").to_string_lossy(), "out/cleaned.txt");
            assert!(json);
        }
        _ => panic!("expected Dedup command"),
    }
}

#[test]
fn run_defaults_leave_paths_to_config() {
    let cmd = Cli::parse_from(["projclean", "run", "raw.txt", "--config", "alt.toml", "--dry-run"]);

    assert!(cmd.dry_run);
    assert_eq!(cmd.config.as_deref(), Some(std::path::Path::new("alt.toml")));
    match cmd.command {
        Commands::Run(RunArgs { cleaned, organized, json, .. }) => {
            assert!(cleaned.is_none());
            assert!(organized.is_none());
            assert!(!json);
        }
        _ => panic!("expected Run command"),
    }
}

#[test]
fn missing_input_is_a_usage_error() {
    assert!(Cli::try_parse_from(["projclean", "organize"]).is_err());
}
