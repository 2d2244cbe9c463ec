use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};

/// Config file names probed in the working directory, in priority order.
pub const CONFIG_FILES: [&str; 4] =
    ["projclean.toml", "projclean.yaml", "projclean.json", ".projclean.toml"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Default output locations
    pub paths: PathsConfig,

    /// Closed vocabularies for cleaning and grouping
    pub vocabulary: Vocabulary,

    /// Length thresholds
    pub reduce: ReduceConfig,

    /// Group label wording
    pub labels: Labels,

    /// Report wording
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig
{
    pub cleaned_output: PathBuf,
    pub organized_output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary
{
    /// Parenthesized status tags stripped from the start, in priority order
    pub status_prefixes: Vec<String>,

    /// Job titles marking a parenthetical as a personnel annotation
    pub title_tokens: Vec<String>,

    /// Legal-entity designators used inside `(..)` company markers
    pub entity_markers: Vec<String>,

    /// Lines starting with any of these are skipped before cleaning
    pub banner_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig
{
    /// Cleaned items shorter than this are dropped
    pub min_item_chars: usize,

    /// Shorter side of a containment pair must be at least this long
    pub min_containment_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels
{
    pub year_suffix: String,
    pub latin: String,
    pub fallback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig
{
    pub title: String,
    pub total: String,
    pub unit: String,
    pub rule_width: usize,
}

fn strings(items: &[&str]) -> Vec<String>
{
    items
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for PathsConfig
{
    fn default() -> Self
    {
        Self {
            cleaned_output: PathBuf::from("projects_cleaned.txt"),
            organized_output: PathBuf::from("projects_organized.txt"),
        }
    }
}

impl Default for Vocabulary
{
    fn default() -> Self
    {
        Self {
            status_prefixes: strings(&["영업", "실행", "우수조달"]),
            title_tokens: strings(&[
                "과장", "대리", "부장", "차장", "이사", "주무관", "대표", "팀장", "사원", "주임",
            ]),
            entity_markers: strings(&["주", "유"]),
            banner_prefixes: strings(&["=====", "프로젝트 목록", "총 "]),
        }
    }
}

impl Default for ReduceConfig
{
    fn default() -> Self
    {
        Self {
            min_item_chars: 2,
            min_containment_chars: crate::core::reduce::DEFAULT_MIN_CONTAINMENT_CHARS,
        }
    }
}

impl Default for Labels
{
    fn default() -> Self
    {
        Self {
            year_suffix: "년 관련".to_string(),
            latin: "English / Other".to_string(),
            fallback: "기타".to_string(),
        }
    }
}

impl Default for ReportConfig
{
    fn default() -> Self
    {
        Self {
            title: "프로젝트 목록 정리".to_string(),
            total: "총".to_string(),
            unit: "건".to_string(),
            rule_width: 50,
        }
    }
}

/// Load configuration.
///
/// An explicit file must exist. Otherwise the first of [`CONFIG_FILES`]
/// found in the working directory is used, if any. `PROJCLEAN_`-prefixed
/// environment variables are layered on top (`PROJCLEAN_REDUCE__MIN_ITEM_CHARS`).
pub fn load_config(explicit: Option<&Path>) -> Result<Config>
{
    let mut builder = config::Config::builder();

    match explicit
    {
        Some(path) =>
        {
            if !path.exists()
            {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            debug!(path = %path.display(), "using explicit config");
            builder = builder.add_source(config::File::from(path));
        }
        None =>
        {
            if let Some(path) = CONFIG_FILES
                .iter()
                .find(|p| Path::new(p).exists())
            {
                debug!(path, "using discovered config");
                builder = builder.add_source(config::File::with_name(path));
            }
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("PROJCLEAN")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY RUN: Would write {}:\n{}", config_path.display(), toml_string);
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
