//! Dedup stage: raw export lines to the canonical sorted list.
//!
//! banner filter → [`normalize`](super::normalize::normalize) →
//! [`Cleaner`] → length filter → exact set → [`Reducer`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::{AppContext, DedupArgs};
use crate::core::normalize::Cleaner;
use crate::core::reduce::Reducer;
use crate::infra::config::{Config, load_config};
use crate::infra::io::{expand_path, read_source, render_lines, report_source_error, write_output};

/// Counts for one dedup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DedupSummary
{
    /// Physical lines in the source
    pub input_lines: usize,

    /// Blank and banner lines
    pub skipped: usize,

    /// Lines whose cleaned form was too short
    pub dropped: usize,

    /// Distinct cleaned items before near-duplicate reduction
    pub unique: usize,

    /// Items in the canonical list
    pub canonical: usize,
}

#[derive(Debug, Clone)]
pub struct DedupOutcome
{
    /// Canonical list, ascending
    pub items: Vec<String>,
    pub summary: DedupSummary,
}

/// Configured dedup pipeline.
#[derive(Debug, Clone)]
pub struct Deduper
{
    cleaner: Cleaner,
    reducer: Reducer,
    banner_prefixes: Vec<String>,
    min_item_chars: usize,
}

impl Deduper
{
    pub fn from_config(config: &Config) -> Result<Self>
    {
        Ok(Self {
            cleaner: Cleaner::new(&config.vocabulary)?,
            reducer: Reducer::new(config.reduce.min_containment_chars),
            banner_prefixes: config
                .vocabulary
                .banner_prefixes
                .clone(),
            min_item_chars: config.reduce.min_item_chars,
        })
    }

    /// Blank lines and report banners carry no project name.
    pub fn is_banner(
        &self,
        line: &str,
    ) -> bool
    {
        let line = line.trim();
        line.is_empty()
            || self
                .banner_prefixes
                .iter()
                .any(|p| !p.is_empty() && line.starts_with(p.as_str()))
    }

    /// Clean one record; `None` when it is too short to name a project.
    pub fn clean_line(
        &self,
        raw: &str,
    ) -> Option<String>
    {
        let cleaned = self
            .cleaner
            .clean(raw);
        (cleaned.chars().count() >= self.min_item_chars.max(1)).then_some(cleaned)
    }

    /// Run the whole reduction over in-memory lines.
    pub fn dedup<'a, I>(
        &self,
        lines: I,
    ) -> DedupOutcome
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = DedupSummary::default();
        let mut unique: BTreeSet<String> = BTreeSet::new();

        for line in lines
        {
            summary.input_lines += 1;

            if self.is_banner(line)
            {
                summary.skipped += 1;
                continue;
            }

            match self.clean_line(line)
            {
                Some(item) =>
                {
                    unique.insert(item);
                }
                None => summary.dropped += 1,
            }
        }

        summary.unique = unique.len();
        info!(unique = summary.unique, "unique items after normalization");

        let reduction = self
            .reducer
            .reduce(&unique);
        summary.canonical = reduction
            .kept
            .len();
        info!(canonical = summary.canonical, removed = reduction.removed, "final count");

        DedupOutcome { items: reduction.kept, summary }
    }

    /// Dedup the text of a whole source file (LF or CRLF).
    pub fn dedup_text(
        &self,
        text: &str,
    ) -> DedupOutcome
    {
        self.dedup(text.lines())
    }
}

/// Spinner for the quadratic reduction; hidden in quiet mode.
pub(crate) fn reduction_spinner(ctx: &AppContext) -> ProgressBar
{
    if ctx.quiet
    {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message("Collapsing near-duplicates");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[derive(Debug, Serialize)]
struct DedupReport<'a>
{
    input: &'a Path,
    output: &'a Path,
    written: bool,
    #[serde(flatten)]
    summary: &'a DedupSummary,
}

/// Read, clean, reduce and write.
///
/// Returns `Ok(None)` when the source could not be read; the error has
/// already been reported and no file was written.
#[instrument(skip_all, fields(input = %input.display()))]
pub(crate) fn run_stage(
    input: &Path,
    output: &Path,
    config: &Config,
    ctx: &AppContext,
) -> Result<Option<DedupOutcome>>
{
    let text = match read_source(input)
    {
        Ok(text) => text,
        Err(err) =>
        {
            report_source_error(err, ctx);
            return Ok(None);
        }
    };

    let deduper = Deduper::from_config(config)?;

    let spinner = reduction_spinner(ctx);
    let outcome = deduper.dedup_text(&text);
    spinner.finish_and_clear();

    if !ctx.dry_run
    {
        write_output(output, &render_lines(&outcome.items))?;
    }

    Ok(Some(outcome))
}

pub(crate) fn print_dedup_summary(
    summary: &DedupSummary,
    output: &Path,
    ctx: &AppContext,
)
{
    if ctx.quiet
    {
        return;
    }

    let mark = ctx.paint_ok();
    println!("Unique items after normalization: {}", summary.unique);
    println!("Final count: {}", summary.canonical);
    if ctx.dry_run
    {
        let line = format!("DRY RUN: Would write {} items to {}", summary.canonical, output.display());
        if ctx.no_color { println!("{line}") } else { println!("{}", line.yellow()) }
    }
    else
    {
        println!("{mark} Saved to {}", output.display());
    }
}

pub(crate) fn resolve_output(
    cli: Option<PathBuf>,
    configured: &Path,
) -> Result<PathBuf>
{
    expand_path(cli.as_deref().unwrap_or(configured))
}

pub fn run(
    args: DedupArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config(ctx.config.as_deref())?;
    let input = expand_path(&args.input)?;
    let output = resolve_output(args.output, &config.paths.cleaned_output)?;

    let Some(outcome) = run_stage(&input, &output, &config, ctx)?
    else
    {
        return Ok(());
    };

    if args.json
    {
        let report = DedupReport {
            input: &input,
            output: &output,
            written: !ctx.dry_run,
            summary: &outcome.summary,
        };
        println!("{}", serde_json::to_string(&report)?);
    }
    else
    {
        print_dedup_summary(&outcome.summary, &output, ctx);
    }

    Ok(())
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn deduper() -> Deduper
    {
        Deduper::from_config(&Config::default()).unwrap()
    }

    #[test]
    fn test_banners_are_skipped()
    {
        let d = deduper();
        assert!(d.is_banner(""));
        assert!(d.is_banner("   "));
        assert!(d.is_banner("=========="));
        assert!(d.is_banner("프로젝트 목록 (2025-2026)"));
        assert!(d.is_banner("총 4123건:"));
        assert!(!d.is_banner("총괄 관리 시스템"));
    }

    #[test]
    fn test_clean_line_enforces_minimum_length()
    {
        let d = deduper();
        assert_eq!(d.clean_line("1. A"), None);
        assert_eq!(d.clean_line("2. (홍길동 과장)"), None);
        assert_eq!(d.clean_line("3. 댐"), None);
        assert_eq!(d.clean_line("4. 댐 보수").as_deref(), Some("댐 보수"));
    }

    #[test]
    fn test_dedup_counts_and_order()
    {
        let text = "\
프로젝트 목록
==========
1. 한강 교량 보수 (김영주 과장)
2. 한강 교량 보수
3) 한강 교량 보수 2차
(영업) 서초구
서초구 청사
4. X
총 6건
";
        let outcome = deduper().dedup_text(text);
        assert_eq!(outcome.items, vec!["서초구", "서초구 청사", "한강 교량 보수"]);
        assert_eq!(
            outcome.summary,
            DedupSummary { input_lines: 9, skipped: 3, dropped: 1, unique: 4, canonical: 3 }
        );
    }

    #[test]
    fn test_dedup_handles_crlf()
    {
        let outcome = deduper().dedup_text("1. 교량 보수 공사\r\n2. 교량 보수 공사 (2차)\r\n");
        assert_eq!(outcome.items, vec!["교량 보수 공사"]);
    }

    #[test]
    fn test_english_title_vocabulary()
    {
        let mut config = Config::default();
        config
            .vocabulary
            .title_tokens = vec!["Manager".to_string()];
        let d = Deduper::from_config(&config).unwrap();

        let outcome = d.dedup([
            "1. Acme Corp Project (Kim Soo-jin, Manager)",
            "Acme Corp Project",
            "acme corp project",
        ]);
        assert_eq!(outcome.items, vec!["Acme Corp Project", "acme corp project"]);
        assert_eq!(outcome.summary.unique, 2);
    }
}
