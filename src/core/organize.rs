//! Organize stage: canonical list to a grouped report.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{info, instrument};

use crate::cli::{AppContext, OrganizeArgs};
use crate::core::categorize::Categorizer;
use crate::core::dedup::resolve_output;
use crate::infra::config::{Config, ReportConfig, load_config};
use crate::infra::io::{expand_path, read_source, report_source_error, write_output};

/// Items keyed by group label; labels and members both ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grouping
{
    pub groups: BTreeMap<String, Vec<String>>,
}

impl Grouping
{
    /// Assign every item to exactly one group.
    pub fn build<I, S>(
        categorizer: &Categorizer,
        items: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for item in items
        {
            let item = item.into();
            groups
                .entry(categorizer.categorize(&item))
                .or_default()
                .push(item);
        }
        for members in groups.values_mut()
        {
            members.sort();
        }
        Self { groups }
    }

    /// Sum of all group sizes.
    pub fn total(&self) -> usize
    {
        self.groups
            .values()
            .map(Vec::len)
            .sum()
    }

    /// Render the plain-text report.
    pub fn render(
        &self,
        report: &ReportConfig,
    ) -> String
    {
        let mut out = String::new();
        let unit = &report.unit;

        // Writing into a String cannot fail
        let _ = writeln!(out, "{} ({} {}{unit})", report.title, report.total, self.total());
        let _ = writeln!(out, "{}", "=".repeat(report.rule_width));
        out.push('\n');

        for (label, members) in &self.groups
        {
            let _ = writeln!(out, "[{label}] - {}{unit}", members.len());
            for item in members
            {
                let _ = writeln!(out, "  - {item}");
            }
            out.push('\n');
        }

        out
    }
}

/// Lines of a cleaned list: trimmed, blanks ignored.
pub fn parse_cleaned(text: &str) -> Vec<&str>
{
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Summary of one organize pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizeSummary
{
    pub items: usize,
    pub groups: usize,
}

impl From<&Grouping> for OrganizeSummary
{
    fn from(grouping: &Grouping) -> Self
    {
        Self { items: grouping.total(), groups: grouping.groups.len() }
    }
}

/// Group and write. Shared by `organize` and `run`.
#[instrument(skip_all, fields(output = %output.display()))]
pub(crate) fn write_report<I, S>(
    items: I,
    output: &Path,
    config: &Config,
    ctx: &AppContext,
) -> Result<Grouping>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let categorizer = Categorizer::new(&config.vocabulary, &config.labels)?;
    let grouping = Grouping::build(&categorizer, items);
    info!(items = grouping.total(), groups = grouping.groups.len(), "grouped");

    if !ctx.dry_run
    {
        write_output(output, &grouping.render(&config.report))?;
    }

    Ok(grouping)
}

pub(crate) fn print_organize_summary(
    summary: &OrganizeSummary,
    output: &Path,
    ctx: &AppContext,
)
{
    if ctx.quiet
    {
        return;
    }

    if ctx.dry_run
    {
        let line = format!(
            "DRY RUN: Would write {} items in {} groups to {}",
            summary.items,
            summary.groups,
            output.display()
        );
        if ctx.no_color { println!("{line}") } else { println!("{}", line.yellow()) }
    }
    else
    {
        println!(
            "{} Organized {} items into {} groups: {}",
            ctx.paint_ok(),
            summary.items,
            summary.groups,
            output.display()
        );
    }
}

#[derive(Debug, Serialize)]
struct OrganizeReport<'a>
{
    input: &'a Path,
    output: &'a Path,
    written: bool,
    #[serde(flatten)]
    summary: &'a OrganizeSummary,
}

pub fn run(
    args: OrganizeArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config(ctx.config.as_deref())?;
    let input = expand_path(&args.input)?;
    let output = resolve_output(args.output, &config.paths.organized_output)?;

    let text = match read_source(&input)
    {
        Ok(text) => text,
        Err(err) =>
        {
            report_source_error(err, ctx);
            return Ok(());
        }
    };

    let grouping = write_report(parse_cleaned(&text), &output, &config, ctx)?;
    let summary = OrganizeSummary::from(&grouping);

    if args.json
    {
        let report = OrganizeReport {
            input: &input,
            output: &output,
            written: !ctx.dry_run,
            summary: &summary,
        };
        println!("{}", serde_json::to_string(&report)?);
    }
    else
    {
        print_organize_summary(&summary, &output, ctx);
    }

    Ok(())
}
