//! Both stages back to back: the organize stage consumes the in-memory
//! canonical list, the cleaned file is still written.

use anyhow::Result;
use serde::Serialize;

use crate::cli::{AppContext, RunArgs};
use crate::core::dedup::{DedupSummary, print_dedup_summary, resolve_output, run_stage};
use crate::core::organize::{OrganizeSummary, print_organize_summary, write_report};
use crate::infra::config::load_config;
use crate::infra::io::expand_path;

#[derive(Debug, Serialize)]
struct RunReport<'a>
{
    cleaned: &'a std::path::Path,
    organized: &'a std::path::Path,
    written: bool,
    dedup: &'a DedupSummary,
    organize: &'a OrganizeSummary,
}

pub fn run(
    args: RunArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config = load_config(ctx.config.as_deref())?;
    let input = expand_path(&args.input)?;
    let cleaned = resolve_output(args.cleaned, &config.paths.cleaned_output)?;
    let organized = resolve_output(args.organized, &config.paths.organized_output)?;

    let Some(outcome) = run_stage(&input, &cleaned, &config, ctx)?
    else
    {
        return Ok(());
    };

    let grouping = write_report(&outcome.items, &organized, &config, ctx)?;
    let organize = OrganizeSummary::from(&grouping);

    if args.json
    {
        let report = RunReport {
            cleaned: &cleaned,
            organized: &organized,
            written: !ctx.dry_run,
            dedup: &outcome.summary,
            organize: &organize,
        };
        println!("{}", serde_json::to_string(&report)?);
    }
    else
    {
        print_dedup_summary(&outcome.summary, &cleaned, ctx);
        print_organize_summary(&organize, &organized, ctx);
    }

    Ok(())
}
