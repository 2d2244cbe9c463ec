//! Line normalization and annotation stripping.
//!
//! Two layers, applied in order to every raw record:
//! - [`normalize`]: whitespace, one leading ordinal, the `;2and2;` artifact.
//! - [`Cleaner::strip_annotations`]: status-tag prefixes and parenthesized
//!   personnel annotations such as `(홍길동 과장)`.
//!
//! Neither layer fails. Callers decide whether the result is long enough to
//! be a project reference.

use aho_corasick::AhoCorasick;
use anyhow::{Context, Result};
use regex::{Captures, Regex};

use crate::infra::config::Vocabulary;

/// Encoding corruption of `&` seen in legacy exports.
const AMPERSAND_ARTIFACT: &str = ";2and2;";

/// Canonicalize one raw line.
///
/// Trims, strips a single leading ordinal (`"12. "`, `"3) "`), collapses
/// whitespace runs to one space and repairs the ampersand artifact.
pub fn normalize(raw: &str) -> String
{
    let text = strip_ordinal(raw.trim(), &['.', ')']);

    // split_whitespace also drops the leading/trailing runs
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .replace(AMPERSAND_ARTIFACT, "&")
        .trim()
        .to_string()
}

/// Strip one `digits` + terminator + optional whitespace prefix.
///
/// Returns the input unchanged when the prefix is absent or has no digits.
pub fn strip_ordinal<'a>(
    text: &'a str,
    terminators: &[char],
) -> &'a str
{
    let digits_end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(text.len(), |(i, _)| i);

    if digits_end == 0
    {
        return text;
    }

    let rest = &text[digits_end..];
    match rest.chars().next()
    {
        Some(c) if terminators.contains(&c) => rest[c.len_utf8()..].trim_start(),
        _ => text,
    }
}

/// Annotation stripper built from a closed [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct Cleaner
{
    /// Literal `(tag)` prefixes, in priority order
    status_prefixes: Vec<String>,

    /// Any parenthesized span without a nested `)`
    paren_span: Regex,

    /// Job-title tokens that mark a span as a personnel annotation
    titles: Option<AhoCorasick>,
}

impl Cleaner
{
    pub fn new(vocab: &Vocabulary) -> Result<Self>
    {
        let status_prefixes = vocab
            .status_prefixes
            .iter()
            .map(|tag| format!("({tag})"))
            .collect();

        let paren_span = Regex::new(r"\([^)]*\)").context("compile parenthesis matcher")?;

        let tokens: Vec<&str> = vocab
            .title_tokens
            .iter()
            .map(String::as_str)
            .filter(|t| !t.is_empty())
            .collect();

        let titles = if tokens.is_empty()
        {
            None
        }
        else
        {
            Some(AhoCorasick::new(&tokens).context("build title-token automaton")?)
        };

        Ok(Self { status_prefixes, paren_span, titles })
    }

    /// Remove categorization prefixes and personnel annotations.
    pub fn strip_annotations(
        &self,
        text: &str,
    ) -> String
    {
        // Each prefix is tried once, in order; a removal can expose the next.
        let mut rest = text;
        for prefix in &self.status_prefixes
        {
            if let Some(stripped) = rest.strip_prefix(prefix.as_str())
            {
                rest = stripped.trim_start();
            }
        }
        rest = strip_ordinal(rest, &['.']);

        let Some(titles) = &self.titles
        else
        {
            return rest
                .trim()
                .to_string();
        };

        let stripped = self
            .paren_span
            .replace_all(rest, |caps: &Captures<'_>| {
                let span = &caps[0];
                if titles.is_match(span) { String::new() } else { span.to_string() }
            });

        stripped
            .trim()
            .to_string()
    }

    /// Full cleaning: [`normalize`] then [`Cleaner::strip_annotations`].
    pub fn clean(
        &self,
        raw: &str,
    ) -> String
    {
        self.strip_annotations(&normalize(raw))
    }
}
