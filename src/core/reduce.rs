//! Near-duplicate reduction by prefix/suffix containment.
//!
//! Items are visited shortest first. A surviving item of at least
//! `min_containment_chars` characters absorbs every longer survivor that
//! starts or ends with it; interior occurrences never absorb. The shorter
//! form is the canonical one.
//!
//! Lengths are counted in `char`s, not bytes, so Hangul and Latin items
//! share one threshold.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, trace};

/// Default guard against short tokens (bare years, district names).
pub const DEFAULT_MIN_CONTAINMENT_CHARS: usize = 6;

/// Result of one reduction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reduction
{
    /// Survivors, sorted ascending
    pub kept: Vec<String>,

    /// Number of items absorbed by a shorter survivor
    pub removed: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Reducer
{
    min_containment_chars: usize,
}

impl Default for Reducer
{
    fn default() -> Self
    {
        Self::new(DEFAULT_MIN_CONTAINMENT_CHARS)
    }
}

impl Reducer
{
    pub fn new(min_containment_chars: usize) -> Self
    {
        Self { min_containment_chars }
    }

    /// Collapse near-duplicates in an exact-unique set.
    pub fn reduce(
        &self,
        items: &BTreeSet<String>,
    ) -> Reduction
    {
        // (char length, text); BTreeSet iteration already breaks ties by text
        let mut ordered: Vec<(usize, &str)> = items
            .iter()
            .map(|s| (s.chars().count(), s.as_str()))
            .collect();
        ordered.sort_by_key(|&(len, _)| len);

        let mut removed = vec![false; ordered.len()];

        for i in 0..ordered.len()
        {
            if removed[i]
            {
                continue;
            }

            let (short_len, shorter) = ordered[i];
            if short_len < self.min_containment_chars
            {
                continue;
            }

            for j in (i + 1)..ordered.len()
            {
                if removed[j]
                {
                    continue;
                }

                let longer = ordered[j].1;
                if absorbs(shorter, longer)
                {
                    trace!(keep = shorter, drop = longer, "absorbed near-duplicate");
                    removed[j] = true;
                }
            }
        }

        let mut kept: Vec<String> = ordered
            .iter()
            .zip(&removed)
            .filter(|(_, gone)| !**gone)
            .map(|((_, s), _)| (*s).to_string())
            .collect();
        kept.sort();

        let removed = items.len() - kept.len();
        debug!(input = items.len(), kept = kept.len(), removed, "reduction finished");

        Reduction { kept, removed }
    }
}

/// Anchored containment: `shorter` opens or closes `longer`.
///
/// A prefix or suffix match is always a contiguous match, so no separate
/// substring test is needed.
pub fn absorbs(
    shorter: &str,
    longer: &str,
) -> bool
{
    shorter.len() < longer.len() && (longer.starts_with(shorter) || longer.ends_with(shorter))
}

/// Convenience wrapper using the default threshold.
pub fn reduce(items: &BTreeSet<String>) -> Vec<String>
{
    Reducer::default()
        .reduce(items)
        .kept
}
