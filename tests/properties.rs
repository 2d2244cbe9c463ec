use std::collections::BTreeSet;

use projclean::core::reduce::{Reducer, absorbs};
use projclean::core::{Categorizer, Deduper, Grouping};
use projclean::infra::config::{Config, Labels, Vocabulary};
use projclean::normalize;
use proptest::prelude::*;

const MIN: usize = 6;

fn starts_with_ordinal(s: &str) -> bool {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && matches!(s[digits..].chars().next(), Some('.') | Some(')'))
}

// Small alphabet so prefix/suffix containment is common
fn item_set() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[ab ]{1,12}", 0..24)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "[0-9.) \\t가a;2and]{0,24}") {
        let once = normalize(&s);
        // Only one ordinal is stripped per pass
        prop_assume!(!starts_with_ordinal(&once));
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn reduce_is_idempotent(items in item_set()) {
        let reducer = Reducer::new(MIN);
        let first = reducer.reduce(&items).kept;
        let again = reducer.reduce(&first.iter().cloned().collect()).kept;
        prop_assert_eq!(again, first);
    }

    #[test]
    fn every_removal_is_anchored_and_long_enough(items in item_set()) {
        let kept = Reducer::new(MIN).reduce(&items).kept;
        let kept_set: BTreeSet<&str> = kept.iter().map(String::as_str).collect();

        for gone in items.iter().filter(|s| !kept_set.contains(s.as_str())) {
            let witness = kept
                .iter()
                .find(|k| k.chars().count() >= MIN && absorbs(k, gone));
            prop_assert!(witness.is_some(), "{gone:?} removed without an anchored survivor");
        }
    }

    #[test]
    fn output_is_sorted_subset(items in item_set()) {
        let kept = Reducer::new(MIN).reduce(&items).kept;
        prop_assert!(kept.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(kept.iter().all(|k| items.contains(k)));
    }

    #[test]
    fn canonical_items_meet_length_invariant(lines in prop::collection::vec("\\PC{0,20}", 0..40)) {
        let deduper = Deduper::from_config(&Config::default()).unwrap();
        let outcome = deduper.dedup(lines.iter().map(String::as_str));

        for item in &outcome.items {
            prop_assert!(item.chars().count() >= 2);
            prop_assert!(item.chars().any(|c| !c.is_whitespace()));
        }
        prop_assert_eq!(outcome.summary.input_lines, lines.len());
        prop_assert_eq!(outcome.summary.canonical, outcome.items.len());
        prop_assert!(outcome.summary.canonical <= outcome.summary.unique);
    }

    #[test]
    fn grouping_is_total(items in prop::collection::btree_set("\\PC{1,16}", 0..40)) {
        let categorizer = Categorizer::new(&Vocabulary::default(), &Labels::default()).unwrap();
        let grouping = Grouping::build(&categorizer, items.iter().cloned());

        prop_assert_eq!(grouping.total(), items.len());
        let mut seen: Vec<&String> = grouping.groups.values().flatten().collect();
        seen.sort();
        prop_assert_eq!(seen, items.iter().collect::<Vec<_>>());
    }
}

#[test]
fn pipeline_is_deterministic() {
    let deduper = Deduper::from_config(&Config::default()).unwrap();
    let raw = include_str!("fixtures/projects_raw.txt");

    let a = deduper.dedup_text(raw);
    let b = deduper.dedup_text(raw);
    assert_eq!(a.items, b.items);
    assert_eq!(a.summary, b.summary);
}
