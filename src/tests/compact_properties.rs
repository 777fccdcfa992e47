use crate::codepoint::{Codepoint, CodepointRange, MAX_CODEPOINT};
use crate::compact::{merge, subtract, RangeCompactor};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Codepoints clustered at both ends of the codespace, so runs are common.
fn codepoint() -> impl Strategy<Value = Codepoint> {
    prop_oneof![0u32..300, (MAX_CODEPOINT - 300)..=MAX_CODEPOINT]
}

fn range() -> impl Strategy<Value = CodepointRange> {
    (codepoint(), 0u32..40).prop_map(|(from, len)| {
        CodepointRange::new(from, from.saturating_add(len).min(MAX_CODEPOINT))
    })
}

fn expand(ranges: &[CodepointRange]) -> BTreeSet<Codepoint> {
    ranges.iter().flat_map(CodepointRange::iter).collect()
}

proptest! {
    /// Property 1: Compaction covers exactly the input set
    #[test]
    fn prop_compact_covers_input(input in prop::collection::vec(codepoint(), 0..200)) {
        let compacted = RangeCompactor::default().compact(input.clone());
        let expected: BTreeSet<Codepoint> = input.into_iter().collect();
        let covered: usize = compacted.iter().map(|r| r.len() as usize).sum();

        prop_assert_eq!(covered, expected.len(), "codepoint listed twice");
        prop_assert_eq!(expand(&compacted), expected);
    }

    /// Property 2: Ranges are ascending, disjoint and maximal
    #[test]
    fn prop_compact_maximal(input in prop::collection::vec(codepoint(), 0..200)) {
        let compacted = RangeCompactor::default().compact(input);
        for pair in compacted.windows(2) {
            prop_assert!(
                u64::from(pair[1].from) > u64::from(pair[0].to) + 1,
                "{} and {} could be merged",
                pair[0],
                pair[1]
            );
        }
    }

    /// Property 3: Short runs are split, long runs are kept whole
    #[test]
    fn prop_min_range_length(
        input in prop::collection::vec(codepoint(), 0..200),
        min in 2u32..6,
    ) {
        let compacted = RangeCompactor::new(min).compact(input);
        for range in &compacted {
            prop_assert!(range.is_single() || range.len() >= min);
        }
    }

    /// Property 4: Merging ranges agrees with compacting their codepoints
    #[test]
    fn prop_merge_matches_compact(ranges in prop::collection::vec(range(), 0..30)) {
        let merged = merge(ranges.clone());
        let compacted = RangeCompactor::default().compact(expand(&ranges));
        prop_assert_eq!(expand(&merged), expand(&compacted));
        prop_assert!(merged.windows(2).all(|p| u64::from(p[1].from) > u64::from(p[0].to) + 1));
    }

    /// Property 5: Subtraction is set difference
    #[test]
    fn prop_subtract_is_difference(
        ranges in prop::collection::vec(range(), 0..30),
        holes in prop::collection::vec(range(), 0..30),
    ) {
        let ranges = merge(ranges);
        let holes = merge(holes);
        let left = subtract(&ranges, &holes);

        let expected: BTreeSet<Codepoint> =
            expand(&ranges).difference(&expand(&holes)).copied().collect();
        prop_assert_eq!(expand(&left), expected);
        prop_assert!(left.windows(2).all(|p| p[0].to < p[1].from));
    }
}

/// Bolero fuzz test: Compaction never panics and never overflows
#[cfg(test)]
#[test]
fn fuzz_compact_no_panic() {
    bolero::check!()
        .with_type::<Vec<u32>>()
        .for_each(|input| {
            let valid: Vec<Codepoint> = input.iter().map(|cp| cp % (MAX_CODEPOINT + 1)).collect();
            let compacted = RangeCompactor::default().compact(valid.iter().copied());

            for range in &compacted {
                assert!(range.from <= range.to);
                assert!(range.to <= MAX_CODEPOINT);
            }
        });
}
