use crate::codepoint::{Codepoint, CodepointRange};
use crate::compact::runs;

/// One entry of a representative's fold list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FoldItem {
    /// A single codepoint folding to the representative
    Single(Codepoint),
    /// Every codepoint of the range folds to the representative
    Range(CodepointRange),
}

impl FoldItem {
    pub fn first(&self) -> Codepoint {
        match self {
            FoldItem::Single(codepoint) => *codepoint,
            FoldItem::Range(range) => range.from,
        }
    }

    /// Number of codepoints this item folds.
    pub fn len(&self) -> u32 {
        match self {
            FoldItem::Single(_) => 1,
            FoldItem::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_range(&self) -> CodepointRange {
        match self {
            FoldItem::Single(codepoint) => CodepointRange::single(*codepoint),
            FoldItem::Range(range) => *range,
        }
    }
}

/// Result of compressing one fold group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedFolds {
    /// Fold entries, ascending
    pub items: Vec<FoldItem>,
    /// Runs absorbed into the representative's index entry
    pub index_additions: Vec<CodepointRange>,
}

/// Rewrites long runs of folded codepoints as range rules.
///
/// A run of consecutive folded codepoints at least `min_run` long becomes one
/// [`FoldItem::Range`]; shorter runs stay as individual [`FoldItem::Single`]s.
/// The fold target never changes, only how the mapping is written.
///
/// With `merge_adjacent`, a long run starting right after its representative is
/// handed back as an index addition instead, so it extends the
/// representative's index entry. Those codepoints are then indexed in their own
/// right rather than folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldRunCompressor {
    min_run: Option<u32>,
    merge_adjacent: bool,
}

impl FoldRunCompressor {
    pub fn new(min_run: Option<u32>, merge_adjacent: bool) -> Self {
        Self {
            min_run,
            merge_adjacent,
        }
    }

    pub fn compress(&self, representative: Codepoint, folded: &[Codepoint]) -> CompressedFolds {
        let Some(min_run) = self.min_run else {
            return CompressedFolds {
                items: folded.iter().copied().map(FoldItem::Single).collect(),
                index_additions: Vec::new(),
            };
        };

        let mut sorted = folded.to_vec();
        sorted.sort_unstable();

        let mut compressed = CompressedFolds::default();
        for run in runs(sorted) {
            if run.len() < min_run {
                compressed.items.extend(run.iter().map(FoldItem::Single));
            } else if self.merge_adjacent && representative.checked_add(1) == Some(run.from) {
                tracing::trace!(representative, from = run.from, to = run.to, "run merged into index");
                compressed.index_additions.push(run);
            } else {
                compressed.items.push(FoldItem::Range(run));
            }
        }
        compressed
    }
}
