use crate::codepoint::{Codepoint, CodepointRange};
use crate::fold_run::FoldItem;
use std::collections::BTreeMap;

/// One unit of charset table output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlendedRule {
    /// A codepoint indexed as itself
    Stray(Codepoint),
    /// A range indexed as itself
    StrayRange(CodepointRange),
    /// Each member folds to `target`
    Fold {
        target: Codepoint,
        members: Vec<Codepoint>,
    },
    /// Every codepoint of `range` folds to `target`
    FoldRange {
        target: Codepoint,
        range: CodepointRange,
    },
}

impl BlendedRule {
    pub fn is_fold(&self) -> bool {
        matches!(self, BlendedRule::Fold { .. } | BlendedRule::FoldRange { .. })
    }
}

/// Fold entries keyed by representative, remembering the order in which
/// representatives were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldTable {
    by_target: BTreeMap<Codepoint, Vec<FoldItem>>,
    order: Vec<Codepoint>,
}

impl FoldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the fold entries of `target`. Empty lists are ignored; adding
    /// the same target twice replaces its entries.
    pub fn insert(&mut self, target: Codepoint, items: Vec<FoldItem>) {
        if items.is_empty() {
            return;
        }
        if self.by_target.insert(target, items).is_none() {
            self.order.push(target);
        }
    }

    pub fn get(&self, target: Codepoint) -> Option<&[FoldItem]> {
        self.by_target.get(&target).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }

    /// All folded codepoints as ranges, ascending by target then item.
    pub fn folded_ranges(&self) -> impl Iterator<Item = CodepointRange> + '_ {
        self.by_target.values().flatten().map(FoldItem::as_range)
    }
}

/// Interleaves index entries with the fold rules of the representatives
/// they cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleBlender {
    sort_output: bool,
}

impl Default for RuleBlender {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RuleBlender {
    pub fn new(sort_output: bool) -> Self {
        Self { sort_output }
    }

    /// Blends an ascending, disjoint index with `folds`.
    ///
    /// Sorted output puts each index entry first and then the fold rules of
    /// every representative inside it, ascending. Otherwise all index entries
    /// come first, followed by fold rules in insertion order.
    pub fn blend(&self, index: &[CodepointRange], folds: &FoldTable) -> Vec<BlendedRule> {
        let mut rules = Vec::with_capacity(index.len() + folds.len());

        if !self.sort_output {
            rules.extend(index.iter().map(index_rule));
            for &target in &folds.order {
                if let Some(items) = folds.by_target.get(&target) {
                    push_fold_rules(&mut rules, target, items);
                }
            }
            return rules;
        }

        let mut emitted = 0;
        for entry in index {
            rules.push(index_rule(entry));
            for (&target, items) in folds.by_target.range(entry.from..=entry.to) {
                push_fold_rules(&mut rules, target, items);
                emitted += 1;
            }
        }

        if emitted < folds.len() {
            for (&target, items) in &folds.by_target {
                if !index.iter().any(|entry| entry.contains(target)) {
                    tracing::warn!(representative = target, "fold target is not indexed; appending its rules");
                    push_fold_rules(&mut rules, target, items);
                }
            }
        }

        rules
    }
}

fn index_rule(entry: &CodepointRange) -> BlendedRule {
    if entry.is_single() {
        BlendedRule::Stray(entry.from)
    } else {
        BlendedRule::StrayRange(*entry)
    }
}

/// Consecutive single items collapse into one `Fold`; each range item is a
/// `FoldRange` of its own.
fn push_fold_rules(rules: &mut Vec<BlendedRule>, target: Codepoint, items: &[FoldItem]) {
    let mut members = Vec::new();
    for item in items {
        match item {
            FoldItem::Single(codepoint) => members.push(*codepoint),
            FoldItem::Range(range) => {
                if !members.is_empty() {
                    rules.push(BlendedRule::Fold {
                        target,
                        members: std::mem::take(&mut members),
                    });
                }
                rules.push(BlendedRule::FoldRange {
                    target,
                    range: *range,
                });
            }
        }
    }
    if !members.is_empty() {
        rules.push(BlendedRule::Fold { target, members });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(from: Codepoint, to: Codepoint) -> CodepointRange {
        CodepointRange::new(from, to)
    }

    #[test]
    fn test_plain_range() {
        let rules = RuleBlender::default().blend(&[r(65, 67)], &FoldTable::new());
        assert_eq!(rules, vec![BlendedRule::StrayRange(r(65, 67))]);
    }

    #[test]
    fn test_single_fold() {
        let mut folds = FoldTable::new();
        folds.insert(97, vec![FoldItem::Single(65)]);
        let rules = RuleBlender::default().blend(&[r(97, 97)], &folds);
        assert_eq!(
            rules,
            vec![
                BlendedRule::Stray(97),
                BlendedRule::Fold {
                    target: 97,
                    members: vec![65]
                },
            ]
        );
    }

    #[test]
    fn test_folds_follow_covering_range() {
        let mut folds = FoldTable::new();
        folds.insert(0x62, vec![FoldItem::Single(0x42)]);
        folds.insert(0x61, vec![FoldItem::Single(0x41), FoldItem::Single(0xC0)]);
        folds.insert(0x30, vec![FoldItem::Single(0x660)]);

        let rules = RuleBlender::default().blend(&[r(0x30, 0x30), r(0x61, 0x7A)], &folds);
        assert_eq!(
            rules,
            vec![
                BlendedRule::Stray(0x30),
                BlendedRule::Fold {
                    target: 0x30,
                    members: vec![0x660]
                },
                BlendedRule::StrayRange(r(0x61, 0x7A)),
                BlendedRule::Fold {
                    target: 0x61,
                    members: vec![0x41, 0xC0]
                },
                BlendedRule::Fold {
                    target: 0x62,
                    members: vec![0x42]
                },
            ]
        );
    }

    #[test]
    fn test_ranges_split_fold_members() {
        let mut folds = FoldTable::new();
        folds.insert(
            100,
            vec![
                FoldItem::Single(50),
                FoldItem::Range(r(101, 106)),
                FoldItem::Single(200),
                FoldItem::Single(201),
            ],
        );
        let rules = RuleBlender::default().blend(&[r(100, 100)], &folds);
        assert_eq!(
            rules,
            vec![
                BlendedRule::Stray(100),
                BlendedRule::Fold {
                    target: 100,
                    members: vec![50]
                },
                BlendedRule::FoldRange {
                    target: 100,
                    range: r(101, 106)
                },
                BlendedRule::Fold {
                    target: 100,
                    members: vec![200, 201]
                },
            ]
        );
    }

    #[test]
    fn test_unsorted_layout_keeps_insertion_order() {
        let mut folds = FoldTable::new();
        folds.insert(0x62, vec![FoldItem::Single(0x42)]);
        folds.insert(0x61, vec![FoldItem::Single(0x41)]);

        let rules = RuleBlender::new(false).blend(&[r(0x61, 0x62)], &folds);
        assert_eq!(
            rules,
            vec![
                BlendedRule::StrayRange(r(0x61, 0x62)),
                BlendedRule::Fold {
                    target: 0x62,
                    members: vec![0x42]
                },
                BlendedRule::Fold {
                    target: 0x61,
                    members: vec![0x41]
                },
            ]
        );
    }

    #[test]
    fn test_uncovered_target_appended() {
        let mut folds = FoldTable::new();
        folds.insert(0x500, vec![FoldItem::Single(0x501)]);
        let rules = RuleBlender::default().blend(&[r(0x41, 0x42)], &folds);
        assert_eq!(rules.len(), 2);
        assert!(rules[1].is_fold());
    }

    #[test]
    fn test_empty() {
        assert!(RuleBlender::default().blend(&[], &FoldTable::new()).is_empty());
    }
}
