use crate::blend::{BlendedRule, FoldTable, RuleBlender};
use crate::codepoint::{Codepoint, CodepointRange};
use crate::compact::{merge, subtract, RangeCompactor};
use crate::config::{Config, FormatOptions};
use crate::error::{Error, FormatError};
use crate::fold_run::FoldRunCompressor;
use crate::format::RuleFormatter;
use crate::group::FoldGrouper;

/// A charset table built from equivalence classes.
///
/// Holds the blended rules of one run together with the format options of
/// the configuration that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharsetTable {
    rules: Vec<BlendedRule>,
    format: FormatOptions,
}

impl CharsetTable {
    /// Builds the rules for `classes` under `config`.
    ///
    /// `is_excluded` is consulted for codepoints indexed through the
    /// configured `include` ranges (and the remainder of the codespace when
    /// `index_remainder` is set). Classes are taken as given; they were
    /// already filtered when the collation was queried.
    pub fn build<I, C, F>(classes: I, config: &Config, is_excluded: F) -> Result<Self, Error>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[Codepoint]>,
        F: FnMut(Codepoint) -> bool,
    {
        config.validate()?;

        let groups = FoldGrouper::new(config.representative).group(classes)?;

        let compressor =
            FoldRunCompressor::new(config.min_fold_run_length, config.merge_adjacent_runs);
        let mut folds = FoldTable::new();
        let mut index: Vec<CodepointRange> = groups
            .representatives()
            .iter()
            .copied()
            .map(CodepointRange::single)
            .collect();

        for &representative in groups.representatives() {
            if let Some(folded) = groups.folded(representative) {
                let compressed = compressor.compress(representative, folded);
                index.extend(compressed.index_additions);
                folds.insert(representative, compressed.items);
            }
        }

        let folded = merge(folds.folded_ranges());
        let unfolded = config.ranges.unfolded_index(is_excluded);
        let kept = subtract(&unfolded, &folded);
        if kept != unfolded {
            tracing::warn!("included ranges overlap folded codepoints; the folds take precedence");
        }
        index.extend(kept);

        let index = RangeCompactor::new(config.min_range_length).compact_ranges(index);
        let rules = RuleBlender::new(config.sort_output).blend(&index, &folds);

        tracing::debug!(
            index_entries = index.len(),
            fold_groups = folds.len(),
            rules = rules.len(),
            "built charset table"
        );

        Ok(Self {
            rules,
            format: config.format.clone(),
        })
    }

    /// The blended rules, in output order.
    pub fn rules(&self) -> &[BlendedRule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<BlendedRule> {
        self.rules
    }

    /// Renders the table with the configured format options.
    pub fn render(&self) -> Result<String, FormatError> {
        self.render_with(&self.format)
    }

    /// Renders the table with other format options.
    pub fn render_with(&self, options: &FormatOptions) -> Result<String, FormatError> {
        RuleFormatter::new(options).format(&self.rules)
    }

    /// Returns statistics about the table.
    pub fn stats(&self) -> RuleStats {
        let mut stats = RuleStats::default();

        for rule in &self.rules {
            match rule {
                BlendedRule::Stray(_) => {
                    stats.index_tokens += 1;
                    stats.codepoints_indexed += 1;
                }
                BlendedRule::StrayRange(range) => {
                    stats.index_tokens += 1;
                    stats.codepoints_indexed += range.len() as usize;
                }
                BlendedRule::Fold { members, .. } => {
                    stats.fold_tokens += members.len();
                    stats.codepoints_folded += members.len();
                }
                BlendedRule::FoldRange { range, .. } => {
                    stats.fold_tokens += 1;
                    stats.fold_ranges += 1;
                    stats.codepoints_folded += range.len() as usize;
                }
            }
        }

        stats
    }
}

/// Statistics about a charset table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleStats {
    /// Singleton and range tokens in the index
    pub index_tokens: usize,
    /// Fold tokens, counting a range fold once
    pub fold_tokens: usize,
    /// Fold tokens written as ranges
    pub fold_ranges: usize,
    pub codepoints_indexed: usize,
    pub codepoints_folded: usize,
}

impl RuleStats {
    pub fn tokens(&self) -> usize {
        self.index_tokens + self.fold_tokens
    }

    /// Returns tokens per covered codepoint as a percentage.
    pub fn compaction_ratio(&self) -> f64 {
        let covered = self.codepoints_indexed + self.codepoints_folded;
        if covered == 0 {
            0.0
        } else {
            (self.tokens() as f64 / covered as f64) * 100.0
        }
    }
}
