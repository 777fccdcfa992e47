use crate::codepoint::{Codepoint, CodepointRange};

/// Groups an ascending sequence of codepoints into maximal runs of
/// consecutive integers.
///
/// Repeated codepoints count once. Input that is not ascending is not an
/// error, but a decrease simply starts a new run.
pub fn runs<I>(sorted: I) -> Vec<CodepointRange>
where
    I: IntoIterator<Item = Codepoint>,
{
    sorted
        .into_iter()
        .fold(Vec::new(), |mut runs: Vec<CodepointRange>, codepoint| {
            match runs.last_mut() {
                Some(last) if last.to == codepoint => {}
                Some(last) if codepoint.checked_sub(last.to) == Some(1) => last.to = codepoint,
                _ => runs.push(CodepointRange::single(codepoint)),
            }
            runs
        })
}

/// Merges overlapping and adjacent ranges into an ascending list of
/// disjoint, maximal ranges.
pub fn merge<I>(ranges: I) -> Vec<CodepointRange>
where
    I: IntoIterator<Item = CodepointRange>,
{
    let mut sorted: Vec<CodepointRange> = ranges.into_iter().collect();
    sorted.sort_unstable();

    sorted
        .into_iter()
        .fold(Vec::new(), |mut merged: Vec<CodepointRange>, range| {
            match merged.last_mut() {
                Some(last) if last.touches(&range) => last.to = last.to.max(range.to),
                _ => merged.push(range),
            }
            merged
        })
}

/// Removes every codepoint covered by `holes` from `ranges`.
///
/// Both inputs must be ascending and disjoint, as produced by [`merge`].
pub fn subtract(ranges: &[CodepointRange], holes: &[CodepointRange]) -> Vec<CodepointRange> {
    let mut out = Vec::with_capacity(ranges.len());
    let mut cursor = 0;

    for range in ranges {
        // Holes entirely before this range can never matter again
        while cursor < holes.len() && holes[cursor].to < range.from {
            cursor += 1;
        }

        let mut next = cursor;
        let mut start = Some(range.from);
        while let Some(from) = start {
            match holes.get(next) {
                Some(hole) if hole.from <= range.to => {
                    if hole.from > from {
                        out.push(CodepointRange::new(from, hole.from - 1));
                    }
                    // hole.to < range.to here, so the successor exists
                    start = (hole.to < range.to).then(|| hole.to + 1);
                    next += 1;
                }
                _ => {
                    out.push(CodepointRange::new(from, range.to));
                    start = None;
                }
            }
        }
    }

    out
}

/// Keeps the codepoints of `ranges` for which `keep` returns true.
///
/// `ranges` must be ascending and disjoint.
pub fn retain<F>(ranges: &[CodepointRange], mut keep: F) -> Vec<CodepointRange>
where
    F: FnMut(Codepoint) -> bool,
{
    runs(
        ranges
            .iter()
            .flat_map(CodepointRange::iter)
            .filter(|&codepoint| keep(codepoint)),
    )
}

/// Compacts codepoint sets into the fewest ascending index entries.
///
/// Runs shorter than `min_range_length` are listed as individual singletons.
/// With the default of 2 every pair of neighbours already becomes a range,
/// which makes the output maximal: no two entries could be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCompactor {
    min_range_length: u32,
}

impl RangeCompactor {
    pub fn new(min_range_length: u32) -> Self {
        Self { min_range_length }
    }

    /// Compacts an unordered collection of codepoints.
    pub fn compact<I>(&self, codepoints: I) -> Vec<CodepointRange>
    where
        I: IntoIterator<Item = Codepoint>,
    {
        let mut sorted: Vec<Codepoint> = codepoints.into_iter().collect();
        sorted.sort_unstable();
        self.split_short(runs(sorted))
    }

    /// Compacts an unordered collection of possibly overlapping ranges
    /// without expanding them.
    pub fn compact_ranges<I>(&self, ranges: I) -> Vec<CodepointRange>
    where
        I: IntoIterator<Item = CodepointRange>,
    {
        self.split_short(merge(ranges))
    }

    fn split_short(&self, runs: Vec<CodepointRange>) -> Vec<CodepointRange> {
        let mut out = Vec::with_capacity(runs.len());
        for run in runs {
            if run.len() >= self.min_range_length {
                out.push(run);
            } else {
                out.extend(run.iter().map(CodepointRange::single));
            }
        }
        out
    }
}

impl Default for RangeCompactor {
    fn default() -> Self {
        Self::new(2)
    }
}
