use crate::codepoint::{Codepoint, MAX_CODEPOINT};
use crate::config::RepresentativeRule;
use crate::error::DataError;
use ahash::AHashMap as HashMap;
use std::collections::BTreeMap;

/// Codepoints a collation compares as equal, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EquivalenceClass(Vec<Codepoint>);

impl EquivalenceClass {
    pub fn new(members: Vec<Codepoint>) -> Self {
        Self(members)
    }

    pub fn members(&self) -> &[Codepoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Codepoint>> for EquivalenceClass {
    fn from(members: Vec<Codepoint>) -> Self {
        Self(members)
    }
}

impl AsRef<[Codepoint]> for EquivalenceClass {
    fn as_ref(&self) -> &[Codepoint] {
        &self.0
    }
}

/// Representatives and their folded members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldGroups {
    /// Every representative, in the order its class was supplied
    representatives: Vec<Codepoint>,
    /// Representative -> folded members, ascending. Singleton classes have no entry.
    folds: BTreeMap<Codepoint, Vec<Codepoint>>,
}

impl FoldGroups {
    pub fn representatives(&self) -> &[Codepoint] {
        &self.representatives
    }

    pub fn folds(&self) -> &BTreeMap<Codepoint, Vec<Codepoint>> {
        &self.folds
    }

    /// Folded members of `representative`, if it has any.
    pub fn folded(&self, representative: Codepoint) -> Option<&[Codepoint]> {
        self.folds.get(&representative).map(Vec::as_slice)
    }

    /// Number of folded codepoints across all classes.
    pub fn folded_count(&self) -> usize {
        self.folds.values().map(Vec::len).sum()
    }
}

/// Splits equivalence classes into representatives and folded members.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldGrouper {
    rule: RepresentativeRule,
}

impl FoldGrouper {
    pub fn new(rule: RepresentativeRule) -> Self {
        Self { rule }
    }

    /// Groups `classes`, rejecting empty classes, out-of-range codepoints and
    /// codepoints that appear more than once anywhere in the input.
    pub fn group<I, C>(&self, classes: I) -> Result<FoldGroups, DataError>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[Codepoint]>,
    {
        let mut groups = FoldGroups::default();
        // Codepoint -> index of the class that claimed it
        let mut seen: HashMap<Codepoint, usize> = HashMap::new();

        for (class, members) in classes.into_iter().enumerate() {
            let members = members.as_ref();

            let Some(&first) = members.first() else {
                return Err(DataError::EmptyClass { class });
            };

            for &codepoint in members {
                if codepoint > MAX_CODEPOINT {
                    return Err(DataError::OutOfRange { class, codepoint });
                }
                if let Some(owner) = seen.insert(codepoint, class) {
                    return Err(if owner == class {
                        DataError::DuplicateInClass { class, codepoint }
                    } else {
                        DataError::DuplicateAcrossClasses {
                            codepoint,
                            first: owner,
                            second: class,
                        }
                    });
                }
            }

            let representative = match self.rule {
                RepresentativeRule::First => first,
                RepresentativeRule::Minimum => members.iter().copied().min().unwrap_or(first),
            };

            if !members.windows(2).all(|pair| pair[0] < pair[1]) {
                tracing::warn!(class, representative, "equivalence class is not ascending; re-sorting");
            }

            let mut folded: Vec<Codepoint> = members
                .iter()
                .copied()
                .filter(|&codepoint| codepoint != representative)
                .collect();
            folded.sort_unstable();

            tracing::trace!(class, representative, folded = folded.len(), "grouped class");

            groups.representatives.push(representative);
            if !folded.is_empty() {
                groups.folds.insert(representative, folded);
            }
        }

        tracing::debug!(
            classes = groups.representatives.len(),
            fold_groups = groups.folds.len(),
            "grouped equivalence classes"
        );
        Ok(groups)
    }
}
