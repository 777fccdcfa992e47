//! Selection of the codepoints a charset table covers.
//!
//! Three lists of [`RangeSpec`]s drive the selection:
//!
//! * `collate` ranges are sent to the collation and come back as equivalence
//!   classes, so they are indexed and folded.
//! * `include` ranges are indexed as-is, without folding.
//! * `exclude` ranges are never indexed unless a collation class brings them
//!   back. Excluded codepoints act as keyword separators.
//!
//! With `index_remainder` every codepoint outside `collate` and `exclude` is
//! indexed as well.

use crate::codepoint::{Codepoint, CodepointRange, MAX_CODEPOINT};
use crate::compact::{merge, retain, subtract};
use crate::error::ConfigError;
use serde::Deserialize;
use std::str::FromStr;

/// A codepoint range written as hex, e.g. `"00A0-02AF"` or a single `"261C"`.
///
/// `..` is accepted as a separator too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct RangeSpec(pub CodepointRange);

impl FromStr for RangeSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        let (from, to) = match spec.split_once("..").or_else(|| spec.split_once('-')) {
            Some((from, to)) => (parse_hex(from, s)?, parse_hex(to, s)?),
            None => {
                let single = parse_hex(spec, s)?;
                (single, single)
            }
        };

        if from > to {
            return Err(ConfigError::ReversedRange(s.to_string()));
        }
        if to > MAX_CODEPOINT {
            return Err(ConfigError::RangeOutOfBounds(s.to_string()));
        }
        Ok(RangeSpec(CodepointRange::new(from, to)))
    }
}

impl TryFrom<String> for RangeSpec {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn parse_hex(digits: &str, spec: &str) -> Result<Codepoint, ConfigError> {
    let digits = digits.trim();
    if digits.is_empty() || digits.len() > 8 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::BadRange(spec.to_string()));
    }
    Codepoint::from_str_radix(digits, 16).map_err(|_| ConfigError::BadRange(spec.to_string()))
}

/// The `[ranges]` configuration table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeSelection {
    pub collate: Vec<RangeSpec>,
    pub include: Vec<RangeSpec>,
    pub exclude: Vec<RangeSpec>,
    pub index_remainder: bool,
}

impl RangeSelection {
    fn merged(specs: &[RangeSpec]) -> Vec<CodepointRange> {
        merge(specs.iter().map(|spec| spec.0))
    }

    /// Codepoints to hand to the collation, ascending.
    ///
    /// These are what the external database groups into equivalence classes.
    pub fn collation_codepoints<F>(&self, mut is_excluded: F) -> Vec<Codepoint>
    where
        F: FnMut(Codepoint) -> bool,
    {
        retain(&Self::merged(&self.collate), |cp| !is_excluded(cp))
            .iter()
            .flat_map(CodepointRange::iter)
            .collect()
    }

    /// Ranges indexed without folding, ascending and disjoint.
    pub fn unfolded_index<F>(&self, mut is_excluded: F) -> Vec<CodepointRange>
    where
        F: FnMut(Codepoint) -> bool,
    {
        let exclude = Self::merged(&self.exclude);
        let mut included = subtract(&Self::merged(&self.include), &exclude);

        if self.index_remainder {
            let taken = merge(
                self.collate
                    .iter()
                    .chain(self.exclude.iter())
                    .map(|spec| spec.0),
            );
            let remainder = subtract(&[CodepointRange::new(0, MAX_CODEPOINT)], &taken);
            tracing::debug!(ranges = remainder.len(), "indexing remainder of the codespace");
            included = merge(included.into_iter().chain(remainder));
        }

        retain(&included, |cp| !is_excluded(cp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> RangeSpec {
        s.parse().unwrap()
    }

    fn r(from: Codepoint, to: Codepoint) -> CodepointRange {
        CodepointRange::new(from, to)
    }

    #[test]
    fn test_parse_range_spec() {
        assert_eq!(spec("00A0-02AF").0, r(0xA0, 0x2AF));
        assert_eq!(spec("261c").0, r(0x261C, 0x261C));
        assert_eq!(spec(" 41..5A ").0, r(0x41, 0x5A));
        assert_eq!(spec("30000-10FFFF").0, r(0x30000, MAX_CODEPOINT));
    }

    #[test]
    fn test_parse_range_spec_errors() {
        assert!(matches!("xyz".parse::<RangeSpec>(), Err(ConfigError::BadRange(_))));
        assert!(matches!("41-".parse::<RangeSpec>(), Err(ConfigError::BadRange(_))));
        assert!(matches!("123456789".parse::<RangeSpec>(), Err(ConfigError::BadRange(_))));
        assert!(matches!("5A-41".parse::<RangeSpec>(), Err(ConfigError::ReversedRange(_))));
        assert!(matches!(
            "10FFFF-110000".parse::<RangeSpec>(),
            Err(ConfigError::RangeOutOfBounds(_))
        ));
    }

    #[test]
    fn test_collation_codepoints_honor_exclusion() {
        let selection = RangeSelection {
            collate: vec![spec("41-45"), spec("43-46")],
            ..Default::default()
        };
        assert_eq!(
            selection.collation_codepoints(|cp| cp == 0x44),
            vec![0x41, 0x42, 0x43, 0x45, 0x46]
        );
    }

    #[test]
    fn test_unfolded_index_subtracts_exclude() {
        let selection = RangeSelection {
            include: vec![spec("30-39"), spec("2000-206F")],
            exclude: vec![spec("2000-200F")],
            ..Default::default()
        };
        assert_eq!(
            selection.unfolded_index(|_| false),
            vec![r(0x30, 0x39), r(0x2010, 0x206F)]
        );
    }

    #[test]
    fn test_unfolded_index_remainder() {
        let selection = RangeSelection {
            collate: vec![spec("0000-007E")],
            exclude: vec![spec("007F-009F"), spec("D800-10FFFF")],
            index_remainder: true,
            ..Default::default()
        };
        assert_eq!(
            selection.unfolded_index(|cp| cp == 0xA0),
            vec![r(0xA1, 0xD7FF)]
        );
    }
}
