use std::fmt;
use std::ops::RangeInclusive;

/// A Unicode codepoint position.
pub type Codepoint = u32;

/// Highest valid codepoint.
pub const MAX_CODEPOINT: Codepoint = 0x10FFFF;

/// An inclusive, contiguous interval of codepoints.
///
/// A singleton is a range with `from == to`. Formatters render singletons
/// without `..` notation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointRange {
    pub from: Codepoint,
    pub to: Codepoint,
}

impl CodepointRange {
    /// Creates a range. `from` must not exceed `to`.
    pub fn new(from: Codepoint, to: Codepoint) -> Self {
        debug_assert!(from <= to, "range start {from:#x} exceeds end {to:#x}");
        Self { from, to }
    }

    /// Creates a range covering exactly one codepoint.
    pub fn single(codepoint: Codepoint) -> Self {
        Self {
            from: codepoint,
            to: codepoint,
        }
    }

    /// Number of codepoints covered.
    pub fn len(&self) -> u32 {
        self.to - self.from + 1
    }

    /// Always false; a range covers at least one codepoint.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    pub fn contains(&self, codepoint: Codepoint) -> bool {
        self.from <= codepoint && codepoint <= self.to
    }

    /// Returns true if `next` starts immediately after this range ends.
    ///
    /// Uses subtraction so that a range ending at [`MAX_CODEPOINT`] never
    /// computes a successor.
    pub fn touches(&self, next: &CodepointRange) -> bool {
        next.from <= self.to || next.from - self.to == 1
    }

    pub fn iter(&self) -> RangeInclusive<Codepoint> {
        self.from..=self.to
    }
}

impl From<Codepoint> for CodepointRange {
    fn from(codepoint: Codepoint) -> Self {
        Self::single(codepoint)
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "U+{:04X}", self.from)
        } else {
            write!(f, "U+{:04X}..U+{:04X}", self.from, self.to)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let r = CodepointRange::single(0x41);
        assert!(r.is_single());
        assert_eq!(r.len(), 1);
        assert!(r.contains(0x41));
        assert!(!r.contains(0x42));
    }

    #[test]
    fn test_touches_adjacent_and_overlapping() {
        let a = CodepointRange::new(0x41, 0x45);
        assert!(a.touches(&CodepointRange::new(0x46, 0x50)));
        assert!(a.touches(&CodepointRange::new(0x43, 0x50)));
        assert!(!a.touches(&CodepointRange::new(0x47, 0x50)));
    }

    #[test]
    fn test_touches_at_codespace_end() {
        let top = CodepointRange::new(0x10FFF0, MAX_CODEPOINT);
        assert!(top.touches(&CodepointRange::single(MAX_CODEPOINT)));
        assert_eq!(top.len(), 16);
    }

    #[test]
    fn test_display() {
        assert_eq!(CodepointRange::single(0x41).to_string(), "U+0041");
        assert_eq!(
            CodepointRange::new(0x41, 0x5A).to_string(),
            "U+0041..U+005A"
        );
    }
}
