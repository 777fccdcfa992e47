//! # Charset tables from collations
//!
//! Turns the equivalence classes of a database collation into a compact
//! Sphinx `charset_table`: the codepoints to index, written as singletons and
//! ranges, plus the fold rules mapping each equivalent codepoint to its
//! class's representative.
//!
//! The pipeline runs in four steps:
//! 1. **Grouping**: each class yields a representative (indexed) and its
//!    folded members
//! 2. **Run compression**: long runs of consecutive folded codepoints become
//!    single range rules
//! 3. **Blending**: representatives and included ranges are compacted into
//!    maximal ranges, each followed by the fold rules of the representatives
//!    it covers
//! 4. **Formatting**: rules are rendered as `U+` literals, wrapped for the
//!    config file
//!
//! The classes themselves come from outside, typically a `GROUP BY` over a
//! table of characters in the chosen collation, optionally reviewed by hand as
//! an [`EditableTable`].
//!
//! ## Example
//!
//! ```
//! use charset_table_rs::{CharsetTable, Config, FormatOptions};
//!
//! let config = Config {
//!     format: FormatOptions::bare(),
//!     ..Default::default()
//! };
//! let classes = vec![vec![0x61, 0x41], vec![0x62, 0x42], vec![0x63]];
//!
//! let table = CharsetTable::build(classes, &config, |_| false).unwrap();
//! assert_eq!(
//!     table.render().unwrap(),
//!     "U+61..U+63, U+41->U+61, U+42->U+62\n"
//! );
//! ```

mod blend;
mod charset;
mod codepoint;
mod compact;
mod config;
mod error;
mod fold_run;
mod format;
mod group;
mod ranges;
mod table;

#[cfg(test)]
mod tests;

pub use blend::{BlendedRule, FoldTable, RuleBlender};
pub use charset::{CharsetTable, RuleStats};
pub use codepoint::{Codepoint, CodepointRange, MAX_CODEPOINT};
pub use compact::{merge, retain, runs, subtract, RangeCompactor};
pub use config::{Config, FormatOptions, Layout, RepresentativeRule};
pub use error::{ConfigError, DataError, Error, FormatError};
pub use fold_run::{CompressedFolds, FoldItem, FoldRunCompressor};
pub use format::RuleFormatter;
pub use group::{EquivalenceClass, FoldGrouper, FoldGroups};
pub use ranges::{RangeSelection, RangeSpec};
pub use table::EditableTable;
