//! Run configuration.
//!
//! Every component takes the settings it needs through its constructor; there
//! is no global state. A configuration is usually read from TOML:
//!
//! ```toml
//! min_fold_run_length = 5
//! representative = "minimum"
//!
//! [ranges]
//! collate = ["0000-007E", "00A0-02AF"]
//! exclude = ["D800-DFFF"]
//!
//! [format]
//! layout = "readable"
//! line_width = 100
//! ```
//!
//! Unknown keys are rejected.

use crate::error::ConfigError;
use crate::ranges::RangeSelection;
use serde::Deserialize;

/// Which member of an equivalence class becomes its representative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeRule {
    /// The first member in upstream order.
    #[default]
    First,
    /// The lowest codepoint of the class.
    Minimum,
}

/// Presentation of the rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One rule per line, folds indented beneath their representative.
    Readable,
    /// Rules packed onto as few lines as `line_width` allows.
    #[default]
    Compressed,
}

/// Options for [`RuleFormatter`](crate::RuleFormatter).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    pub layout: Layout,
    /// Minimum number of hex digits in a `U+` literal
    pub codepoint_min_digits: usize,
    /// Maximum output line length, including the continuation marker
    pub line_width: usize,
    /// Spaces at the start of each continuation line
    pub indent_width: usize,
    /// Text written before the first rule
    pub leader: String,
    /// Join tokens with `,` instead of `, `
    pub stingy_whitespace: bool,
    /// Write ASCII letters and digits as themselves rather than `U+` literals
    pub literal_chars: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            layout: Layout::Compressed,
            codepoint_min_digits: 2,
            line_width: 120,
            indent_width: 8,
            leader: "    charset_table = ".to_string(),
            stingy_whitespace: false,
            literal_chars: false,
        }
    }
}

impl FormatOptions {
    /// Options that render bare rules: no leader, nothing else changed.
    pub fn bare() -> Self {
        FormatOptions {
            leader: String::new(),
            ..Default::default()
        }
    }

    pub fn separator(&self) -> &'static str {
        if self.stingy_whitespace {
            ","
        } else {
            ", "
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.codepoint_min_digits) {
            return Err(ConfigError::Digits(self.codepoint_min_digits));
        }
        if self.line_width <= self.indent_width {
            return Err(ConfigError::LineWidth {
                line_width: self.line_width,
                indent_width: self.indent_width,
            });
        }
        Ok(())
    }
}

/// Full configuration of a charset table run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fold runs at least this long are written as one range rule.
    /// `None` disables the heuristic.
    pub min_fold_run_length: Option<u32>,
    /// Index runs shorter than this are listed codepoint by codepoint
    pub min_range_length: u32,
    pub representative: RepresentativeRule,
    /// Absorb a long fold run starting right after its representative into
    /// the representative's index entry
    pub merge_adjacent_runs: bool,
    /// Place fold rules directly after the index entry of their target
    pub sort_output: bool,
    pub ranges: RangeSelection,
    pub format: FormatOptions,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            min_fold_run_length: None,
            min_range_length: 2,
            representative: RepresentativeRule::First,
            merge_adjacent_runs: false,
            sort_output: true,
            ranges: RangeSelection::default(),
            format: FormatOptions::default(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(min) = self.min_fold_run_length {
            if min < 2 {
                return Err(ConfigError::FoldRunTooShort(min));
            }
        }
        if self.min_range_length < 2 {
            return Err(ConfigError::RangeTooShort(self.min_range_length));
        }
        self.format.validate()
    }
}
