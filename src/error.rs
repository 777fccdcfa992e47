use crate::codepoint::Codepoint;

/// Malformed or contradictory equivalence input.
///
/// Class indexes are 0-based positions in the input; line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("equivalence class {class} is empty")]
    EmptyClass { class: usize },
    #[error("equivalence class {class} lists U+{codepoint:04X} more than once")]
    DuplicateInClass { class: usize, codepoint: Codepoint },
    #[error("U+{codepoint:04X} appears in equivalence classes {first} and {second}")]
    DuplicateAcrossClasses {
        codepoint: Codepoint,
        first: usize,
        second: usize,
    },
    #[error("equivalence class {class} contains {codepoint:#x}, beyond U+10FFFF")]
    OutOfRange { class: usize, codepoint: Codepoint },
    #[error("line {line}: expected characters, a tab, then hex codepoints")]
    MissingTab { line: usize },
    #[error("line {line}: '{token}' is not a 1-8 digit hex codepoint")]
    BadHex { line: usize, token: String },
    #[error("line {line}: no codepoints after the tab")]
    EmptyRow { line: usize },
    #[error("line {line}: {codepoint:#x} is beyond U+10FFFF")]
    LineOutOfRange { line: usize, codepoint: Codepoint },
}

/// Invalid configuration, detected before any processing starts.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("min_fold_run_length must be at least 2, got {0}")]
    FoldRunTooShort(u32),
    #[error("min_range_length must be at least 2, got {0}")]
    RangeTooShort(u32),
    #[error("line_width {line_width} must be wider than indent_width {indent_width}")]
    LineWidth {
        line_width: usize,
        indent_width: usize,
    },
    #[error("codepoint_min_digits must be between 1 and 8, got {0}")]
    Digits(usize),
    #[error("'{0}' is not a hex codepoint or range like 00A0-02AF")]
    BadRange(String),
    #[error("range '{0}' is reversed")]
    ReversedRange(String),
    #[error("range '{0}' reaches beyond U+10FFFF")]
    RangeOutOfBounds(String),
}

/// Internal inconsistency while rendering rules. Not expected for rules
/// produced by the blender.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("fold rule for U+{target:04X} has no members")]
    EmptyFold { target: Codepoint },
    #[error("no tokens left to terminate the charset table")]
    EmptyLineBuffer,
}

/// Any failure of a charset table run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}
