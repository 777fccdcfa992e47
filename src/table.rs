//! The human-editable equivalence table.
//!
//! One line per equivalence class: the class's characters separated by
//! commas, a tab, then the class's codepoints in hex separated by commas
//! (whitespace works too when editing by hand):
//!
//! ```text
//! A,a,À,à	41,61,C0,E0
//! U+20	20
//! ```
//!
//! Only the hex column is read back; the character column is there for the
//! person reviewing the table. Characters that would be invisible are written
//! as `U+` literals.

use crate::codepoint::{Codepoint, MAX_CODEPOINT};
use crate::error::DataError;
use crate::group::EquivalenceClass;
use std::fmt;
use std::str::FromStr;

/// Equivalence classes in the tab-separated review format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableTable {
    classes: Vec<EquivalenceClass>,
}

impl EditableTable {
    pub fn new(classes: Vec<EquivalenceClass>) -> Self {
        Self { classes }
    }

    /// Parses a table. Blank lines are skipped; anything else that is not a
    /// well-formed row is an error naming its line.
    pub fn parse(text: &str) -> Result<Self, DataError> {
        let mut classes = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let (_chars, hex) = raw.rsplit_once('\t').ok_or(DataError::MissingTab { line })?;

            let members = hex
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .map(|token| parse_codepoint(token, line))
                .collect::<Result<Vec<_>, _>>()?;

            if members.is_empty() {
                return Err(DataError::EmptyRow { line });
            }
            classes.push(EquivalenceClass::new(members));
        }

        tracing::debug!(classes = classes.len(), "parsed editable table");
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<EquivalenceClass> {
        self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn parse_codepoint(token: &str, line: usize) -> Result<Codepoint, DataError> {
    let bad = || DataError::BadHex {
        line,
        token: token.to_string(),
    };
    if token.len() > 8 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let codepoint = Codepoint::from_str_radix(token, 16).map_err(|_| bad())?;
    if codepoint > MAX_CODEPOINT {
        return Err(DataError::LineOutOfRange { line, codepoint });
    }
    Ok(codepoint)
}

/// Writes a codepoint for the character column.
fn write_char(f: &mut fmt::Formatter<'_>, codepoint: Codepoint) -> fmt::Result {
    match char::from_u32(codepoint) {
        Some(c) if !c.is_control() && !c.is_whitespace() && c != ',' => write!(f, "{c}"),
        _ => write!(f, "U+{codepoint:X}"),
    }
}

impl fmt::Display for EditableTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in &self.classes {
            for (i, &codepoint) in class.members().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write_char(f, codepoint)?;
            }
            f.write_str("\t")?;
            for (i, codepoint) in class.members().iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{codepoint:X}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl FromStr for EditableTable {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<EquivalenceClass>> for EditableTable {
    fn from(classes: Vec<EquivalenceClass>) -> Self {
        Self::new(classes)
    }
}
