//! Rendering of blended rules into charset_table text.
//!
//! ```text
//! TOKEN     := CODEPOINT | CODEPOINT ".." CODEPOINT | CODEPOINT "->" CODEPOINT
//!            | CODEPOINT ".." CODEPOINT "->" CODEPOINT
//! CODEPOINT := "U+" HEXDIGITS | ASCII letter or digit
//! ```

use crate::blend::BlendedRule;
use crate::codepoint::{Codepoint, CodepointRange};
use crate::config::{FormatOptions, Layout};
use crate::error::FormatError;

/// Extra indentation of fold lines in the readable layout.
const FOLD_OFFSET: usize = 4;

/// Continuation marker ending every wrapped line.
const CONTINUATION: &str = "\\\n";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    fold: bool,
}

/// Renders [`BlendedRule`]s as charset_table text.
#[derive(Debug, Clone)]
pub struct RuleFormatter<'a> {
    options: &'a FormatOptions,
}

impl<'a> RuleFormatter<'a> {
    pub fn new(options: &'a FormatOptions) -> Self {
        Self { options }
    }

    /// A codepoint literal, e.g. `U+41` or, with literal characters, `A`.
    pub fn literal(&self, codepoint: Codepoint) -> String {
        if self.options.literal_chars {
            if let Some(c) = char::from_u32(codepoint).filter(char::is_ascii_alphanumeric) {
                return c.to_string();
            }
        }
        format!("U+{:0width$x}", codepoint, width = self.options.codepoint_min_digits)
    }

    fn range(&self, range: &CodepointRange) -> String {
        if range.is_single() {
            self.literal(range.from)
        } else {
            format!("{}..{}", self.literal(range.from), self.literal(range.to))
        }
    }

    fn tokens(&self, rules: &[BlendedRule]) -> Result<Vec<Token>, FormatError> {
        let mut tokens = Vec::with_capacity(rules.len());
        for rule in rules {
            match rule {
                BlendedRule::Stray(codepoint) => tokens.push(Token {
                    text: self.literal(*codepoint),
                    fold: false,
                }),
                BlendedRule::StrayRange(range) => tokens.push(Token {
                    text: self.range(range),
                    fold: false,
                }),
                BlendedRule::Fold { target, members } => {
                    if members.is_empty() {
                        return Err(FormatError::EmptyFold { target: *target });
                    }
                    let to = self.literal(*target);
                    tokens.extend(members.iter().map(|&member| Token {
                        text: format!("{}->{}", self.literal(member), to),
                        fold: true,
                    }));
                }
                BlendedRule::FoldRange { target, range } => tokens.push(Token {
                    text: format!("{}->{}", self.range(range), self.literal(*target)),
                    fold: true,
                }),
            }
        }
        Ok(tokens)
    }

    /// Renders `rules` in the configured layout.
    ///
    /// An empty rule list renders as an empty string. Otherwise the text ends
    /// with a newline.
    pub fn format(&self, rules: &[BlendedRule]) -> Result<String, FormatError> {
        if rules.is_empty() {
            return Ok(String::new());
        }

        let tokens = self.tokens(rules)?;
        let (last, rest) = tokens.split_last().ok_or(FormatError::EmptyLineBuffer)?;

        let text = match self.options.layout {
            Layout::Compressed => self.compressed(rest, last),
            Layout::Readable => self.readable(rest, last),
        };
        Ok(text)
    }

    fn compressed(&self, rest: &[Token], last: &Token) -> String {
        let separator = self.options.separator();
        let indent = " ".repeat(self.options.indent_width);

        let mut out = self.options.leader.clone();
        let mut width = out.len();
        // Never wrap before the first token of a line
        let mut line_used = false;

        let pieces = rest
            .iter()
            .map(|token| (token.text.as_str(), separator))
            .chain(std::iter::once((last.text.as_str(), "")));

        for (text, sep) in pieces {
            let piece = text.len() + sep.len();
            // Leave room for the continuation marker
            if line_used && width + piece >= self.options.line_width {
                out.push_str(CONTINUATION);
                out.push_str(&indent);
                width = self.options.indent_width;
            }
            out.push_str(text);
            out.push_str(sep);
            width += piece;
            line_used = true;
        }

        out.push('\n');
        out
    }

    fn readable(&self, rest: &[Token], last: &Token) -> String {
        let separator = self.options.separator().trim_end();
        let mut out = String::new();

        if !self.options.leader.is_empty() {
            out.push_str(self.options.leader.trim_end());
            out.push(' ');
            out.push_str(CONTINUATION);
        }

        let line = |out: &mut String, token: &Token| {
            let offset = if token.fold { FOLD_OFFSET } else { 0 };
            out.push_str(&" ".repeat(self.options.indent_width + offset));
            out.push_str(&token.text);
        };

        for token in rest {
            line(&mut out, token);
            out.push_str(separator);
            out.push(' ');
            out.push_str(CONTINUATION);
        }
        line(&mut out, last);
        out.push('\n');
        out
    }
}
