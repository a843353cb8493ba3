//! Pattern rules for syntax highlighting
//!
//! This module defines the rule types used to tag source text and the
//! state carried from one block to the next.

use regex::bytes::{Regex as BytesRegex, RegexBuilder};
use regex::Regex;

use super::style::Span;
use super::tokens::StyleTag;
use crate::error::{Error, Result};

/// A single-block pattern rule
///
/// Every non-empty match of the pattern is tagged with `tag`. Rules are
/// applied in registration order; later rules overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging and error messages
    pub name: String,
    /// Compiled regex pattern
    pub pattern: BytesRegex,
    /// Tag to assign to matches
    pub tag: StyleTag,
    /// Tag only this capture group instead of the whole match
    pub capture_group: Option<usize>,
    /// Same pattern anchored at both ends
    exact: BytesRegex,
}

impl Rule {
    /// Compile a new rule, rejecting malformed patterns
    pub fn new(name: &str, pattern: &str, tag: StyleTag) -> Result<Self> {
        Self::build(name, pattern, tag, true)
    }

    /// Compile a rule whose `\b`, `\w`, `\d` and `\s` only know ASCII.
    ///
    /// Non-ASCII text never matches those classes, so `١٢` is not a number
    /// and `inté` ends a word after `int`. `(?u:...)` opts back in.
    pub fn ascii(name: &str, pattern: &str, tag: StyleTag) -> Result<Self> {
        Self::build(name, pattern, tag, false)
    }

    fn build(name: &str, pattern: &str, tag: StyleTag, unicode: bool) -> Result<Self> {
        let compile = |pattern: &str| {
            RegexBuilder::new(pattern)
                .unicode(unicode)
                .build()
                .map_err(|source| Error::InvalidPattern {
                    name: name.to_string(),
                    source,
                })
        };
        Ok(Self {
            name: name.to_string(),
            pattern: compile(pattern)?,
            tag,
            capture_group: None,
            exact: compile(&format!(r"\A(?:{pattern})\z"))?,
        })
    }

    /// Tag only a capture group of each match.
    ///
    /// Stands in for lookahead, e.g. `\b([A-Za-z_]\w*)\s*\(` with group 1
    /// tags a function name without its parenthesis.
    pub fn with_capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    /// Call `f(start, end)` for every non-empty match, leftmost first.
    ///
    /// Matches that split a character are dropped.
    pub fn for_each_match(&self, text: &str, mut f: impl FnMut(usize, usize)) {
        let mut emit = |start: usize, end: usize| {
            if start < end && text.is_char_boundary(start) && text.is_char_boundary(end) {
                f(start, end);
            }
        };
        let bytes = text.as_bytes();
        match self.capture_group {
            Some(group) => {
                for caps in self.pattern.captures_iter(bytes) {
                    if let Some(m) = caps.get(group) {
                        emit(m.start(), m.end());
                    }
                }
            }
            None => {
                for m in self.pattern.find_iter(bytes) {
                    emit(m.start(), m.end());
                }
            }
        }
    }

    /// Check whether the pattern can match the whole of `text`
    pub fn matches_exactly(&self, text: &str) -> bool {
        self.exact.is_match(text.as_bytes())
    }
}

/// Open/close markers of a block comment that may span blocks
#[derive(Debug, Clone)]
pub struct BlockComment {
    open: Regex,
    close: Regex,
}

impl BlockComment {
    /// Compile a marker pair from regex patterns
    pub fn new(open: &str, close: &str) -> Result<Self> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                name: name.to_string(),
                source,
            })
        };
        Ok(Self {
            open: compile("comment_open", open)?,
            close: compile("comment_close", close)?,
        })
    }

    /// C-style `/*` ... `*/`
    pub fn c_style() -> Result<Self> {
        Self::new(r"/\*", r"\*/")
    }

    /// Find the start of the next open marker at or after `from`
    pub fn find_open(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.open.find_at(text, from).map(|m| m.start())
    }

    /// Find the end of the next close marker at or after `from`
    pub fn find_close(&self, text: &str, from: usize) -> Option<usize> {
        if from > text.len() {
            return None;
        }
        self.close.find_at(text, from).map(|m| m.end())
    }
}

/// State carried from one block to the next
///
/// The only cross-block memory: whether an unterminated block comment
/// is still open at the end of the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockState {
    #[default]
    Clear = 0,
    InComment = 1,
}

impl BlockState {
    /// Integer form, for hosts that store block state as a number
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decode an integer state; anything unknown is treated as `Clear`
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => BlockState::InComment,
            _ => BlockState::Clear,
        }
    }

    /// Check if a block comment is open
    pub fn is_in_comment(self) -> bool {
        self == BlockState::InComment
    }
}

/// Result of highlighting a single block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResult {
    /// Layered spans in application order (later entries win on overlap)
    pub spans: Vec<Span>,
    /// State at end of block (incoming state for the next block)
    pub end_state: BlockState,
}
