//! Style types for highlighted text
//!
//! The highlighter only assigns [`StyleTag`]s; a [`Theme`] maps each tag
//! to the visual [`Style`] a rendering sink paints.

use std::collections::HashMap;

use super::tokens::StyleTag;
use crate::error::{Error, Result};

/// Foreground/background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a `#rrggbb` color
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A tagged region within a single block
///
/// Offsets are byte offsets into the block's UTF-8 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Semantic category of the region
    pub tag: StyleTag,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, len: usize, tag: StyleTag) -> Self {
        Self { start, len, tag }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Mapping from style tags to visual styles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<StyleTag, Style>,
}

impl Theme {
    /// Set the style used for a tag
    pub fn set(&mut self, tag: StyleTag, style: Style) {
        self.styles.insert(tag, style);
    }

    /// Look up the style for a tag
    pub fn style(&self, tag: StyleTag) -> Style {
        self.styles
            .get(&tag)
            .copied()
            .unwrap_or_else(|| tag.default_style())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            styles: StyleTag::ALL
                .into_iter()
                .map(|tag| (tag, tag.default_style()))
                .collect(),
        }
    }
}
