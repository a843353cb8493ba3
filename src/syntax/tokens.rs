//! Style tags for syntax highlighting
//!
//! This module defines the semantic categories a highlighted span can
//! carry and the default visual style for each of them.

use super::style::{Color, Style};

/// Semantic categories applied to highlighted spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleTag {
    /// Language keywords (if, return, class, etc.)
    Keyword,
    /// Standard library type names (size_t, vector, etc.)
    Type,
    /// Preprocessor directives (#include, #define)
    Preprocessor,
    /// String literals
    String,
    /// Character literals
    Char,
    /// Numeric literals (decimal, hex, binary, octal, floats)
    Number,
    /// Line and block comments
    Comment,
    /// Identifiers followed by an opening parenthesis
    Function,
    /// PascalCase identifiers
    ClassName,
}

impl StyleTag {
    /// Every tag, in declaration order
    pub const ALL: [StyleTag; 9] = [
        StyleTag::Keyword,
        StyleTag::Type,
        StyleTag::Preprocessor,
        StyleTag::String,
        StyleTag::Char,
        StyleTag::Number,
        StyleTag::Comment,
        StyleTag::Function,
        StyleTag::ClassName,
    ];

    /// Get the default style for this tag (dark editor palette)
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::Keyword => Style::fg(Color::Rgb(0x56, 0x9c, 0xd6)).with_bold(),
            StyleTag::Type => Style::fg(Color::Rgb(0x4e, 0xc9, 0xb0)),
            StyleTag::Preprocessor => Style::fg(Color::Rgb(0x9b, 0x70, 0x3f)),
            StyleTag::String => Style::fg(Color::Rgb(0xd6, 0x9d, 0x85)),
            StyleTag::Char => Style::fg(Color::Rgb(0xd6, 0x9d, 0x85)),
            StyleTag::Number => Style::fg(Color::Rgb(0xb5, 0xce, 0xa8)),
            StyleTag::Comment => Style::fg(Color::Rgb(0x6a, 0x99, 0x55)),
            StyleTag::Function => Style::fg(Color::Rgb(0xdc, 0xdc, 0xaa)),
            StyleTag::ClassName => Style::fg(Color::Rgb(0x4e, 0xc9, 0xb0)).with_bold(),
        }
    }

    /// Get a human-readable name for this tag
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Keyword => "Keyword",
            StyleTag::Type => "Type",
            StyleTag::Preprocessor => "Preprocessor",
            StyleTag::String => "String",
            StyleTag::Char => "Char",
            StyleTag::Number => "Number",
            StyleTag::Comment => "Comment",
            StyleTag::Function => "Function",
            StyleTag::ClassName => "ClassName",
        }
    }

    /// Parse a tag from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl std::fmt::Display for StyleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
