//! Syntax highlighting
//!
//! This module provides the incremental block highlighter and the
//! supporting types around it:
//! - Style tags, spans and themes
//! - Regex rules and cross-block comment state
//! - The built-in C++ rule table
//! - A per-document cache for hosts that re-highlight on edit

mod builtin;
mod document;
mod highlighter;
mod rules;
mod style;
mod tokens;

pub use builtin::{cpp_rules, KEYWORDS, TYPES};
pub use document::HighlightCache;
pub use highlighter::{resolve, ClassNamePolicy, Highlighter};
pub use rules::{BlockComment, BlockState, HighlightResult, Rule};
pub use style::{Color, Span, Style, Theme};
pub use tokens::StyleTag;
