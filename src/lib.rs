//! cppedit - incremental C++ syntax highlighting for editor hosts
//!
//! The core is [`syntax::Highlighter::highlight_block`], a pure function
//! from `(BlockState, text)` to layered spans and the state for the next
//! block. Around it sit a per-document cache, a TOML configuration layer,
//! a bracket/quote auto-closer with prefix completion, and a terminal
//! renderer.

pub mod autoclose;
pub mod config;
pub mod error;
pub mod input;
pub mod line;
pub mod prompt;
pub mod render;
pub mod syntax;
pub mod terminal;

pub use error::{Error, Result};
