//! Configuration file support
//!
//! Loads settings from ~/.cppedit.toml (or %USERPROFILE%\.cppedit.toml on Windows)
//!
//! Example:
//! ```toml
//! indent-width = 4
//! auto-close = true
//! line-numbers = false
//! class-names = "exclude-keywords"
//!
//! [theme]
//! Keyword = { fg = "#569cd6", bold = true }
//!
//! [[rule]]
//! name = "todo"
//! pattern = "TODO|FIXME"
//! tag = "Comment"
//! ```
//!
//! Extra rules run after the built-in C++ table, so they win on overlap.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::syntax::{ClassNamePolicy, Color, Highlighter, Rule, Style, StyleTag, Theme};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Spaces inserted for Tab
    pub indent_width: usize,
    /// Whether brackets and quotes are closed automatically
    pub auto_close: bool,
    /// Whether the binary prints a line number gutter
    pub line_numbers: bool,
    /// Class-name versus keyword behaviour
    pub class_names: ClassNamePolicy,
    /// Per-tag style overrides, keyed by tag name
    pub theme: BTreeMap<String, StyleSpec>,
    /// Extra rules appended to the built-in table
    #[serde(rename = "rule")]
    pub rules: Vec<RuleSpec>,
}

/// Style override for one tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleSpec {
    pub fg: Option<String>,
    pub bg: Option<String>,
    pub bold: bool,
    pub italic: bool,
}

/// A user-defined highlight rule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    pub tag: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            auto_close: true,
            line_numbers: false,
            class_names: ClassNamePolicy::default(),
            theme: BTreeMap::new(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".cppedit.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".cppedit.toml"))
        }
    }

    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from `path`, which must exist
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.indent_width = config.indent_width.clamp(1, 16);
        Ok(config)
    }

    /// Build the highlighter: built-in C++ rules followed by configured rules
    pub fn highlighter(&self) -> Result<Highlighter> {
        let mut highlighter = Highlighter::cpp()?;
        highlighter.set_class_name_policy(self.class_names);
        for spec in &self.rules {
            let tag = parse_tag(&spec.tag)?;
            highlighter.add_rule(Rule::new(&spec.name, &spec.pattern, tag)?);
        }
        Ok(highlighter)
    }

    /// Build the theme: defaults with configured overrides applied
    pub fn theme(&self) -> Result<Theme> {
        let mut theme = Theme::default();
        for (name, spec) in &self.theme {
            theme.set(parse_tag(name)?, spec.to_style()?);
        }
        Ok(theme)
    }
}

impl StyleSpec {
    fn to_style(&self) -> Result<Style> {
        let parse = |color: &Option<String>| {
            color
                .as_deref()
                .map_or(Ok(Color::Default), Color::from_hex)
        };
        let mut style = Style::fg(parse(&self.fg)?).with_bg(parse(&self.bg)?);
        if self.bold {
            style = style.with_bold();
        }
        if self.italic {
            style = style.with_italic();
        }
        Ok(style)
    }
}

fn parse_tag(name: &str) -> Result<StyleTag> {
    StyleTag::from_name(name).ok_or_else(|| Error::UnknownTag(name.to_string()))
}
