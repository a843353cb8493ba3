//! Bracket/quote auto-closing and prefix completion
//!
//! [`AutoCloser`] intercepts keystrokes before the host inserts them:
//! - `(`, `[`, `{`, `"` and `'` insert their closing partner and leave the
//!   cursor between the pair
//! - Tab inserts spaces
//! - typing or deleting alphanumerics refreshes a case-insensitive prefix
//!   filter over a fixed suggestion list
//!
//! The popup has two states, visible or hidden, tracked by [`Completer`].

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::input::Keystroke;

/// Keywords and snippets offered for completion
pub const SUGGESTIONS: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor",
    "bool", "break", "case", "catch", "char", "char8_t", "char16_t",
    "char32_t", "class", "compl", "const", "consteval", "constexpr",
    "constinit", "const_cast", "continue", "co_await",
    "co_return", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float",
    "for", "friend", "goto", "if", "inline", "int", "long", "mutable",
    "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator",
    "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof",
    "static", "static_assert", "static_cast", "struct", "switch", "template",
    "this", "thread_local", "throw", "true", "try", "typedef", "typeid",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile",
    "wchar_t", "while", "xor", "xor_eq",
    "include", "iostream", "vector", "string", "algorithm", "cmath",
    "using namespace std;", "main", "cout", "cin", "printf", "scanf",
    "std::", "if () {}", "for () {}", "while () {}", "class {}",
    "struct {}", "template <typename T>", "enum class",
    "cin.clear()", "cin.ignore()", "getline(cin, )", "for (int i = 0; i < N; ++i)",
];

/// Cursor and text access the auto-closer needs from the host buffer.
///
/// Positions are byte offsets on char boundaries.
pub trait EditBuffer {
    /// Full text of the buffer
    fn text(&self) -> &str;

    /// Current cursor position
    fn cursor(&self) -> usize;

    /// Move the cursor
    fn set_cursor(&mut self, pos: usize);

    /// Insert text at the cursor and move the cursor past it
    fn insert_str(&mut self, s: &str);

    /// Delete the character before the cursor
    fn delete_backward(&mut self) -> Option<char>;

    /// Replace a range and put the cursor after the replacement
    fn replace_range(&mut self, range: Range<usize>, s: &str);
}

/// Whether a keystroke was consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The auto-closer edited the buffer or popup; the host does nothing
    Handled,
    /// The host should apply its own handling
    Passthrough,
}

/// Closing partner for an auto-closed character
pub fn closing_pair(ch: char) -> Option<char> {
    match ch {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Byte range of the alphanumeric run touching `cursor`
pub fn token_at(text: &str, cursor: usize) -> Range<usize> {
    let start = text[..cursor]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric())
        .last()
        .map_or(cursor, |(i, _)| i);
    let end = text[cursor..]
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map_or(text.len(), |(i, _)| cursor + i);
    start..end
}

/// Suggestion popup state
#[derive(Debug, Clone)]
pub struct Completer {
    items: Vec<String>,
    prefix: String,
    matches: Vec<usize>,
    selected: usize,
    visible: bool,
}

impl Completer {
    /// Create a completer over a fixed list of suggestions
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            prefix: String::new(),
            matches: Vec::new(),
            selected: 0,
            visible: false,
        }
    }

    /// Recompute matches for a new prefix.
    ///
    /// The popup is shown only for a non-empty prefix with at least one match.
    pub fn update(&mut self, prefix: &str) {
        let needle = prefix.to_lowercase();
        self.prefix = prefix.to_string();
        self.matches = if needle.is_empty() {
            Vec::new()
        } else {
            self.items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.to_lowercase().starts_with(&needle))
                .map(|(i, _)| i)
                .collect()
        };
        self.selected = 0;
        self.visible = !self.matches.is_empty();
    }

    /// Hide the popup
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the popup is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Prefix the matches were computed for
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Matching suggestions in list order
    pub fn matches(&self) -> impl Iterator<Item = &str> + '_ {
        self.matches.iter().map(|&i| self.items[i].as_str())
    }

    /// Currently selected suggestion, if the popup is visible
    pub fn selected(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.matches
            .get(self.selected)
            .map(|&i| self.items[i].as_str())
    }

    /// Move the selection down, wrapping around
    pub fn select_next(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + 1) % self.matches.len();
        }
    }

    /// Move the selection up, wrapping around
    pub fn select_prev(&mut self) {
        if !self.matches.is_empty() {
            self.selected = (self.selected + self.matches.len() - 1) % self.matches.len();
        }
    }

    /// Columns needed to show the widest match
    pub fn popup_width(&self) -> usize {
        self.matches().map(UnicodeWidthStr::width).max().unwrap_or(0)
    }
}

impl Default for Completer {
    fn default() -> Self {
        Self::new(SUGGESTIONS.iter().copied())
    }
}

/// Keystroke interceptor for auto-closing, indentation and completion
#[derive(Debug, Clone)]
pub struct AutoCloser {
    indent_width: usize,
    auto_close: bool,
    completer: Completer,
}

impl AutoCloser {
    /// Create an auto-closer with the default suggestion list
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_width,
            auto_close: true,
            completer: Completer::default(),
        }
    }

    /// Create an auto-closer from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            auto_close: config.auto_close,
            ..Self::new(config.indent_width)
        }
    }

    /// Replace the suggestion list
    pub fn with_completer(mut self, completer: Completer) -> Self {
        self.completer = completer;
        self
    }

    /// Popup state
    pub fn completer(&self) -> &Completer {
        &self.completer
    }

    /// Handle one keystroke against the buffer
    pub fn handle_key<B: EditBuffer + ?Sized>(&mut self, buf: &mut B, key: Keystroke) -> KeyOutcome {
        if self.completer.is_visible() {
            match key {
                Keystroke::Enter => {
                    self.accept(buf);
                    return KeyOutcome::Handled;
                }
                Keystroke::Escape => {
                    self.completer.hide();
                    return KeyOutcome::Handled;
                }
                Keystroke::Up => {
                    self.completer.select_prev();
                    return KeyOutcome::Handled;
                }
                Keystroke::Down => {
                    self.completer.select_next();
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        match key {
            Keystroke::Char(ch) => {
                match closing_pair(ch).filter(|_| self.auto_close) {
                    Some(close) => {
                        let mut pair = String::with_capacity(2);
                        pair.push(ch);
                        pair.push(close);
                        buf.insert_str(&pair);
                        let between = buf.cursor() - close.len_utf8();
                        buf.set_cursor(between);
                        self.completer.hide();
                    }
                    None => {
                        let mut encoded = [0; 4];
                        buf.insert_str(ch.encode_utf8(&mut encoded));
                        if ch.is_alphanumeric() {
                            self.refresh(buf);
                        } else {
                            self.completer.hide();
                        }
                    }
                }
                KeyOutcome::Handled
            }
            Keystroke::Tab => {
                self.completer.hide();
                buf.insert_str(&" ".repeat(self.indent_width));
                KeyOutcome::Handled
            }
            Keystroke::Backspace => {
                buf.delete_backward();
                self.refresh(buf);
                KeyOutcome::Handled
            }
            _ => {
                self.completer.hide();
                KeyOutcome::Passthrough
            }
        }
    }

    /// Replace the word under the cursor with the selected suggestion.
    ///
    /// Returns false if nothing was selected.
    pub fn accept<B: EditBuffer + ?Sized>(&mut self, buf: &mut B) -> bool {
        let Some(choice) = self.completer.selected().map(str::to_string) else {
            return false;
        };
        let range = token_at(buf.text(), buf.cursor());
        buf.replace_range(range, &choice);
        self.completer.hide();
        true
    }

    fn refresh<B: EditBuffer + ?Sized>(&mut self, buf: &B) {
        let range = token_at(buf.text(), buf.cursor());
        self.completer.update(&buf.text()[range]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_pair() {
        assert_eq!(closing_pair('('), Some(')'));
        assert_eq!(closing_pair('\''), Some('\''));
        assert_eq!(closing_pair('<'), None);
    }

    #[test]
    fn test_token_at() {
        let text = "int value = foo";
        assert_eq!(token_at(text, 15), 12..15);
        assert_eq!(token_at(text, 6), 4..9);
        assert_eq!(token_at(text, 11), 11..11);
        assert_eq!(token_at("", 0), 0..0);
        assert_eq!(token_at("über x", 2), 0..5);
    }

    #[test]
    fn test_completer_prefix_is_case_insensitive() {
        let mut completer = Completer::new(["vector", "void", "Volatile", "int"]);
        completer.update("VO");
        assert!(completer.is_visible());
        assert_eq!(completer.matches().collect::<Vec<_>>(), vec!["void", "Volatile"]);
        assert_eq!(completer.selected(), Some("void"));
    }

    #[test]
    fn test_completer_hidden_without_matches() {
        let mut completer = Completer::new(["int"]);
        completer.update("zz");
        assert!(!completer.is_visible());
        completer.update("");
        assert!(!completer.is_visible());
        assert_eq!(completer.selected(), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut completer = Completer::new(["for", "for () {}", "float"]);
        completer.update("f");
        completer.select_prev();
        assert_eq!(completer.selected(), Some("float"));
        completer.select_next();
        assert_eq!(completer.selected(), Some("for"));
        assert_eq!(completer.popup_width(), "for () {}".len());
    }
}
