//! Block highlighter
//!
//! [`Highlighter::highlight_block`] is a pure function of the incoming
//! [`BlockState`] and the block text. It runs two passes:
//!
//! 1. the rule pass, applying every [`Rule`] in registration order, so a
//!    later rule overwrites an earlier one where their matches overlap;
//! 2. the block comment pass, applied last so comments win over anything
//!    the rule pass tagged inside them.
//!
//! The returned spans are layered in application order. [`resolve`]
//! flattens them into the disjoint runs a renderer paints.

use serde::Deserialize;

use super::rules::{BlockComment, BlockState, HighlightResult, Rule};
use super::style::Span;
use super::tokens::StyleTag;

/// How class-name matches treat text that is also a keyword
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassNamePolicy {
    /// Last write wins: a PascalCase keyword such as `NULL` ends up tagged
    /// as a class name
    #[default]
    Reference,
    /// Skip class-name matches whose text is matched exactly by a keyword rule
    ExcludeKeywords,
}

/// An ordered rule table plus the block comment markers
#[derive(Debug, Clone)]
pub struct Highlighter {
    rules: Vec<Rule>,
    comment: BlockComment,
    class_names: ClassNamePolicy,
}

impl Highlighter {
    /// Create a highlighter with no rules
    pub fn new(comment: BlockComment) -> Self {
        Self {
            rules: Vec::new(),
            comment,
            class_names: ClassNamePolicy::default(),
        }
    }

    /// Append a rule; its priority is its position in the table
    pub fn add_rule(&mut self, rule: Rule) {
        tracing::debug!(rule = %rule.name, tag = %rule.tag, "registered highlight rule");
        self.rules.push(rule);
    }

    /// Builder: append a rule
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Set how class-name matches interact with keywords
    pub fn set_class_name_policy(&mut self, policy: ClassNamePolicy) {
        self.class_names = policy;
    }

    /// Highlight one block of text.
    ///
    /// Never fails. Re-running with the same `(state, text)` yields the
    /// same result.
    pub fn highlight_block(&self, state: BlockState, text: &str) -> HighlightResult {
        let mut spans = Vec::new();
        self.rule_pass(text, &mut spans);
        let end_state = self.comment_pass(state, text, &mut spans);
        HighlightResult { spans, end_state }
    }

    /// Highlight a whole document, threading state from the first line
    pub fn highlight_text(&self, text: &str) -> Vec<HighlightResult> {
        let mut state = BlockState::Clear;
        text.lines()
            .map(|line| {
                let result = self.highlight_block(state, line);
                state = result.end_state;
                result
            })
            .collect()
    }

    fn rule_pass(&self, text: &str, spans: &mut Vec<Span>) {
        for rule in &self.rules {
            let exclude_keywords = rule.tag == StyleTag::ClassName
                && self.class_names == ClassNamePolicy::ExcludeKeywords;
            rule.for_each_match(text, |start, end| {
                if exclude_keywords && self.is_keyword(&text[start..end]) {
                    return;
                }
                spans.push(Span::new(start, end - start, rule.tag));
            });
        }
    }

    fn is_keyword(&self, word: &str) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.tag == StyleTag::Keyword)
            .any(|rule| rule.matches_exactly(word))
    }

    fn comment_pass(&self, state: BlockState, text: &str, spans: &mut Vec<Span>) -> BlockState {
        let mut end_state = BlockState::Clear;
        let mut next = if state.is_in_comment() {
            Some(0)
        } else {
            self.comment.find_open(text, 0)
        };

        while let Some(start) = next {
            // The close marker may not overlap the open marker: `/*/` stays open.
            let search_from = advance_chars(text, start, 2);
            let end = match self.comment.find_close(text, search_from) {
                Some(end) => end,
                None => {
                    end_state = BlockState::InComment;
                    text.len()
                }
            };
            if end > start {
                spans.push(Span::new(start, end - start, StyleTag::Comment));
            }
            if end_state.is_in_comment() {
                break;
            }
            next = self.comment.find_open(text, end);
        }

        end_state
    }
}

/// Byte offset `n` characters after `pos`, clamped to the end of `text`
fn advance_chars(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| pos + i)
}

/// Flatten layered spans into sorted, disjoint runs.
///
/// Later spans overwrite earlier ones; adjacent bytes with the same tag
/// merge into a single run.
pub fn resolve(text_len: usize, spans: &[Span]) -> Vec<Span> {
    let mut layer: Vec<Option<StyleTag>> = vec![None; text_len];
    for span in spans {
        let end = span.end().min(text_len);
        let start = span.start.min(end);
        layer[start..end].fill(Some(span.tag));
    }

    let mut runs = Vec::new();
    let mut pos = 0;
    while pos < text_len {
        let tag = layer[pos];
        let mut end = pos + 1;
        while end < text_len && layer[end] == tag {
            end += 1;
        }
        if let Some(tag) = tag {
            runs.push(Span::new(pos, end - pos, tag));
        }
        pos = end;
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_highlighter() -> Highlighter {
        Highlighter::new(BlockComment::c_style().unwrap())
            .with_rule(Rule::new("keyword", r"\b(?:int|NULL)\b", StyleTag::Keyword).unwrap())
            .with_rule(Rule::new("number", r"\b\d+\b", StyleTag::Number).unwrap())
            .with_rule(Rule::new("line_comment", r"//.*$", StyleTag::Comment).unwrap())
            .with_rule(Rule::new("class", r"\b[A-Z][A-Za-z0-9_]*\b", StyleTag::ClassName).unwrap())
    }

    #[test]
    fn test_simple_highlighting() {
        let hl = create_test_highlighter();
        let result = hl.highlight_block(BlockState::Clear, "int x = 42;");

        assert_eq!(result.end_state, BlockState::Clear);
        assert_eq!(
            result.spans,
            vec![Span::new(0, 3, StyleTag::Keyword), Span::new(8, 2, StyleTag::Number)]
        );
    }

    #[test]
    fn test_later_rule_overwrites() {
        let hl = create_test_highlighter();
        let result = hl.highlight_block(BlockState::Clear, "x // 42");

        // Number is registered before the line comment, so the comment wins.
        assert_eq!(
            resolve(7, &result.spans),
            vec![Span::new(2, 5, StyleTag::Comment)]
        );
    }

    #[test]
    fn test_class_name_overwrites_keyword_by_default() {
        let hl = create_test_highlighter();
        let result = hl.highlight_block(BlockState::Clear, "NULL");
        assert_eq!(resolve(4, &result.spans), vec![Span::new(0, 4, StyleTag::ClassName)]);
    }

    #[test]
    fn test_class_name_excluding_keywords() {
        let mut hl = create_test_highlighter();
        hl.set_class_name_policy(ClassNamePolicy::ExcludeKeywords);
        let result = hl.highlight_block(BlockState::Clear, "NULL Foo");
        assert_eq!(
            resolve(8, &result.spans),
            vec![Span::new(0, 4, StyleTag::Keyword), Span::new(5, 3, StyleTag::ClassName)]
        );
    }

    #[test]
    fn test_unterminated_open_marker() {
        let hl = create_test_highlighter();
        let result = hl.highlight_block(BlockState::Clear, "/*/");
        assert_eq!(result.end_state, BlockState::InComment);
        assert_eq!(result.spans, vec![Span::new(0, 3, StyleTag::Comment)]);
    }

    #[test]
    fn test_empty_block_passes_state_through() {
        let hl = create_test_highlighter();
        for state in [BlockState::Clear, BlockState::InComment] {
            let result = hl.highlight_block(state, "");
            assert!(result.spans.is_empty());
            assert_eq!(result.end_state, state);
        }
    }

    #[test]
    fn test_multibyte_text_in_comment() {
        let hl = create_test_highlighter();
        let text = "日 */ 1";
        let result = hl.highlight_block(BlockState::InComment, text);
        assert_eq!(result.end_state, BlockState::Clear);
        assert_eq!(
            resolve(text.len(), &result.spans),
            vec![Span::new(0, 6, StyleTag::Comment), Span::new(7, 1, StyleTag::Number)]
        );
    }

    #[test]
    fn test_highlight_text_threads_state() {
        let hl = create_test_highlighter();
        let results = hl.highlight_text("int a; /* open\nstill\nclosed */ 7\n");
        let states: Vec<_> = results.iter().map(|r| r.end_state).collect();
        assert_eq!(
            states,
            vec![BlockState::InComment, BlockState::InComment, BlockState::Clear]
        );
        assert_eq!(results[1].spans, vec![Span::new(0, 5, StyleTag::Comment)]);
    }

    #[test]
    fn test_resolve_merges_and_clamps() {
        let spans = [
            Span::new(0, 2, StyleTag::Number),
            Span::new(2, 2, StyleTag::Number),
            Span::new(6, 10, StyleTag::String),
        ];
        assert_eq!(
            resolve(8, &spans),
            vec![Span::new(0, 4, StyleTag::Number), Span::new(6, 2, StyleTag::String)]
        );
        assert!(resolve(0, &spans).is_empty());
    }
}
