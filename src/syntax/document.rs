//! Per-document highlight cache
//!
//! The highlighter itself is stateless; this module is the host side
//! that stores each block's outgoing state and spans and decides which
//! blocks must be recomputed after an edit.

use super::highlighter::Highlighter;
use super::rules::BlockState;
use super::style::Span;

/// Per-document highlighting cache
#[derive(Debug, Clone, Default)]
pub struct HighlightCache {
    /// Outgoing state per block
    states: Vec<BlockState>,
    /// Cached spans per block (None = not computed)
    spans: Vec<Option<Vec<Span>>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks tracked
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the cache tracks no blocks
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Incoming state for a block (`Clear` for the first one)
    pub fn state_before(&self, line: usize) -> BlockState {
        line.checked_sub(1)
            .and_then(|prev| self.states.get(prev))
            .copied()
            .unwrap_or_default()
    }

    /// Outgoing state of a block, if tracked
    pub fn end_state(&self, line: usize) -> Option<BlockState> {
        self.states.get(line).copied()
    }

    /// Cached spans of a block, if computed
    pub fn spans(&self, line: usize) -> Option<&[Span]> {
        self.spans.get(line).and_then(|s| s.as_deref())
    }

    /// Invalidate cached spans from a line onwards
    pub fn invalidate_from(&mut self, line: usize) {
        tracing::trace!(line, "invalidating highlight cache");
        for slot in self.spans.iter_mut().skip(line) {
            *slot = None;
        }
    }

    /// Highlight every block top to bottom
    pub fn highlight_all<S: AsRef<str>>(&mut self, highlighter: &Highlighter, lines: &[S]) {
        self.states.clear();
        self.spans.clear();
        self.resize(lines.len());
        self.recompute_from(highlighter, lines, 0);
    }

    /// Re-highlight after the text of `line` changed.
    ///
    /// Recomputation runs forward from the edited block and stops once a
    /// block's outgoing state is unchanged and the next block is already
    /// cached. Returns the number of blocks recomputed.
    pub fn edit<S: AsRef<str>>(
        &mut self,
        highlighter: &Highlighter,
        lines: &[S],
        line: usize,
    ) -> usize {
        self.resize(lines.len());
        if line >= lines.len() {
            return 0;
        }
        // Blocks above the edit must be known before the edit can be.
        let start = self.spans[..line]
            .iter()
            .position(Option::is_none)
            .unwrap_or(line);
        self.recompute_from(highlighter, lines, start)
    }

    /// Insert `count` uncomputed blocks at `at`
    pub fn insert_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.states.len());
        self.states
            .splice(at..at, std::iter::repeat(BlockState::Clear).take(count));
        self.spans.splice(at..at, std::iter::repeat(None).take(count));
        self.invalidate_from(at);
    }

    /// Remove `count` blocks starting at `at`
    pub fn remove_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.states.len());
        let end = at.saturating_add(count).min(self.states.len());
        self.states.drain(at..end);
        self.spans.drain(at..end);
        self.invalidate_from(at);
    }

    fn resize(&mut self, line_count: usize) {
        self.states.resize(line_count, BlockState::Clear);
        self.spans.resize(line_count, None);
    }

    fn recompute_from<S: AsRef<str>>(
        &mut self,
        highlighter: &Highlighter,
        lines: &[S],
        start: usize,
    ) -> usize {
        let mut recomputed = 0;
        for (idx, text) in lines.iter().enumerate().skip(start) {
            let previous = self.spans[idx].is_some().then_some(self.states[idx]);
            let result = highlighter.highlight_block(self.state_before(idx), text.as_ref());
            self.states[idx] = result.end_state;
            self.spans[idx] = Some(result.spans);
            recomputed += 1;

            let next_cached = self.spans.get(idx + 1).is_some_and(Option::is_some);
            if previous == Some(result.end_state) && next_cached {
                break;
            }
        }
        tracing::trace!(start, recomputed, "re-highlighted blocks");
        recomputed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::StyleTag;

    fn doc() -> Vec<String> {
        ["int a;", "/* open", "inside", "close */ int b;", "int c;"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_highlight_all_threads_state() {
        let hl = Highlighter::cpp().unwrap();
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &doc());

        assert_eq!(cache.len(), 5);
        assert_eq!(cache.state_before(0), BlockState::Clear);
        assert_eq!(cache.state_before(2), BlockState::InComment);
        assert_eq!(cache.end_state(3), Some(BlockState::Clear));
        assert_eq!(cache.spans(2), Some(&[Span::new(0, 6, StyleTag::Comment)][..]));
    }

    #[test]
    fn test_edit_without_state_change_stops_early() {
        let hl = Highlighter::cpp().unwrap();
        let mut lines = doc();
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines);

        lines[0] = "long a;".to_string();
        assert_eq!(cache.edit(&hl, &lines, 0), 1);
    }

    #[test]
    fn test_edit_that_closes_comment_propagates() {
        let hl = Highlighter::cpp().unwrap();
        let mut lines = doc();
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines);

        lines[1] = "/* open */".to_string();
        let recomputed = cache.edit(&hl, &lines, 1);
        assert!(recomputed >= 3);
        assert_eq!(cache.state_before(2), BlockState::Clear);
        assert_eq!(cache.spans(2), Some(&[][..]));
        // Nothing opened, so `*/` on line 3 is plain text and `int` is a keyword.
        assert_eq!(cache.end_state(3), Some(BlockState::Clear));
        assert!(cache
            .spans(3)
            .unwrap()
            .iter()
            .all(|span| span.tag != StyleTag::Comment));
    }

    #[test]
    fn test_insert_and_remove_lines() {
        let hl = Highlighter::cpp().unwrap();
        let mut lines = doc();
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines);

        lines.insert(2, "more".to_string());
        cache.insert_lines(2, 1);
        assert_eq!(cache.len(), 6);
        assert!(cache.spans(2).is_none());
        cache.edit(&hl, &lines, 2);
        assert_eq!(cache.state_before(3), BlockState::InComment);
        assert_eq!(cache.end_state(4), Some(BlockState::Clear));

        lines.remove(1);
        cache.remove_lines(1, 1);
        cache.edit(&hl, &lines, 1);
        assert_eq!(cache.len(), 5);
        assert_eq!(cache.state_before(2), BlockState::Clear);
    }

    #[test]
    fn test_edit_past_end_is_noop() {
        let hl = Highlighter::cpp().unwrap();
        let mut cache = HighlightCache::new();
        assert_eq!(cache.edit(&hl, &["int x;"], 4), 0);
        assert!(cache.spans(0).is_none());
    }
}
