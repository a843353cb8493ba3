//! Interactive line prompt
//!
//! Each committed line becomes a block of a growing document; the line
//! being typed is highlighted against the state the previous block left
//! behind, with auto-closing and completion hints applied as keys arrive.

use std::io;

use unicode_width::UnicodeWidthStr;

use crate::autoclose::{AutoCloser, EditBuffer, KeyOutcome};
use crate::config::Config;
use crate::error::Result;
use crate::input::{translate_key, Keystroke};
use crate::line::LineBuffer;
use crate::render::Renderer;
use crate::syntax::{BlockState, HighlightCache, Highlighter, Theme};
use crate::terminal::Terminal;

/// Prompt shown before a line, depending on the incoming state
fn prompt_for(state: BlockState) -> &'static str {
    match state {
        BlockState::Clear => "> ",
        BlockState::InComment => "* ",
    }
}

/// Completion hint text, with the selection bracketed.
///
/// Nothing is shown unless the widest match fits in `room` columns.
fn hint_text(closer: &AutoCloser, room: usize) -> Option<String> {
    let completer = closer.completer();
    if !completer.is_visible() || completer.popup_width() + 4 > room {
        return None;
    }
    let selected = completer.selected();
    let items: Vec<String> = completer
        .matches()
        .take(6)
        .map(|item| {
            if Some(item) == selected {
                format!("[{item}]")
            } else {
                item.to_string()
            }
        })
        .collect();
    Some(format!("  {}", items.join(" ")))
}

/// Run the prompt until Ctrl-D or Ctrl-C
pub fn run(highlighter: &Highlighter, theme: &Theme, config: &Config) -> Result<()> {
    let mut term = Terminal::new()?;
    let mut closer = AutoCloser::from_config(config);
    let mut cache = HighlightCache::new();
    let mut lines: Vec<String> = Vec::new();
    let mut line = LineBuffer::new();
    let mut stdout = io::stdout();

    loop {
        let state = cache.state_before(lines.len());
        let prompt = prompt_for(state);
        let width = (term.cols() as usize).saturating_sub(prompt.width());
        let renderer = Renderer::new(theme).with_max_width(Some(width));
        let result = highlighter.highlight_block(state, line.text());

        term.clear_row()?;
        term.write_dim(prompt)?;
        renderer.paint_line(&mut stdout, line.text(), &result.spans)?;
        let room = width.saturating_sub(line.display_width());
        if let Some(hint) = hint_text(&closer, room) {
            term.write_dim(&hint)?;
        }
        let col = (prompt.width() + line.cursor_col()).min(u16::MAX as usize) as u16;
        term.move_to_column(col)?;
        term.flush()?;

        let Some(key) = translate_key(term.read_key()?) else {
            continue;
        };
        if closer.handle_key(&mut line, key) == KeyOutcome::Handled {
            continue;
        }
        match key {
            Keystroke::Quit => break,
            Keystroke::Enter => {
                lines.push(line.take());
                cache.edit(highlighter, &lines, lines.len() - 1);
                term.newline()?;
            }
            Keystroke::Left => line.move_left(),
            Keystroke::Right => line.move_right(),
            _ => {}
        }
    }

    term.newline()?;
    term.flush()?;
    tracing::debug!(lines = lines.len(), "prompt closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoclose::Completer;

    #[test]
    fn test_prompt_reflects_comment_state() {
        assert_eq!(prompt_for(BlockState::Clear), "> ");
        assert_eq!(prompt_for(BlockState::InComment), "* ");
    }

    #[test]
    fn test_hint_text() {
        let mut closer = AutoCloser::new(4).with_completer(Completer::new(["cout", "const"]));
        assert_eq!(hint_text(&closer, 80), None);

        let mut line = LineBuffer::new();
        closer.handle_key(&mut line, Keystroke::Char('c'));
        closer.handle_key(&mut line, Keystroke::Char('o'));
        assert_eq!(hint_text(&closer, 80).as_deref(), Some("  [cout] const"));
    }

    #[test]
    fn test_hint_hidden_when_too_narrow() {
        let mut closer = AutoCloser::new(4).with_completer(Completer::new(["cout", "const"]));
        let mut line = LineBuffer::new();
        closer.handle_key(&mut line, Keystroke::Char('c'));
        assert_eq!(hint_text(&closer, 8), None);
        assert!(hint_text(&closer, 9).is_some());
    }
}
