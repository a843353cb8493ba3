//! Terminal rendering of highlighted text

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::syntax::{resolve, BlockState, Color, Highlighter, Span, Style, Theme};

/// Paints highlighted blocks with crossterm styling
pub struct Renderer<'a> {
    theme: &'a Theme,
    line_numbers: bool,
    max_width: Option<usize>,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            line_numbers: false,
            max_width: None,
        }
    }

    /// Builder: prefix each line with its number
    pub fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Builder: clip text to this many display columns
    pub fn with_max_width(mut self, width: Option<usize>) -> Self {
        self.max_width = width;
        self
    }

    /// Paint one block given its layered spans (no trailing newline)
    pub fn paint_line<W: Write>(&self, out: &mut W, text: &str, spans: &[Span]) -> Result<()> {
        let text = match self.max_width {
            Some(width) => &text[..clip_at(text, width)],
            None => text,
        };

        let mut pos = 0;
        for run in resolve(text.len(), spans) {
            if run.start > pos {
                queue!(out, Print(&text[pos..run.start]))?;
            }
            paint_styled(out, &text[run.start..run.end()], self.theme.style(run.tag))?;
            pos = run.end();
        }
        if pos < text.len() {
            queue!(out, Print(&text[pos..]))?;
        }
        Ok(())
    }

    /// Highlight and paint a whole document, one line per block
    pub fn paint_document<W: Write>(
        &self,
        out: &mut W,
        highlighter: &Highlighter,
        text: &str,
    ) -> Result<()> {
        let line_count = text.lines().count();
        let digits = line_count.max(1).to_string().len();
        let mut state = BlockState::Clear;

        for (idx, line) in text.lines().enumerate() {
            let result = highlighter.highlight_block(state, line);
            state = result.end_state;

            if self.line_numbers {
                queue!(
                    out,
                    SetAttribute(Attribute::Dim),
                    Print(format!("{:>digits$} ", idx + 1)),
                    SetAttribute(Attribute::NormalIntensity)
                )?;
            }
            self.paint_line(out, line, &result.spans)?;
            queue!(out, Print("\n"))?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Write each block's resolved spans as `line: start+len Tag`
pub fn dump_spans<W: Write>(out: &mut W, highlighter: &Highlighter, text: &str) -> Result<()> {
    let mut state = BlockState::Clear;
    for (idx, line) in text.lines().enumerate() {
        let result = highlighter.highlight_block(state, line);
        state = result.end_state;
        for span in resolve(line.len(), &result.spans) {
            writeln!(out, "{}: {}+{} {}", idx + 1, span.start, span.len, span.tag)?;
        }
        if state.is_in_comment() {
            writeln!(out, "{}: open comment", idx + 1)?;
        }
    }
    Ok(())
}

fn paint_styled<W: Write>(out: &mut W, text: &str, style: Style) -> Result<()> {
    if let Some(color) = term_color(style.fg) {
        queue!(out, SetForegroundColor(color))?;
    }
    if let Some(color) = term_color(style.bg) {
        queue!(out, SetBackgroundColor(color))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Default => None,
        Color::Rgb(r, g, b) => Some(TermColor::Rgb { r, g, b }),
    }
}

/// Byte offset where `text` exceeds `width` display columns
fn clip_at(text: &str, width: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in text.char_indices() {
        col += ch.width().unwrap_or(0);
        if col > width {
            return idx;
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_escapes(bytes: &[u8]) -> String {
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let mut plain = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                // CSI sequences end with an ASCII letter
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                plain.push(ch);
            }
        }
        plain
    }

    #[test]
    fn test_paint_document_preserves_text() {
        let hl = Highlighter::cpp().unwrap();
        let theme = Theme::default();
        let mut out = Vec::new();
        let source = "int main() {\n  /* hi */ return 0;\n}\n";
        Renderer::new(&theme).paint_document(&mut out, &hl, source).unwrap();

        assert!(out.contains(&0x1b));
        assert_eq!(strip_escapes(&out), source);
    }

    #[test]
    fn test_line_numbers() {
        let hl = Highlighter::cpp().unwrap();
        let theme = Theme::default();
        let mut out = Vec::new();
        let source = (1..=10).map(|_| "x\n").collect::<String>();
        Renderer::new(&theme)
            .with_line_numbers(true)
            .paint_document(&mut out, &hl, &source)
            .unwrap();

        let plain = strip_escapes(&out);
        assert!(plain.starts_with(" 1 x\n"));
        assert!(plain.ends_with("10 x\n"));
    }

    #[test]
    fn test_clip_at() {
        assert_eq!(clip_at("hello", 3), 3);
        assert_eq!(clip_at("hello", 10), 5);
        assert_eq!(clip_at("你好", 3), 3);
    }

    #[test]
    fn test_clipped_paint() {
        let theme = Theme::default();
        let hl = Highlighter::cpp().unwrap();
        let result = hl.highlight_block(BlockState::Clear, "return 12345;");
        let mut out = Vec::new();
        Renderer::new(&theme)
            .with_max_width(Some(9))
            .paint_line(&mut out, "return 12345;", &result.spans)
            .unwrap();
        assert_eq!(strip_escapes(&out), "return 12");
    }

    #[test]
    fn test_dump_spans() {
        let hl = Highlighter::cpp().unwrap();
        let mut out = Vec::new();
        dump_spans(&mut out, &hl, "int x; /* a\nb */").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1: 0+3 Keyword\n1: 7+4 Comment\n1: open comment\n2: 0+4 Comment\n"
        );
    }
}
