//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};

use crate::error::Result;

/// Raw-mode terminal for the interactive prompt; restores the terminal on drop
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
}

impl Terminal {
    /// Enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, _) = terminal::size()?;
        Ok(Self { cols })
    }

    /// Get terminal width
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Start redrawing the current row
    pub fn clear_row(&mut self) -> Result<()> {
        queue!(
            io::stdout(),
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::UntilNewLine)
        )?;
        Ok(())
    }

    /// Write dimmed text (completion hints)
    pub fn write_dim(&mut self, s: &str) -> Result<()> {
        queue!(
            io::stdout(),
            SetAttribute(Attribute::Dim),
            Print(s),
            SetAttribute(Attribute::NormalIntensity)
        )?;
        Ok(())
    }

    /// Move the cursor to a column of the current row
    pub fn move_to_column(&mut self, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveToColumn(col))?;
        Ok(())
    }

    /// Finish the current row and start a new one
    pub fn newline(&mut self) -> Result<()> {
        queue!(io::stdout(), Print("\r\n"))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    /// Read a key event (blocking)
    pub fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(key_event),
                Event::Resize(cols, _) => {
                    self.cols = cols;
                }
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
