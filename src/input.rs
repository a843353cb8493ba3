//! Input handling - key translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The keystrokes the auto-closer distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keystroke {
    /// A printable character
    Char(char),
    Tab,
    Enter,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Ctrl-D / Ctrl-C: leave the prompt
    Quit,
    /// Anything else
    Other,
}

/// Translate a crossterm KeyEvent to a Keystroke
pub fn translate_key(event: KeyEvent) -> Option<Keystroke> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    // This is critical on Windows where crossterm sends all event types
    if kind != KeyEventKind::Press {
        return None;
    }

    let key = match code {
        KeyCode::Char(ch) if modifiers.contains(KeyModifiers::CONTROL) => {
            match ch.to_ascii_lowercase() {
                'c' | 'd' => Keystroke::Quit,
                'i' => Keystroke::Tab,
                'm' => Keystroke::Enter,
                _ => Keystroke::Other,
            }
        }
        KeyCode::Char(_) if modifiers.contains(KeyModifiers::ALT) => Keystroke::Other,
        KeyCode::Char(ch) => Keystroke::Char(ch),
        KeyCode::Tab => Keystroke::Tab,
        KeyCode::Enter => Keystroke::Enter,
        KeyCode::Backspace => Keystroke::Backspace,
        KeyCode::Esc => Keystroke::Escape,
        KeyCode::Up => Keystroke::Up,
        KeyCode::Down => Keystroke::Down,
        KeyCode::Left => Keystroke::Left,
        KeyCode::Right => Keystroke::Right,
        _ => Keystroke::Other,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_printable() {
        assert_eq!(
            translate_key(press(KeyCode::Char('('), KeyModifiers::NONE)),
            Some(Keystroke::Char('('))
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Keystroke::Char('A'))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            translate_key(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Keystroke::Quit)
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('i'), KeyModifiers::CONTROL)),
            Some(Keystroke::Tab)
        );
        assert_eq!(
            translate_key(press(KeyCode::Char('x'), KeyModifiers::ALT)),
            Some(Keystroke::Other)
        );
        assert_eq!(
            translate_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Keystroke::Backspace)
        );
    }

    #[test]
    fn test_release_ignored() {
        let event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(translate_key(event), None);
    }
}
