use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line filename input with a character-offset cursor.
///
/// No validation is performed on the content; whatever string is entered is
/// handed to the file-write step unmodified.
#[derive(Debug, Default)]
pub struct FilenamePrompt {
    content: String,
    cursor: usize,
    focused: bool,
}

fn byte_idx(content: &str, cursor: usize) -> usize {
    content
        .char_indices()
        .nth(cursor)
        .map(|(i, _)| i)
        .unwrap_or(content.len())
}

impl FilenamePrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn insert_char(&mut self, ch: char) {
        // Single-line input: line breaks can't be typed into a filename
        if ch == '\n' || ch == '\r' {
            return;
        }
        let idx = byte_idx(&self.content, self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let idx = byte_idx(&self.content, self.cursor - 1);
            self.content.remove(idx);
            self.cursor -= 1;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let idx = byte_idx(&self.content, self.cursor);
            self.content.remove(idx);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.insert_char(c);
                }
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.content.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.content.chars().count(),
            _ => {}
        }
    }
}
