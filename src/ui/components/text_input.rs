//! Single-line text input state with cursor management

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text input. The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    input: String,
    cursor: usize,
}

impl TextInputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial value, cursor at the end
    pub fn with_value(value: &str) -> Self {
        Self {
            input: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    /// Set the input value and move cursor to end
    pub fn set(&mut self, value: &str) {
        self.input = value.to_string();
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    /// Insert a character at cursor position
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    /// Delete character at cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Delete from cursor to start of line (Ctrl+U)
    pub fn delete_to_start(&mut self) {
        let at = self.byte_index(self.cursor);
        self.input.drain(..at);
        self.cursor = 0;
    }

    /// Delete word before cursor (Ctrl+W)
    pub fn delete_word(&mut self) {
        let chars: Vec<char> = self.input.chars().collect();
        let end = self.cursor;
        let mut start = end;
        while start > 0 && chars[start - 1] == ' ' {
            start -= 1;
        }
        while start > 0 && chars[start - 1] != ' ' {
            start -= 1;
        }
        let (from, to) = (self.byte_index(start), self.byte_index(end));
        self.input.drain(from..to);
        self.cursor = start;
    }

    /// Render the text, scrolled so the cursor stays visible.
    ///
    /// Returns the screen position of the cursor.
    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style, show_cursor: bool) -> (u16, u16) {
        self.render_with_placeholder(area, buf, style, "", style, show_cursor)
    }

    /// Render with placeholder text when empty
    pub fn render_with_placeholder(
        &self,
        area: Rect,
        buf: &mut Buffer,
        style: Style,
        placeholder: &str,
        placeholder_style: Style,
        show_cursor: bool,
    ) -> (u16, u16) {
        if area.width == 0 || area.height == 0 {
            return (area.x, area.y);
        }

        let width = area.width as usize;
        let before_cursor: String = self.input.chars().take(self.cursor).collect();
        let cursor_col = before_cursor.width();
        let skip = cursor_col.saturating_sub(width.saturating_sub(1));

        if self.input.is_empty() {
            Paragraph::new(placeholder)
                .style(placeholder_style)
                .render(area, buf);
        } else {
            let mut col = 0;
            let visible: String = self
                .input
                .chars()
                .filter(|c| {
                    let w = c.to_string().width();
                    col += w;
                    col > skip
                })
                .collect();
            Paragraph::new(visible).style(style).render(area, buf);
        }

        let cursor_x = area.x + (cursor_col - skip).min(width - 1) as u16;
        if show_cursor {
            buf[(cursor_x, area.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        (cursor_x, area.y)
    }
}
