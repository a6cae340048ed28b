use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Widget},
};

use super::text_input::TextInputState;
use super::Palette;

pub const SEARCH_PLACEHOLDER: &str = "Search by name or city...";

/// Bordered search box over the user table
pub struct SearchBar<'a> {
    input: &'a TextInputState,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> SearchBar<'a> {
    pub fn new(input: &'a TextInputState, focused: bool, palette: &'a Palette) -> Self {
        Self {
            input,
            focused,
            palette,
        }
    }

    /// Returns the cursor position while focused
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        let border = if self.focused {
            self.palette.border_focused
        } else {
            self.palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.palette.bg_surface));
        let inner = block.inner(area);
        block.render(area, buf);

        let icon_width = 3.min(inner.width);
        buf.set_string(inner.x, inner.y, " ⌕ ", Style::default().fg(self.palette.text_muted));
        let text_area = Rect {
            x: inner.x + icon_width,
            width: inner.width.saturating_sub(icon_width),
            ..inner
        };

        let cursor = self.input.render_with_placeholder(
            text_area,
            buf,
            Style::default().fg(self.palette.text_primary),
            SEARCH_PLACEHOLDER,
            Style::default().fg(self.palette.text_muted),
            self.focused,
        );
        self.focused.then_some(cursor)
    }
}
