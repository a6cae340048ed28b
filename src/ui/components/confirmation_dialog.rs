//! Delete confirmation dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::dialog::{DialogFrame, InstructionBar};
use super::Palette;

/// State for the delete confirmation dialog
#[derive(Debug, Clone, Default)]
pub struct ConfirmationDialogState {
    pub visible: bool,
    /// User the dialog would delete
    pub user_id: Option<i64>,
    pub user_name: String,
    /// Currently selected button (0 = Cancel, 1 = Delete)
    pub selected: usize,
}

impl ConfirmationDialogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to delete the given user; Cancel starts selected
    pub fn show(&mut self, user_id: i64, user_name: impl Into<String>) {
        self.visible = true;
        self.user_id = Some(user_id);
        self.user_name = user_name.into();
        self.selected = 0;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.user_id = None;
    }

    pub fn toggle_selection(&mut self) {
        self.selected = if self.selected == 0 { 1 } else { 0 };
    }

    pub fn is_confirm_selected(&self) -> bool {
        self.selected == 1
    }
}

/// Confirmation dialog widget
pub struct ConfirmationDialog<'a> {
    state: &'a ConfirmationDialogState,
    palette: &'a Palette,
}

impl<'a> ConfirmationDialog<'a> {
    pub fn new(state: &'a ConfirmationDialogState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }
}

impl Widget for ConfirmationDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.state.visible {
            return;
        }

        let palette = self.palette;
        let frame =
            DialogFrame::new("Delete User", 50, 9, palette).border_color(palette.accent_error);
        let inner = frame.render(area, buf);
        if inner.height < 5 {
            return;
        }

        let message = format!("Delete {}? This cannot be undone.", self.state.user_name);
        Paragraph::new(message)
            .style(Style::default().fg(palette.text_primary))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(
                Rect {
                    x: inner.x,
                    y: inner.y + 1,
                    width: inner.width,
                    height: 2,
                },
                buf,
            );

        let button = |label: &'static str, selected: bool, color| {
            let style = if selected {
                Style::default()
                    .fg(palette.bg_surface)
                    .bg(color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(color)
            };
            Span::styled(format!(" {} ", label), style)
        };

        let buttons = Line::from(vec![
            button("Cancel", !self.state.is_confirm_selected(), palette.text_secondary),
            Span::raw("    "),
            button("Delete", self.state.is_confirm_selected(), palette.accent_error),
        ]);
        Paragraph::new(buttons).alignment(Alignment::Center).render(
            Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(3),
                width: inner.width,
                height: 1,
            },
            buf,
        );

        InstructionBar::new(
            vec![("←/→", "Select"), ("Enter", "Confirm"), ("Esc", "Cancel")],
            palette,
        )
        .render(
            Rect {
                x: inner.x,
                y: inner.y + inner.height.saturating_sub(1),
                width: inner.width,
                height: 1,
            },
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_defaults_to_cancel() {
        let mut state = ConfirmationDialogState::new();
        state.show(7, "Ann Lee");

        assert!(state.visible);
        assert_eq!(state.user_id, Some(7));
        assert!(!state.is_confirm_selected());

        state.toggle_selection();
        assert!(state.is_confirm_selected());

        state.hide();
        assert!(!state.visible);
        assert_eq!(state.user_id, None);
    }

    #[test]
    fn test_renders_user_name() {
        let mut state = ConfirmationDialogState::new();
        state.show(7, "Ann Lee");
        let palette = Palette::default();
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);

        ConfirmationDialog::new(&state, &palette).render(area, &mut buf);

        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Delete Ann Lee?"));
        assert!(text.contains("Cancel"));
    }
}
