//! Bottom-right stack of toast notifications

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::Palette;
use crate::core::{ToastKind, Toasts};

const TOAST_HEIGHT: u16 = 3;
const MAX_TOAST_WIDTH: u16 = 48;

pub struct ToastStack<'a> {
    toasts: &'a Toasts,
    palette: &'a Palette,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a Toasts, palette: &'a Palette) -> Self {
        Self { toasts, palette }
    }
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Newest at the bottom, stacking upward
        let mut bottom = area.y + area.height;
        for toast in self.toasts.visible().collect::<Vec<_>>().into_iter().rev() {
            if bottom < area.y + TOAST_HEIGHT {
                break;
            }
            let width = (toast.message.width() as u16 + 4)
                .min(MAX_TOAST_WIDTH)
                .min(area.width);
            let rect = Rect {
                x: area.x + area.width.saturating_sub(width + 1),
                y: bottom - TOAST_HEIGHT,
                width,
                height: TOAST_HEIGHT,
            };
            bottom -= TOAST_HEIGHT;

            let bg = match toast.kind {
                ToastKind::Success => self.palette.accent_success,
                ToastKind::Failure => self.palette.accent_error,
            };
            Clear.render(rect, buf);
            Paragraph::new(vec![
                Line::raw(""),
                Line::raw(format!("  {}", toast.message)),
            ])
            .style(
                Style::default()
                    .bg(bg)
                    .fg(ratatui::style::Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .render(rect, buf);
        }
    }
}
