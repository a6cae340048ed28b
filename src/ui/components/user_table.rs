//! User list table with loading skeleton, error banner and empty state

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState,
        Widget, Wrap,
    },
};

use super::Palette;
use crate::data::UserRecord;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SKELETON_ROWS: u16 = 5;

/// What the table area should show
pub enum TableContent<'a> {
    Loading { spinner_frame: usize },
    Error(&'a str),
    Users {
        users: &'a [&'a UserRecord],
        /// A search term is narrowing the list
        filtered: bool,
    },
}

pub struct UserTable<'a> {
    content: TableContent<'a>,
    selected: Option<usize>,
    palette: &'a Palette,
}

impl<'a> UserTable<'a> {
    pub fn new(content: TableContent<'a>, palette: &'a Palette) -> Self {
        Self {
            content,
            selected: None,
            palette,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    fn block(&self) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.border))
            .style(Style::default().bg(self.palette.bg_surface))
    }

    fn render_skeleton(&self, spinner_frame: usize, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(palette.accent_primary)),
            Span::styled("Loading users...", Style::default().fg(palette.text_muted)),
        ]))
        .render(Rect { height: 1, ..area }, buf);

        let bar_style = Style::default().bg(palette.bg_skeleton);
        for i in 0..SKELETON_ROWS {
            let y = area.y + 2 + i * 2;
            if y >= area.y + area.height {
                break;
            }
            // Stagger widths so rows read as separate records
            let width = area.width.saturating_sub((i % 3) * 6).max(1);
            buf.set_style(Rect::new(area.x, y, width, 1), bar_style);
        }
    }

    fn render_error(&self, message: &str, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let banner = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.accent_error));
        let inner = banner.inner(Rect { height: area.height.min(3), ..area });
        banner.render(Rect { height: area.height.min(3), ..area }, buf);
        Paragraph::new(message)
            .style(Style::default().fg(palette.accent_error))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_users(&self, users: &[&UserRecord], filtered: bool, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;

        if users.is_empty() {
            let message = if filtered {
                "No users found matching your search"
            } else {
                "No users available"
            };
            Paragraph::new(message)
                .style(Style::default().fg(palette.text_muted))
                .alignment(Alignment::Center)
                .render(Rect { height: 1, ..area }, buf);
            return;
        }

        let header = Row::new(["NAME", "EMAIL", "PHONE", "CITY"].map(|h| {
            Cell::from(h).style(
                Style::default()
                    .fg(palette.text_secondary)
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .style(Style::default().bg(palette.bg_elevated));

        let rows = users.iter().map(|user| {
            Row::new(vec![
                Cell::from(user.name.as_str()).style(Style::default().fg(palette.text_bright)),
                Cell::from(user.email.as_str()),
                Cell::from(user.phone.as_str()),
                Cell::from(user.address.city.as_str()),
            ])
            .style(Style::default().fg(palette.text_secondary))
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(35),
                Constraint::Percentage(22),
                Constraint::Percentage(18),
            ],
        )
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(palette.bg_highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌");

        let mut state = TableState::default().with_selected(self.selected);
        StatefulWidget::render(table, area, buf, &mut state);
    }
}

impl Widget for UserTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        match &self.content {
            TableContent::Loading { spinner_frame } => {
                self.render_skeleton(*spinner_frame, inner, buf)
            }
            TableContent::Error(message) => self.render_error(message, inner, buf),
            TableContent::Users { users, filtered } => {
                self.render_users(users, *filtered, inner, buf)
            }
        }
    }
}
