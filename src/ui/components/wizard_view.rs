//! Add-user wizard screen

use std::collections::BTreeMap;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::dialog::InstructionBar;
use super::text_input::TextInputState;
use super::Palette;
use crate::form::{AddUserWizard, DraftForm, Field, WizardStep};

/// Per-field input boxes and which one has focus
#[derive(Debug, Clone, Default)]
pub struct WizardViewState {
    inputs: BTreeMap<Field, TextInputState>,
    focus: usize,
}

impl WizardViewState {
    pub fn from_draft(draft: &DraftForm) -> Self {
        let mut state = Self::default();
        state.sync_from(draft);
        state
    }

    /// Replace every input with the draft's text, focus on the first field
    pub fn sync_from(&mut self, draft: &DraftForm) {
        self.inputs = Field::ALL
            .iter()
            .map(|f| (*f, TextInputState::with_value(draft.get(*f))))
            .collect();
        self.focus = 0;
    }

    /// Field with focus on the given step, if the step has inputs
    pub fn focused_field(&self, step: WizardStep) -> Option<Field> {
        step.fields().get(self.focus).copied()
    }

    pub fn input(&self, field: Field) -> Option<&TextInputState> {
        self.inputs.get(&field)
    }

    pub fn input_mut(&mut self, field: Field) -> &mut TextInputState {
        self.inputs.entry(field).or_default()
    }

    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Move focus forward; returns false when already on the last field
    pub fn focus_next(&mut self, step: WizardStep) -> bool {
        if self.focus + 1 < step.fields().len() {
            self.focus += 1;
            true
        } else {
            false
        }
    }

    pub fn focus_prev(&mut self) -> bool {
        if self.focus > 0 {
            self.focus -= 1;
            true
        } else {
            false
        }
    }
}

pub struct WizardView<'a> {
    wizard: &'a AddUserWizard,
    state: &'a WizardViewState,
    palette: &'a Palette,
}

impl<'a> WizardView<'a> {
    pub fn new(
        wizard: &'a AddUserWizard,
        state: &'a WizardViewState,
        palette: &'a Palette,
    ) -> Self {
        Self {
            wizard,
            state,
            palette,
        }
    }

    fn render_progress(&self, area: Rect, buf: &mut Buffer) {
        let current = self.wizard.step().number();
        let segments = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); WizardStep::COUNT])
            .spacing(1)
            .split(area);

        for (i, segment) in segments.iter().enumerate() {
            let color = if i < current {
                self.palette.accent_primary
            } else {
                self.palette.bg_skeleton
            };
            buf.set_style(*segment, Style::default().bg(color));
        }
    }

    /// Render one labelled input with its error line; returns the cursor position if focused
    fn render_field(&self, field: Field, focused: bool, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        let palette = self.palette;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        Paragraph::new(field.label())
            .style(Style::default().fg(palette.text_secondary))
            .render(rows[0], buf);

        let border = if focused {
            palette.border_focused
        } else {
            palette.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        let cursor = self.state.input(field).map(|input| {
            input.render(
                inner,
                buf,
                Style::default().fg(palette.text_primary),
                focused,
            )
        });

        if let Some(error) = self.wizard.error(field) {
            Paragraph::new(error)
                .style(Style::default().fg(palette.accent_error))
                .render(rows[2], buf);
        }

        cursor.filter(|_| focused)
    }

    fn render_review(&self, area: Rect, buf: &mut Buffer) {
        let palette = self.palette;
        let draft = self.wizard.draft();
        let lines: Vec<Line> = Field::ALL
            .iter()
            .map(|field| {
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", field.label()),
                        Style::default()
                            .fg(palette.text_secondary)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        draft.get(*field).to_string(),
                        Style::default().fg(palette.text_primary),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }

    /// Render the whole screen; returns where the terminal cursor belongs
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Option<(u16, u16)> {
        let palette = self.palette;
        let step = self.wizard.step();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Heading
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Spacer
                Constraint::Min(5),    // Card
                Constraint::Length(1), // Instructions
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(
                "Add New User",
                Style::default()
                    .fg(palette.text_bright)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Step {} of {}", step.number(), WizardStep::COUNT),
                Style::default().fg(palette.text_muted),
            ),
        ]))
        .render(chunks[0], buf);

        self.render_progress(chunks[2], buf);

        let card = Block::default()
            .title(format!(" {} ", step.title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.bg_surface));
        let inner = card.inner(chunks[4]);
        card.render(chunks[4], buf);

        let mut cursor = None;
        if step == WizardStep::Review {
            self.render_review(inner, buf);
        } else {
            let fields = step.fields();
            let slots = Layout::default()
                .direction(Direction::Vertical)
                .constraints(fields.iter().map(|_| Constraint::Length(5)))
                .split(inner);
            let focused = self.state.focused_field(step);
            for (field, slot) in fields.iter().zip(slots.iter()) {
                let pos = self.render_field(*field, focused == Some(*field), *slot, buf);
                cursor = cursor.or(pos);
            }
        }

        let hints = match step {
            WizardStep::BasicInfo => vec![("Tab", "Next field"), ("Enter", "Next"), ("Esc", "Dashboard")],
            WizardStep::AddressInfo => vec![
                ("Tab", "Next field"),
                ("Enter", "Next"),
                ("Ctrl+B", "Previous"),
                ("Esc", "Dashboard"),
            ],
            WizardStep::Review => vec![("Enter", "Submit"), ("Ctrl+B", "Previous"), ("Esc", "Dashboard")],
        };
        InstructionBar::new(hints, palette).render(chunks[5], buf);

        cursor
    }
}
