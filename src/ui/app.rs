use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::core::{Bootstrap, SeedSource, ThemeMode, ThemePreference, Toasts, UserStore};
use crate::data::{StateStorage, UserRecord};
use crate::form::{AddUserWizard, Field, SubmitError, WizardStep};
use crate::ui::components::{
    ConfirmationDialog, ConfirmationDialogState, InstructionBar, Palette, SearchBar,
    TableContent, TextInputState, ToastStack, UserTable, WizardView, WizardViewState,
};
use crate::ui::events::{AppEvent, View};
use crate::ui::terminal_guard::TerminalGuard;

const TICK_RATE: Duration = Duration::from_millis(100);
const DELETED_MESSAGE: &str = "User deleted";

/// Main application state
pub struct App {
    storage: Arc<dyn StateStorage>,
    store: UserStore,
    wizard: AddUserWizard,
    wizard_view: WizardViewState,
    toasts: Toasts,
    theme: ThemePreference,
    view: View,
    /// Dashboard search box
    search: TextInputState,
    search_focused: bool,
    /// Row selected in the filtered table
    selected: usize,
    confirm: ConfirmationDialogState,
    should_quit: bool,
    /// Tick counter for the loading spinner
    tick_count: usize,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: &Config, storage: Arc<dyn StateStorage>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let wizard = AddUserWizard::load(storage.clone());
        let wizard_view = WizardViewState::from_draft(wizard.draft());

        Self {
            store: UserStore::new(storage.clone()),
            theme: ThemePreference::load(storage.clone(), config.default_theme),
            toasts: Toasts::new(config.toasts.duration, config.toasts.max_visible),
            storage,
            wizard,
            wizard_view,
            view: View::Dashboard,
            search: TextInputState::new(),
            search_focused: false,
            selected: 0,
            confirm: ConfirmationDialogState::new(),
            should_quit: false,
            tick_count: 0,
            event_tx,
            event_rx,
        }
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn wizard(&self) -> &AddUserWizard {
        &self.wizard
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Restore saved users, or start the seed fetch in the background.
    ///
    /// Must be called inside a tokio runtime.
    pub fn bootstrap(&mut self, seed: Arc<dyn SeedSource>) {
        if self.store.restore() == Bootstrap::NeedsSeed {
            let event_tx = self.event_tx.clone();
            tokio::spawn(async move {
                let result = seed.fetch().await;
                if event_tx.send(AppEvent::SeedLoaded(result)).is_err() {
                    tracing::debug!("Seed result dropped, app already closed");
                }
            });
        }
    }

    /// Wait for the next background event and apply it
    pub async fn next_app_event(&mut self) -> bool {
        match self.event_rx.recv().await {
            Some(event) => {
                self.handle_app_event(event);
                true
            }
            None => false,
        }
    }

    /// Run the application main loop
    pub async fn run(&mut self, seed: Arc<dyn SeedSource>) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard::new();
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        self.bootstrap(seed);
        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut input = EventStream::new();
        let mut ticker = tokio::time::interval(TICK_RATE);

        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                maybe_event = input.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = ticker.tick() => self.tick(Instant::now()),
                Some(event) = self.event_rx.recv() => self.handle_app_event(event),
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance animations and expire toasts
    pub fn tick(&mut self, now: Instant) {
        self.tick_count = self.tick_count.wrapping_add(1);
        self.toasts.prune(now);
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SeedLoaded(result) => {
                self.store.apply_seed(result);
                self.clamp_selection();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.view {
            View::Dashboard if self.confirm.visible => self.handle_confirm_key(key),
            View::Dashboard if self.search_focused => self.handle_search_key(key),
            View::Dashboard => self.handle_dashboard_key(key),
            View::AddUser => self.handle_wizard_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('a') => self.open_wizard(),
            KeyCode::Char('t') => {
                let mode = self.theme.toggle();
                tracing::debug!(theme = %mode, "Theme toggled");
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(user) = self.selected_user() {
                    let (id, name) = (user.id, user.name.clone());
                    self.confirm.show(id, name);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => self.search_focused = false,
            KeyCode::Backspace => self.search.delete_char(),
            KeyCode::Delete => self.search.delete_forward(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_start(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.delete_to_start()
            }
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.delete_word()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.insert_char(c)
            }
            _ => return,
        }
        self.selected = 0;
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.confirm.toggle_selection()
            }
            KeyCode::Char('y') => self.confirm_delete(),
            KeyCode::Enter if self.confirm.is_confirm_selected() => self.confirm_delete(),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n') => self.confirm.hide(),
            _ => {}
        }
    }

    fn confirm_delete(&mut self) {
        if let Some(id) = self.confirm.user_id {
            if self.store.delete(id) {
                self.toasts.success(DELETED_MESSAGE);
            }
        }
        self.confirm.hide();
        self.clamp_selection();
    }

    fn open_wizard(&mut self) {
        self.wizard = AddUserWizard::load(self.storage.clone());
        self.wizard_view.sync_from(self.wizard.draft());
        self.view = View::AddUser;
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.view = View::Dashboard;
                return;
            }
            KeyCode::Char('b') if ctrl => {
                if self.wizard.back() {
                    self.wizard_view.reset_focus();
                }
                return;
            }
            _ => {}
        }

        let step = self.wizard.step();
        if step == WizardStep::Review {
            if key.code == KeyCode::Enter {
                self.submit_wizard();
            }
            return;
        }

        let Some(field) = self.wizard_view.focused_field(step) else {
            return;
        };

        match key.code {
            KeyCode::Tab => {
                self.wizard.blur(field);
                self.wizard_view.focus_next(step);
            }
            KeyCode::BackTab => {
                self.wizard.blur(field);
                self.wizard_view.focus_prev();
            }
            KeyCode::Enter => {
                self.wizard.blur(field);
                if !self.wizard_view.focus_next(step) {
                    if self.wizard.next() {
                        self.wizard_view.reset_focus();
                    } else {
                        self.focus_first_error(step);
                    }
                }
            }
            KeyCode::Left => self.wizard_view.input_mut(field).move_left(),
            KeyCode::Right => self.wizard_view.input_mut(field).move_right(),
            KeyCode::Home => self.wizard_view.input_mut(field).move_start(),
            KeyCode::End => self.wizard_view.input_mut(field).move_end(),
            KeyCode::Backspace => self.edit_field(field, TextInputState::delete_char),
            KeyCode::Delete => self.edit_field(field, TextInputState::delete_forward),
            KeyCode::Char('u') if ctrl => self.edit_field(field, TextInputState::delete_to_start),
            KeyCode::Char('w') if ctrl => self.edit_field(field, TextInputState::delete_word),
            KeyCode::Char(c) if !ctrl => self.edit_field(field, |input| input.insert_char(c)),
            _ => {}
        }
    }

    fn edit_field(&mut self, field: Field, edit: impl FnOnce(&mut TextInputState)) {
        let input = self.wizard_view.input_mut(field);
        edit(input);
        let value = input.value().to_string();
        self.wizard.update_field(field, value);
    }

    fn focus_first_error(&mut self, step: WizardStep) {
        self.wizard_view.reset_focus();
        while let Some(field) = self.wizard_view.focused_field(step) {
            if self.wizard.error(field).is_some() || !self.wizard_view.focus_next(step) {
                break;
            }
        }
    }

    fn submit_wizard(&mut self) {
        match self.wizard.submit(&mut self.store, &mut self.toasts) {
            Ok(_) => {
                self.wizard_view.sync_from(self.wizard.draft());
                self.view = View::Dashboard;
            }
            Err(SubmitError::Store(_)) => {}
            Err(e) => tracing::debug!(error = %e, "Submit blocked"),
        }
    }

    fn filtered_users(&self) -> Vec<&UserRecord> {
        self.store.search(self.search.value())
    }

    fn selected_user(&self) -> Option<&UserRecord> {
        self.filtered_users().get(self.selected).copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_users().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Draw the current view
    pub fn draw(&self, f: &mut Frame) {
        let palette = Palette::for_mode(self.theme.mode());
        let area = f.area();
        f.render_widget(Block::default().style(Style::default().bg(palette.bg_base)), area);

        let cursor = match self.view {
            View::Dashboard => self.draw_dashboard(f, area, &palette),
            View::AddUser => {
                let inner = inset(area, 2, 1);
                WizardView::new(&self.wizard, &self.wizard_view, &palette)
                    .render(inner, f.buffer_mut())
            }
        };

        f.render_widget(ToastStack::new(&self.toasts, &palette), inset(area, 1, 1));

        if let Some(pos) = cursor {
            f.set_cursor_position(pos);
        }
    }

    fn draw_dashboard(&self, f: &mut Frame, area: Rect, palette: &Palette) -> Option<(u16, u16)> {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Spacer
                Constraint::Length(3), // Search
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Footer
            ])
            .split(inset(area, 2, 1));

        let count = if self.store.is_loading() {
            String::new()
        } else {
            format!("{} users  ", self.store.len())
        };
        let title = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(24)])
            .split(chunks[0]);
        f.render_widget(
            Paragraph::new(Span::styled(
                "User Dashboard",
                Style::default()
                    .fg(palette.text_bright)
                    .add_modifier(Modifier::BOLD),
            )),
            title[0],
        );
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(count, Style::default().fg(palette.text_muted)),
                Span::styled(
                    self.theme.mode().as_str(),
                    Style::default().fg(palette.accent_primary),
                ),
            ]))
            .alignment(Alignment::Right),
            title[1],
        );

        let cursor = SearchBar::new(&self.search, self.search_focused, palette)
            .render(chunks[2], f.buffer_mut());

        let users = self.filtered_users();
        let content = if self.store.is_loading() {
            TableContent::Loading {
                spinner_frame: self.tick_count,
            }
        } else {
            match self.store.error() {
                Some(message) if self.store.is_empty() => TableContent::Error(message),
                _ => TableContent::Users {
                    users: &users,
                    filtered: !self.search.value().is_empty(),
                },
            }
        };
        let selected = (!users.is_empty()).then_some(self.selected);
        f.render_widget(
            UserTable::new(content, palette).selected(selected),
            chunks[3],
        );

        let hints = if self.search_focused {
            vec![("Type", "Filter"), ("Enter/Esc", "Done")]
        } else {
            vec![
                ("/", "Search"),
                ("a", "Add user"),
                ("d", "Delete"),
                ("↑/↓", "Select"),
                ("t", "Theme"),
                ("q", "Quit"),
            ]
        };
        InstructionBar::new(hints, palette)
            .alignment(Alignment::Left)
            .render(chunks[4], f.buffer_mut());

        f.render_widget(ConfirmationDialog::new(&self.confirm, palette), area);

        cursor.filter(|_| !self.confirm.visible)
    }
}

fn inset(area: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect {
        x: area.x + horizontal.min(area.width / 2),
        y: area.y + vertical.min(area.height / 2),
        width: area.width.saturating_sub(horizontal * 2),
        height: area.height.saturating_sub(vertical * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AppStateStore, Database};
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("test.db")).unwrap();
        let storage: Arc<dyn StateStorage> = Arc::new(AppStateStore::new(db.connection()));
        let mut app = App::new(&Config::default(), storage);
        app.handle_app_event(AppEvent::SeedLoaded(Ok(Vec::new())));
        (app, dir)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _dir) = test_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());

        let (mut app, _dir) = test_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_search_swallows_command_keys() {
        let (mut app, _dir) = test_app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "qa");

        assert!(!app.should_quit());
        assert_eq!(app.view(), View::Dashboard);
        assert_eq!(app.search.value(), "qa");
    }

    #[test]
    fn test_wizard_rejects_invalid_email() {
        let (mut app, _dir) = test_app();
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.view(), View::AddUser);

        type_text(&mut app, "Ann Lee");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "not-an-email");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.wizard().step(), WizardStep::BasicInfo);
        assert!(app.wizard().error(Field::Email).is_some());
    }

    #[test]
    fn test_delete_flow() {
        let (mut app, _dir) = test_app();
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Ann Lee");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "ann@example.com");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "123 Main Street");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Springfield");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "12345");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.view(), View::Dashboard);
        assert_eq!(app.store().len(), 1);

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.store().len(), 1, "Cancel is selected by default");

        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.store().is_empty());
        assert!(app.toasts().visible().any(|t| t.message == DELETED_MESSAGE));
    }

    #[test]
    fn test_toggle_theme() {
        let (mut app, _dir) = test_app();
        let before = app.theme_mode();
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme_mode(), before.toggled());
    }
}
