//! Rendering the app through ratatui's TestBackend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use userdeck::core::SeedError;
use userdeck::ui::{AppEvent, View};
use userdeck::{App, Config, ThemeMode};

use super::common::fixtures::{user, TestStorage};
use super::common::terminal::render_app;

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn seeded_app(env: &TestStorage) -> App {
    let mut app = App::new(&Config::default(), env.storage.clone());
    app.handle_app_event(AppEvent::SeedLoaded(Ok(vec![
        user(1, "Leanne Graham", "Gwenborough"),
        user(2, "Ervin Howell", "Wisokyburgh"),
        user(3, "Clementine Bauch", "McKenziehaven"),
    ])));
    app
}

#[test]
fn test_loading_skeleton_before_seed() {
    let env = TestStorage::new();
    let app = App::new(&Config::default(), env.storage.clone());

    let screen = render_app(&app);

    assert!(screen.contains("User Dashboard"));
    assert!(screen.contains("Loading users..."));
}

#[test]
fn test_error_banner_after_failed_seed() {
    let env = TestStorage::new();
    let mut app = App::new(&Config::default(), env.storage.clone());
    app.handle_app_event(AppEvent::SeedLoaded(Err(SeedError::Status(500))));

    let screen = render_app(&app);

    assert!(screen.contains("Could not load users"));
}

#[test]
fn test_search_filters_by_name_or_city() {
    let env = TestStorage::new();
    let mut app = seeded_app(&env);

    let screen = render_app(&app);
    assert!(screen.contains("Search by name or city..."));
    assert!(screen.contains("Leanne Graham"));
    assert!(screen.contains("Ervin Howell"));

    press(&mut app, KeyCode::Char('/'));
    for c in "wiSoky".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    let screen = render_app(&app);
    assert!(screen.contains("Ervin Howell"));
    assert!(!screen.contains("Leanne Graham"));

    for c in "zzz".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    assert!(render_app(&app).contains("No users found matching your search"));
}

#[test]
fn test_empty_seed_shows_no_users_available() {
    let env = TestStorage::new();
    let mut app = App::new(&Config::default(), env.storage.clone());
    app.handle_app_event(AppEvent::SeedLoaded(Ok(Vec::new())));

    let screen = render_app(&app);

    assert!(screen.contains("No users available"));
    assert!(!screen.contains("matching your search"));
}

#[test]
fn test_delete_dialog_and_toast() {
    let env = TestStorage::new();
    let mut app = seeded_app(&env);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('d'));
    let screen = render_app(&app);
    assert!(screen.contains("Delete Ervin Howell?"));

    press(&mut app, KeyCode::Char('y'));
    let screen = render_app(&app);
    assert!(!screen.contains("Ervin Howell"));
    assert!(screen.contains("User deleted"));
    assert_eq!(app.store().len(), 2);
}

#[test]
fn test_wizard_screen_and_escape() {
    let env = TestStorage::new();
    let mut app = seeded_app(&env);

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(app.view(), View::AddUser);
    let screen = render_app(&app);
    assert!(screen.contains("Add New User"));
    assert!(screen.contains("Step 1 of 3"));

    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    let screen = render_app(&app);
    assert!(screen.contains("name is required"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.view(), View::Dashboard);
}

#[test]
fn test_theme_persists_across_restart() {
    let env = TestStorage::new();
    let mut app = seeded_app(&env);
    assert_eq!(app.theme_mode(), ThemeMode::Light);

    press(&mut app, KeyCode::Char('t'));

    let restarted = App::new(&Config::default(), env.reopen());
    assert_eq!(restarted.theme_mode(), ThemeMode::Dark);
}
