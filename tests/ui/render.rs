use crate::fixtures::*;
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;
use taskdesk::backend::memory::MemoryBackend;
use taskdesk::config::Config;
use taskdesk::logger::Logger;
use taskdesk::ui::core::{Action, AppContext, Component, DialogType};
use taskdesk::ui::AppComponent;

fn draw(app: &mut AppComponent, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            app.render(f, area);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut screen = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            screen.push_str(buffer[(x, y)].symbol());
        }
        screen.push('\n');
    }
    screen
}

async fn started_app(logger: Logger) -> AppComponent {
    let mut app = AppComponent::new(AppContext::new(
        Arc::new(MemoryBackend::default()),
        Config::default(),
        logger,
    ));
    app.start();
    app.process_next_background_action().await;
    app.process_next_background_action().await;
    app
}

#[tokio::test]
async fn test_main_screen_lists_tasks_and_teams() {
    let mut app = started_app(Logger::new()).await;
    let screen = draw(&mut app, 120, 30);

    assert!(screen.contains("Teams"));
    assert!(screen.contains("Select Team"));
    assert!(screen.contains("Platform"));
    assert!(screen.contains("Fix login redirect loop"));
    assert!(screen.contains("Write release notes"));
    // Subtasks are not listed at the top level
    assert!(!screen.contains("Add regression test"));
}

#[tokio::test]
async fn test_modal_shows_tabs_and_fields() {
    let mut app = started_app(Logger::new()).await;
    app.dispatch(Action::OpenTask("1".to_string()));
    app.process_next_background_action().await;
    let screen = draw(&mut app, 140, 50);

    assert!(screen.contains("Edit Task #1"));
    assert!(screen.contains("Details"));
    assert!(screen.contains("Subtasks (2)"));
    assert!(screen.contains("Comments (0)"));
    assert!(screen.contains("Attachments (0)"));
    assert!(screen.contains("Fix login redirect loop"));
    assert!(screen.contains("Assignee"));
}

#[tokio::test]
async fn test_validation_errors_are_drawn() {
    let mut app = started_app(Logger::new()).await;
    app.dispatch(Action::OpenTask("5".to_string()));
    app.handle_key(ctrl('s'));
    let screen = draw(&mut app, 140, 50);

    assert!(screen.contains("Assignee is required"));
}

#[tokio::test]
async fn test_every_tab_renders() {
    let mut app = started_app(Logger::new()).await;
    app.dispatch(Action::OpenTask("1".to_string()));
    app.process_next_background_action().await;

    app.handle_key(key(KeyCode::PageDown));
    assert!(draw(&mut app, 140, 50).contains("Reproduce with expired cookie"));

    app.handle_key(key(KeyCode::PageDown));
    draw(&mut app, 140, 50);

    app.handle_key(key(KeyCode::PageDown));
    draw(&mut app, 140, 50);
}

#[tokio::test]
async fn test_help_and_logs_dialogs() {
    let logger = Logger::new();
    logger.log("[INFO] something happened".to_string());
    let mut app = started_app(logger).await;

    app.dispatch(Action::ShowDialog(DialogType::Help));
    assert!(draw(&mut app, 120, 40).contains("Help - Press"));

    app.dispatch(Action::ShowDialog(DialogType::Logs));
    assert!(draw(&mut app, 120, 40).contains("something happened"));

    app.dispatch(Action::ShowDialog(DialogType::Error("disk on fire".to_string())));
    assert!(draw(&mut app, 120, 40).contains("disk on fire"));
}

#[tokio::test]
async fn test_tiny_terminal_does_not_panic() {
    let mut app = started_app(Logger::new()).await;
    draw(&mut app, 10, 4);
    app.dispatch(Action::OpenTask("1".to_string()));
    draw(&mut app, 10, 4);
    app.dispatch(Action::ShowDialog(DialogType::Help));
    draw(&mut app, 10, 4);
}
