use crate::fixtures::*;
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use taskdesk::backend::memory::{Dataset, MemoryBackend};
use taskdesk::config::Config;
use taskdesk::entities::Task;
use taskdesk::logger::Logger;
use taskdesk::ui::app_component::FocusPane;
use taskdesk::ui::core::{Action, AppContext, DialogType, NotificationLevel};
use taskdesk::ui::AppComponent;

fn dataset() -> Dataset {
    let reference = reference();

    let mut fix = fix_bug();
    fix.team_id = Some("T1".to_string());

    let mut child = Task::new("2", "Reproduce");
    child.parent_id = Some("1".to_string());

    let mut other = Task::new("3", "Ship app");
    other.team_id = Some("T2".to_string());

    Dataset {
        users: reference.users.clone(),
        teams: reference.teams.clone(),
        tags: reference.tags.clone(),
        list_statuses: reference.list_statuses.clone(),
        tasks: vec![fix, child, other],
    }
}

fn app_with(backend: Arc<MemoryBackend>) -> AppComponent {
    let mut config = Config::default();
    config.session.user_id = "U2".to_string();
    config.session.user_name = "Sam Lee".to_string();
    AppComponent::new(AppContext::new(backend, config, Logger::new()))
}

/// An app whose reference data and teams have arrived
async fn started_app(backend: Arc<MemoryBackend>) -> AppComponent {
    let mut app = app_with(backend);
    app.start();
    assert_eq!(app.active_task_count(), 2);
    assert!(app.process_next_background_action().await);
    assert!(app.process_next_background_action().await);
    app
}

fn task_ids(app: &AppComponent) -> Vec<&str> {
    app.task_list().tasks.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test]
async fn test_start_loads_tasks_and_teams() {
    let app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;

    assert!(!app.task_list().loading);
    assert_eq!(task_ids(&app), vec!["1", "3"]);
    assert_eq!(app.team_selector().teams().len(), 2);
    assert_eq!(app.context().reference.users.len(), 2);
    assert_eq!(app.focus(), FocusPane::Tasks);
}

#[tokio::test]
async fn test_team_filter_narrows_task_list() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;

    app.dispatch(Action::TeamSelected(Some("T2".to_string())));
    assert_eq!(app.selected_team(), Some("T2"));
    assert_eq!(app.team_selector().selected_team(), Some("T2"));
    assert_eq!(task_ids(&app), vec!["3"]);

    app.dispatch(Action::TeamSelected(None));
    assert_eq!(task_ids(&app), vec!["1", "3"]);
}

#[tokio::test]
async fn test_filter_pane_selects_team_with_keys() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus(), FocusPane::Filter);
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.selected_team(), Some("T1"));
    assert_eq!(task_ids(&app), vec!["1"]);
}

#[tokio::test]
async fn test_open_task_loads_subtasks() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;

    app.handle_key(key(KeyCode::Enter));
    let editor = app.modal().editor().unwrap();
    assert_eq!(editor.task_id(), "1");
    assert!(editor.subtasks_loading());

    assert!(app.process_next_background_action().await);
    let editor = app.modal().editor().unwrap();
    assert!(!editor.subtasks_loading());
    assert_eq!(editor.subtasks()[0].title, "Reproduce");
}

#[tokio::test]
async fn test_open_unknown_task_is_ignored() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;
    app.dispatch(Action::OpenTask("missing".to_string()));
    assert!(!app.modal().is_open());
}

#[tokio::test]
async fn test_submit_updates_backend_and_closes_modal() {
    let backend = Arc::new(MemoryBackend::new(dataset()));
    let mut app = started_app(Arc::clone(&backend)).await;

    app.dispatch(Action::OpenTask("1".to_string()));
    assert!(app.process_next_background_action().await);
    {
        let editor = app.modal_mut().editor_mut().unwrap();
        editor.set_title("Fix bug 2");
        editor.set_assignee(Some("U1".to_string()));
        editor.set_status(Some("S1".to_string()));
    }

    app.handle_key(ctrl('s'));
    assert!(app.modal().editor().unwrap().is_submitting());
    assert!(app.process_next_background_action().await);

    assert!(!app.modal().is_open());
    let toast = &app.notifications().items()[0];
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Task updated successfully");

    assert_eq!(app.task_list().tasks[0].title, "Fix bug 2");
    let stored = backend.dataset().await;
    let task = stored.tasks.iter().find(|t| t.id == "1").unwrap();
    assert_eq!(task.title, "Fix bug 2");
    assert_eq!(task.assigned_to.as_deref(), Some("U1"));
    assert!(stored.tasks.iter().any(|t| t.id == "2"));
}

#[tokio::test]
async fn test_failed_submit_keeps_modal_open() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;
    app.dispatch(Action::OpenTask("1".to_string()));
    app.modal_mut().editor_mut().unwrap().set_assignee(Some("U1".to_string()));
    app.modal_mut().editor_mut().unwrap().set_status(Some("S1".to_string()));
    app.modal_mut().editor_mut().unwrap().begin_submit().unwrap();

    app.dispatch(Action::TaskUpdateFailed {
        task_id: "1".to_string(),
        error: "server error".to_string(),
    });

    assert!(app.modal().is_open());
    assert!(!app.modal().editor().unwrap().is_submitting());
    let toast = &app.notifications().items()[0];
    assert_eq!(toast.level, NotificationLevel::Error);
    assert!(toast.message.contains("server error"));
}

#[tokio::test]
async fn test_keys_go_to_modal_while_open() {
    let mut app = started_app(Arc::new(MemoryBackend::new(dataset()))).await;
    app.dispatch(Action::OpenTask("1".to_string()));

    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit());
    assert_eq!(app.modal().editor().unwrap().task().title, "Fix bugq");

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.modal().is_open());
}

#[tokio::test]
async fn test_reference_failure_shows_error_dialog() {
    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));
    app.dispatch(Action::ReferenceDataFailed("connection refused".to_string()));

    match app.dialog() {
        Some(DialogType::Error(message)) => assert!(message.contains("connection refused")),
        other => panic!("expected an error dialog, got {other:?}"),
    }
    assert!(!app.task_list().loading);

    app.handle_key(key(KeyCode::Esc));
    assert!(app.dialog().is_none());
}

#[tokio::test]
async fn test_dialog_keys() {
    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));

    app.handle_key(key(KeyCode::Char('?')));
    assert_eq!(app.dialog(), Some(&DialogType::Help));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit());
    assert_eq!(app.dialog(), Some(&DialogType::Help));
    app.handle_key(key(KeyCode::Char('?')));
    assert!(app.dialog().is_none());

    app.handle_key(key(KeyCode::Char('G')));
    assert_eq!(app.dialog(), Some(&DialogType::Logs));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.dialog().is_none());
    assert!(!app.should_quit());
}

#[tokio::test]
async fn test_quit_keys() {
    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());

    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));
    app.dispatch(Action::ShowDialog(DialogType::Help));
    app.handle_key(ctrl('c'));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_reload_is_not_doubled() {
    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));
    app.handle_key(key(KeyCode::Char('r')));
    app.handle_key(key(KeyCode::Char('r')));
    assert_eq!(app.active_task_count(), 1);
    assert!(app.task_list().loading);
}

#[tokio::test]
async fn test_icon_theme_cycles() {
    let mut app = app_with(Arc::new(MemoryBackend::new(dataset())));
    let before = app.context().icons.theme();
    app.handle_key(key(KeyCode::Char('i')));
    assert_ne!(app.context().icons.theme(), before);
}
