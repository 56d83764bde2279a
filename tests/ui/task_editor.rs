use crate::fixtures::*;
use chrono::{Duration, NaiveDate, Utc};
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use taskdesk::entities::{Attachment, Priority, Task};
use taskdesk::ui::components::task_modal::{FormField, ListFocus, Tab, TaskEditor};
use taskdesk::ui::core::{Action, NotificationLevel};
use taskdesk::utils::datetime::today;

#[test]
fn test_open_starts_on_details_title() {
    let editor = editor();
    assert_eq!(editor.tab(), Tab::Details);
    assert_eq!(editor.focus(), FormField::Title);
    assert!(editor.subtasks_loading());
    assert!(editor.errors().is_empty());
    assert!(!editor.is_submitting());
}

#[test]
fn test_empty_title_submit_is_rejected() {
    let mut editor = valid_editor();
    editor.set_title("   ");

    assert!(editor.begin_submit().is_none());
    assert_eq!(editor.errors().get(FormField::Title), Some("Title is required"));
    assert_eq!(editor.errors().len(), 1);
    assert!(!editor.is_submitting());
}

#[test]
fn test_missing_assignee_submit_is_rejected() {
    let mut editor = editor();
    editor.set_status(Some("S1".to_string()));

    assert!(editor.begin_submit().is_none());
    assert_eq!(editor.errors().get(FormField::Assignee), Some("Assignee is required"));
    assert_eq!(editor.errors().get(FormField::Title), None);
}

#[test]
fn test_missing_status_submit_is_rejected() {
    let mut editor = editor();
    editor.set_assignee(Some("U1".to_string()));

    assert!(editor.begin_submit().is_none());
    assert_eq!(editor.errors().get(FormField::Status), Some("Status is required"));
}

#[test]
fn test_failed_validation_jumps_to_first_bad_field() {
    let mut editor = editor();
    editor.set_tab(Tab::Comments);

    assert!(editor.begin_submit().is_none());
    assert_eq!(editor.tab(), Tab::Details);
    assert_eq!(editor.focus(), FormField::Assignee);
}

#[test]
fn test_editing_a_field_clears_its_error() {
    let mut editor = editor();
    editor.begin_submit();
    assert!(editor.errors().get(FormField::Assignee).is_some());

    editor.set_assignee(Some("U2".to_string()));
    assert!(editor.errors().get(FormField::Assignee).is_none());
    assert!(editor.errors().get(FormField::Status).is_some());
}

#[test]
fn test_submit_scenario_produces_one_snapshot() {
    let mut editor = editor();
    editor.set_title("Fix bug 2");
    editor.set_assignee(Some("U1".to_string()));
    editor.set_status(Some("S1".to_string()));

    let snapshot = editor.begin_submit().unwrap();
    assert_eq!(snapshot.task.id, "1");
    assert_eq!(snapshot.task.title, "Fix bug 2");
    assert_eq!(snapshot.task.assigned_to.as_deref(), Some("U1"));
    assert_eq!(snapshot.task.list_status_id.as_deref(), Some("S1"));
    assert_eq!(snapshot.task.list_status.as_deref(), Some("To Do"));
    assert!(snapshot.task.tags.is_empty());
    assert!(snapshot.subtasks.is_empty());

    // A second submit while the first is in flight is ignored
    assert!(editor.is_submitting());
    assert!(editor.begin_submit().is_none());
}

#[test]
fn test_submit_failure_allows_retry() {
    let mut editor = valid_editor();
    assert!(editor.begin_submit().is_some());
    editor.submit_failed();
    assert!(!editor.is_submitting());
    assert!(editor.begin_submit().is_some());
}

#[test]
fn test_ctrl_s_emits_submit_action() {
    let mut editor = valid_editor();
    match editor.handle_key_events(ctrl('s')) {
        Action::SubmitTask(snapshot) => assert_eq!(snapshot.task.title, "Fix bug"),
        other => panic!("expected SubmitTask, got {other:?}"),
    }
    assert!(matches!(editor.handle_key_events(ctrl('s')), Action::None));
}

#[test]
fn test_ctrl_s_with_invalid_form_emits_nothing() {
    let mut editor = editor();
    assert!(matches!(editor.handle_key_events(ctrl('s')), Action::None));
    assert_eq!(editor.errors().len(), 2);
}

#[test]
fn test_escape_closes() {
    let mut editor = editor();
    assert!(matches!(editor.handle_key_events(key(KeyCode::Esc)), Action::CloseTaskModal));
}

#[test]
fn test_typing_edits_title() {
    let mut editor = editor();
    type_text(&mut editor, " 2");
    assert_eq!(editor.task().title, "Fix bug 2");

    editor.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(editor.task().title, "Fix bug ");
}

#[test]
fn test_tab_key_moves_focus_through_fields() {
    let mut editor = editor();
    for expected in &FormField::DETAILS[1..] {
        editor.handle_key_events(key(KeyCode::Tab));
        assert_eq!(editor.focus(), *expected);
    }
    editor.handle_key_events(key(KeyCode::Tab));
    assert_eq!(editor.focus(), FormField::Title);

    editor.handle_key_events(key(KeyCode::BackTab));
    assert_eq!(editor.focus(), FormField::Tags);
}

#[test]
fn test_page_keys_switch_tabs() {
    let mut editor = editor();
    editor.handle_key_events(key(KeyCode::PageDown));
    assert_eq!(editor.tab(), Tab::Subtasks);
    editor.handle_key_events(key(KeyCode::PageUp));
    editor.handle_key_events(key(KeyCode::PageUp));
    assert_eq!(editor.tab(), Tab::Attachments);
}

#[test]
fn test_tab_switch_keeps_edits() {
    let mut editor = editor();
    editor.set_title("Kept");
    editor.set_tab(Tab::Comments);
    editor.set_comment_input("draft");
    editor.set_tab(Tab::Details);
    editor.set_tab(Tab::Comments);
    assert_eq!(editor.task().title, "Kept");
    assert_eq!(editor.comment_input(), "draft");
}

#[test]
fn test_select_fields_cycle_through_reference_data() {
    let mut editor = editor();

    editor.set_focus(FormField::Assignee);
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().assigned_to.as_deref(), Some("U1"));
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().assigned_to.as_deref(), Some("U2"));
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().assigned_to, None);
    editor.handle_key_events(key(KeyCode::Left));
    assert_eq!(editor.task().assigned_to.as_deref(), Some("U2"));

    editor.set_focus(FormField::Team);
    editor.handle_key_events(key(KeyCode::Left));
    assert_eq!(editor.task().team_id.as_deref(), Some("T2"));

    editor.set_focus(FormField::Status);
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().list_status_id.as_deref(), Some("S1"));
    assert_eq!(editor.task().list_status.as_deref(), Some("To Do"));

    editor.set_focus(FormField::Priority);
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().priority, Priority::High);
}

#[test]
fn test_date_fields_step_and_clear() {
    let mut editor = editor();
    editor.set_focus(FormField::DueDate);

    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().due_date, Some(today() + Duration::days(1)));

    editor.set_due_date(NaiveDate::from_ymd_opt(2025, 12, 31));
    editor.handle_key_events(key(KeyCode::Right));
    assert_eq!(editor.task().due_date, NaiveDate::from_ymd_opt(2026, 1, 1));

    editor.handle_key_events(key(KeyCode::Char('t')));
    assert_eq!(editor.task().due_date, Some(today()));

    editor.handle_key_events(key(KeyCode::Delete));
    assert_eq!(editor.task().due_date, None);

    editor.set_focus(FormField::StartDate);
    editor.handle_key_events(key(KeyCode::Left));
    assert_eq!(editor.task().start_date, Some(today() - Duration::days(1)));
}

#[test]
fn test_estimate_accepts_digits_only() {
    let mut editor = editor();
    editor.set_focus(FormField::Estimate);
    type_text(&mut editor, "9x0");
    assert_eq!(editor.task().time_estimation, Some(90));

    editor.handle_key_events(key(KeyCode::Backspace));
    editor.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(editor.task().time_estimation, None);
}

#[test]
fn test_estimate_overflow_is_refused() {
    let mut editor = editor();
    editor.set_focus(FormField::Estimate);
    type_text(&mut editor, "99999999999");
    assert_eq!(editor.task().time_estimation, Some(999_999_999));
}

#[test]
fn test_add_tag_ignores_duplicates_and_unknown_ids() {
    let mut editor = editor();
    assert!(editor.add_tag("G1"));
    assert!(!editor.add_tag("G1"));
    assert!(!editor.add_tag("nope"));
    assert_eq!(editor.selected_tag_ids(), vec!["G1"]);

    let available: Vec<&str> = editor.available_tags().into_iter().map(|t| t.id.as_str()).collect();
    assert_eq!(available, vec!["G2", "G3"]);
}

#[test]
fn test_remove_tag() {
    let mut editor = editor();
    editor.add_tag("G1");
    editor.add_tag("G2");
    editor.add_tag("G3");

    assert!(!editor.remove_tag("G9"));
    assert_eq!(editor.selected_tag_ids(), vec!["G1", "G2", "G3"]);

    assert!(editor.remove_tag("G2"));
    assert_eq!(editor.selected_tag_ids(), vec!["G1", "G3"]);
}

#[test]
fn test_tag_keys() {
    let mut editor = editor();
    editor.set_focus(FormField::Tags);
    assert_eq!(editor.tag_candidate().map(|t| t.id.as_str()), Some("G1"));

    editor.handle_key_events(key(KeyCode::Right));
    editor.handle_key_events(key(KeyCode::Enter));
    assert_eq!(editor.selected_tag_ids(), vec!["G2"]);

    editor.handle_key_events(key(KeyCode::Enter));
    assert_eq!(editor.selected_tag_ids().len(), 2);

    editor.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(editor.selected_tag_ids(), vec!["G2"]);
}

#[test]
fn test_whitespace_comment_is_ignored() {
    let mut editor = editor();
    editor.set_comment_input("   ");
    assert!(!editor.add_comment());
    assert!(editor.task().comments.is_empty());
    assert_eq!(editor.comment_input(), "   ");
}

#[test]
fn test_add_comment_appends_one_and_clears_input() {
    let mut editor = editor();
    editor.set_comment_input("hello");
    assert!(editor.add_comment());

    let comments = &editor.task().comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].comment, "hello");
    assert_eq!(comments[0].comment_by, "Sam Lee");
    assert_eq!(comments[0].task_id, "1");
    assert_eq!(editor.comment_input(), "");
}

#[test]
fn test_comment_via_keys() {
    let mut editor = editor();
    editor.set_tab(Tab::Comments);
    type_text(&mut editor, "looks good");
    editor.handle_key_events(key(KeyCode::Enter));
    assert_eq!(editor.task().comments[0].comment, "looks good");
}

#[test]
fn test_add_subtask_inherits_from_parent() {
    let mut editor = valid_editor();
    editor.set_team(Some("T1".to_string()));
    editor.set_subtask_input("Write test");

    let subtask = editor.add_subtask().cloned().unwrap();
    assert_eq!(subtask.title, "Write test");
    assert_eq!(subtask.parent_id.as_deref(), Some("1"));
    assert_eq!(subtask.priority, Priority::Medium);
    assert_eq!(subtask.assigned_to.as_deref(), Some("U1"));
    assert_eq!(subtask.team_id.as_deref(), Some("T1"));
    assert_eq!(subtask.list_status_id.as_deref(), Some("S1"));
    assert_eq!(editor.subtask_input(), "");

    editor.set_subtask_input("  ");
    assert!(editor.add_subtask().is_none());
    assert_eq!(editor.subtasks().len(), 1);
}

#[test]
fn test_seed_subtasks_keeps_local_additions() {
    let mut editor = editor();
    editor.set_subtask_input("Local one");
    let local_id = editor.add_subtask().unwrap().id.clone();

    let mut loaded = Task::new("2", "From server");
    loaded.parent_id = Some("1".to_string());
    editor.seed_subtasks(vec![loaded]);

    let ids: Vec<&str> = editor.subtasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2", local_id.as_str()]);
    assert!(!editor.subtasks_loading());
}

#[test]
fn test_subtask_status_cycle_touches_one_subtask() {
    let mut editor = editor();
    editor.seed_subtasks(vec![Task::new("a", "A"), Task::new("b", "B")]);

    assert!(editor.cycle_subtask_status("b", true));
    assert_eq!(editor.subtasks()[1].list_status_id.as_deref(), Some("S1"));
    assert_eq!(editor.subtasks()[1].list_status.as_deref(), Some("To Do"));
    assert_eq!(editor.subtasks()[0].list_status_id, None);
    assert!(!editor.cycle_subtask_status("zzz", true));
}

#[test]
fn test_subtask_list_keys() {
    let mut editor = editor();
    editor.seed_subtasks(vec![Task::new("a", "A"), Task::new("b", "B"), Task::new("c", "C")]);
    editor.set_tab(Tab::Subtasks);
    editor.handle_key_events(key(KeyCode::Tab));
    assert_eq!(editor.list_focus(), ListFocus::List);

    editor.handle_key_events(key(KeyCode::Down));
    assert_eq!(editor.selected_subtask().map(|t| t.id.as_str()), Some("b"));

    editor.handle_key_events(key(KeyCode::Char('d')));
    let ids: Vec<&str> = editor.subtasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    editor.handle_key_events(key(KeyCode::Char(' ')));
    assert!(editor.subtasks_collapsed());
    // Collapsed lists ignore edits
    editor.handle_key_events(key(KeyCode::Char('d')));
    assert_eq!(editor.subtasks().len(), 2);
}

#[test]
fn test_subtask_input_via_keys() {
    let mut editor = editor();
    editor.set_tab(Tab::Subtasks);
    type_text(&mut editor, "New step");
    editor.handle_key_events(key(KeyCode::Enter));
    assert_eq!(editor.subtasks()[0].title, "New step");
}

#[test]
fn test_nested_subtask_editor_saves_into_list() {
    let mut editor = editor();
    editor.seed_subtasks(vec![Task::new("a", "Old")]);
    assert!(!editor.open_subtask("missing"));
    assert!(editor.open_subtask("a"));

    for _ in 0..3 {
        editor.handle_key_events(key(KeyCode::Backspace));
    }
    type_text(&mut editor, "New");
    editor.handle_key_events(key(KeyCode::Enter));

    assert!(editor.subtask_editor().is_none());
    assert_eq!(editor.subtasks()[0].title, "New");
}

#[test]
fn test_nested_subtask_editor_cancel_discards() {
    let mut editor = editor();
    editor.seed_subtasks(vec![Task::new("a", "Old")]);
    editor.open_subtask("a");
    type_text(&mut editor, "er");
    editor.handle_key_events(key(KeyCode::Esc));

    assert!(editor.subtask_editor().is_none());
    assert_eq!(editor.subtasks()[0].title, "Old");
}

fn write_file(dir: &std::path::Path, name: &str, bytes: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, vec![b'x'; bytes]).unwrap();
    path
}

#[test]
fn test_attach_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.png", 1536);
    let b = write_file(dir.path(), "b.pdf", 1_048_576);

    let mut editor = editor();
    let outcome = editor.attach_files(&[a, b]);
    assert_eq!(outcome.added.len(), 2);
    assert!(outcome.skipped.is_empty());

    let attachments = editor.attachments();
    assert_eq!(attachments.len(), 2);
    assert_ne!(attachments[0].id, attachments[1].id);
    assert_eq!(attachments[0].file_name, "a.png");
    assert_eq!(attachments[0].file_size, "1.5 KB");
    assert_eq!(attachments[0].file_type, "image/png");
    assert_eq!(attachments[1].file_size, "1 MB");
    assert_eq!(attachments[1].uploaded_by.as_deref(), Some("U2"));
    assert_eq!(attachments[1].task_id, "1");
    assert_eq!(editor.previews().len(), 2);
}

#[test]
fn test_attach_skips_unreadable_paths() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "notes.txt", 10);
    let missing = dir.path().join("missing.txt");

    let mut editor = editor();
    let outcome = editor.attach_files(&[good, missing.clone(), dir.path().to_path_buf()]);
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(outcome.skipped.len(), 2);
    assert_eq!(outcome.skipped[0].0, missing);
    assert_eq!(editor.attachments().len(), 1);
}

#[test]
fn test_attach_from_input_splits_on_commas() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", 1);
    let b = write_file(dir.path(), "b.txt", 2);

    let mut editor = editor();
    editor.set_attach_input(format!("{}, {}", a.display(), b.display()));
    let outcome = editor.attach_from_input();
    assert_eq!(outcome.added.len(), 2);
    assert_eq!(editor.attach_input(), "");
}

#[test]
fn test_attach_key_reports_skipped_files() {
    let mut editor = editor();
    editor.set_tab(Tab::Attachments);
    editor.set_attach_input("/no/such/file.txt");

    match editor.handle_key_events(key(KeyCode::Enter)) {
        Action::Notify(NotificationLevel::Warning, message) => {
            assert!(message.contains("/no/such/file.txt"));
        }
        other => panic!("expected a warning, got {other:?}"),
    }
    assert_eq!(editor.attach_input(), "/no/such/file.txt");
}

#[test]
fn test_remove_attachment_keeps_order_and_releases_preview() {
    let dir = tempfile::tempdir().unwrap();
    let files: Vec<_> = ["a.txt", "b.txt", "c.txt"]
        .iter()
        .map(|name| write_file(dir.path(), name, 4))
        .collect();

    let mut editor = editor();
    editor.attach_files(&files);
    let ids: Vec<String> = editor.attachments().iter().map(|a| a.id.clone()).collect();
    let staged = editor.previews().path(&ids[1]).unwrap().to_path_buf();
    assert!(staged.exists());

    assert!(editor.remove_attachment(&ids[1]));
    let remaining: Vec<&str> = editor.attachments().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);
    assert!(!staged.exists());
    assert_eq!(editor.previews().len(), 2);

    assert!(!editor.remove_attachment("unknown"));
    assert_eq!(editor.attachments().len(), 2);
}

#[test]
fn test_open_attachment_targets_staged_copy() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.txt", 4);

    let mut editor = editor();
    editor.attach_files(&[file]);
    editor.set_tab(Tab::Attachments);
    editor.handle_key_events(key(KeyCode::Tab));

    let id = editor.attachments()[0].id.clone();
    let expected = editor.preview_target(&id).unwrap();
    match editor.handle_key_events(key(KeyCode::Enter)) {
        Action::OpenAttachment(target) => assert_eq!(target, expected),
        other => panic!("expected OpenAttachment, got {other:?}"),
    }
}

#[test]
fn test_close_removes_preview_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.txt", 4);

    let mut editor = editor();
    editor.attach_files(&[file.clone()]);
    let preview_dir = editor.previews().dir().unwrap().to_path_buf();
    assert!(preview_dir.exists());

    editor.close();
    assert!(!preview_dir.exists());
    assert!(file.exists());
}

#[test]
fn test_retry_after_partial_attach_keeps_only_failed_paths() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "good.txt", 3);
    let missing = dir.path().join("missing.txt");

    let mut editor = editor();
    editor.set_tab(Tab::Attachments);
    editor.set_attach_input(format!("{}, {}", good.display(), missing.display()));

    assert!(matches!(
        editor.handle_key_events(key(KeyCode::Enter)),
        Action::Notify(NotificationLevel::Warning, _)
    ));
    assert_eq!(editor.attachments().len(), 1);
    assert_eq!(editor.attach_input(), missing.display().to_string());

    editor.handle_key_events(key(KeyCode::Enter));
    let names: Vec<&str> = editor.attachments().iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, vec!["good.txt"]);
}

#[test]
fn test_snapshot_leaves_out_staged_preview_paths() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.png", 8);

    let mut task = fix_bug();
    task.attachments.push(Attachment {
        id: "server-1".to_string(),
        task_id: "1".to_string(),
        file_name: "report.pdf".to_string(),
        file_size: "2 KB".to_string(),
        file_type: "application/pdf".to_string(),
        uploaded_by: Some("U1".to_string()),
        uploaded_at: Utc::now(),
        url: Some("https://files.example.com/report.pdf".to_string()),
    });
    let mut editor = TaskEditor::open(task, reference(), session());
    editor.set_assignee(Some("U1".to_string()));
    editor.set_status(Some("S1".to_string()));
    editor.attach_files(&[file]);
    let staged_id = editor.attachments()[1].id.clone();

    let snapshot = editor.begin_submit().unwrap();
    assert_eq!(
        snapshot.task.attachments[0].url.as_deref(),
        Some("https://files.example.com/report.pdf")
    );
    assert_eq!(snapshot.task.attachments[1].url, None);
    // The open session can still preview its own copy
    assert!(editor.preview_target(&staged_id).is_some());
}

#[test]
fn test_reopened_task_has_no_dangling_preview() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_file(dir.path(), "a.png", 8);

    let mut cache = (*reference()).clone();
    cache.tasks = vec![fix_bug()];

    let mut editor = valid_editor();
    editor.attach_files(&[file]);
    let attachment_id = editor.attachments()[0].id.clone();
    let snapshot = editor.begin_submit().unwrap();
    cache.apply_snapshot(&snapshot);
    editor.close();

    let reopened = TaskEditor::open(cache.tasks[0].clone(), Arc::new(cache), session());
    assert_eq!(reopened.attachments().len(), 1);
    assert_eq!(reopened.preview_target(&attachment_id), None);
}
