use crate::fixtures::*;
use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use taskdesk::entities::Team;
use taskdesk::ui::components::TeamSelector;
use taskdesk::ui::core::{Action, Component};

fn loaded_selector() -> TeamSelector {
    let mut selector = TeamSelector::new();
    selector.mount();
    selector.update(Action::TeamsLoaded(reference().teams.clone()));
    selector
}

#[test]
fn test_mount_requests_teams_once() {
    let mut selector = TeamSelector::new();
    assert!(matches!(selector.mount(), Action::FetchTeams));
    assert!(selector.is_loading());
    assert!(matches!(selector.mount(), Action::None));
}

#[test]
fn test_options_start_with_placeholder() {
    let selector = loaded_selector();
    assert!(!selector.is_loading());
    assert_eq!(
        selector.options(),
        vec![(None, "Select Team"), (Some("T1"), "Platform"), (Some("T2"), "Mobile")]
    );
}

#[test]
fn test_failed_fetch_leaves_only_placeholder() {
    let mut selector = TeamSelector::new();
    selector.mount();
    selector.update(Action::TeamsFailed("offline".to_string()));

    assert!(!selector.is_loading());
    assert!(selector.teams().is_empty());
    assert_eq!(selector.options(), vec![(None, "Select Team")]);
}

#[test]
fn test_enter_reports_highlighted_team() {
    let mut selector = loaded_selector();
    assert!(matches!(
        selector.handle_key_events(key(KeyCode::Enter)),
        Action::TeamSelected(None)
    ));

    selector.handle_key_events(key(KeyCode::Down));
    selector.handle_key_events(key(KeyCode::Down));
    match selector.handle_key_events(key(KeyCode::Enter)) {
        Action::TeamSelected(team) => assert_eq!(team.as_deref(), Some("T2")),
        other => panic!("expected TeamSelected, got {other:?}"),
    }
}

#[test]
fn test_highlight_wraps() {
    let mut selector = loaded_selector();
    selector.handle_key_events(key(KeyCode::Up));
    assert_eq!(selector.highlighted(), Some("T2"));
    selector.handle_key_events(key(KeyCode::Down));
    assert_eq!(selector.highlighted(), None);
}

#[test]
fn test_selection_is_a_mirror() {
    let mut selector = loaded_selector();
    selector.set_selected_team(Some("T1".to_string()));
    assert_eq!(selector.selected_team(), Some("T1"));

    // Reloading teams does not touch the caller's choice
    selector.update(Action::TeamsLoaded(vec![Team::new("T9", "Ops")]));
    assert_eq!(selector.selected_team(), Some("T1"));
}
