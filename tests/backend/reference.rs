use pretty_assertions::assert_eq;
use taskdesk::backend::memory::MemoryBackend;
use taskdesk::backend::ReferenceData;
use taskdesk::entities::{Task, TaskSnapshot};

async fn sample_reference() -> ReferenceData {
    ReferenceData::load(&MemoryBackend::default()).await.unwrap()
}

#[tokio::test]
async fn test_load_collects_every_collection() {
    let reference = sample_reference().await;
    assert_eq!(reference.users.len(), 3);
    assert_eq!(reference.teams.len(), 2);
    assert_eq!(reference.tags.len(), 4);
    assert_eq!(reference.list_statuses.len(), 4);
    assert_eq!(reference.tasks.len(), 5);
}

#[tokio::test]
async fn test_name_lookups_fall_back() {
    let reference = sample_reference().await;
    assert_eq!(reference.user_name(Some("2")), "Sam Lee");
    assert_eq!(reference.user_name(Some("404")), "Unassigned");
    assert_eq!(reference.user_name(None), "Unassigned");
    assert_eq!(reference.team_name(Some("1")), "Platform");
    assert_eq!(reference.team_name(None), "No Team");
    assert_eq!(reference.list_status_title(Some("3")), Some("Review"));
    assert_eq!(reference.list_status_title(Some("9")), None);
    assert_eq!(reference.tag("4").map(|t| t.title.as_str()), Some("design"));
}

#[tokio::test]
async fn test_top_level_tasks_by_team() {
    let reference = sample_reference().await;

    let all: Vec<&str> = reference.top_level_tasks(None).iter().map(|t| t.id.as_str()).collect();
    assert_eq!(all, vec!["1", "4", "5"]);

    let mobile: Vec<&str> = reference
        .top_level_tasks(Some("2"))
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(mobile, vec!["4"]);
}

#[tokio::test]
async fn test_apply_snapshot_replaces_task_and_children() {
    let mut reference = sample_reference().await;
    let mut task = reference.tasks[0].clone();
    task.title = "Renamed".to_string();
    let mut child = Task::new("c1", "Only child");
    child.parent_id = Some("1".to_string());

    reference.apply_snapshot(&TaskSnapshot {
        task,
        subtasks: vec![child],
    });

    assert_eq!(reference.tasks.iter().find(|t| t.id == "1").unwrap().title, "Renamed");
    let children: Vec<&str> = reference
        .tasks
        .iter()
        .filter(|t| t.is_subtask_of("1"))
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(children, vec!["c1"]);
}
