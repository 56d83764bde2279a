use crate::constants::{
    ERROR_OPEN_PREVIEW_FAILED, ERROR_REFERENCE_LOAD_FAILED, ERROR_TASK_UPDATE_FAILED, SUCCESS_TASK_UPDATED,
};
use crate::preview;
use crate::ui::components::dialogs::{render_error_dialog, render_help_dialog, render_logs_dialog, DialogScroll};
use crate::ui::components::{Notifications, StatusBar, TaskEditor, TaskListComponent, TaskModal, TeamSelector};
use crate::ui::core::{
    actions::{Action, DialogType, NotificationLevel},
    AppContext, Component, TaskManager,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Which pane receives keys while no modal or dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Filter,
    Tasks,
}

pub struct AppComponent {
    context: AppContext,

    // Component composition
    team_selector: TeamSelector,
    task_list: TaskListComponent,
    modal: TaskModal,
    notifications: Notifications,
    dialog: Option<DialogType>,
    dialog_scroll: DialogScroll,

    // Services
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    // UI state
    focus: FocusPane,
    selected_team: Option<String>,
    should_quit: bool,
}

impl AppComponent {
    pub fn new(context: AppContext) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();

        let mut team_selector = TeamSelector::new();
        team_selector.icons = context.icons.clone();

        let mut task_list = TaskListComponent::new();
        task_list.icons = context.icons.clone();
        task_list.on_focus();

        let mut modal = TaskModal::new();
        modal.icons = context.icons.clone();
        modal.display = context.config.display.clone();

        let mut notifications = Notifications::new(Duration::from_secs(context.config.display.notification_seconds));
        notifications.icons = context.icons.clone();

        Self {
            context,
            team_selector,
            task_list,
            modal,
            notifications,
            dialog: None,
            dialog_scroll: DialogScroll::default(),
            task_manager,
            background_action_rx,
            focus: FocusPane::Tasks,
            selected_team: None,
            should_quit: false,
        }
    }

    /// Kick off the initial reference load and team fetch
    pub fn start(&mut self) {
        log::info!("Starting with the {} backend", self.context.config.api.backend);
        self.dispatch(Action::LoadReferenceData);
        let mount = self.team_selector.mount();
        self.dispatch(mount);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn modal(&self) -> &TaskModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut TaskModal {
        &mut self.modal
    }

    pub fn task_list(&self) -> &TaskListComponent {
        &self.task_list
    }

    pub fn team_selector(&self) -> &TeamSelector {
        &self.team_selector
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn dialog(&self) -> Option<&DialogType> {
        self.dialog.as_ref()
    }

    pub fn focus(&self) -> FocusPane {
        self.focus
    }

    pub fn selected_team(&self) -> Option<&str> {
        self.selected_team.as_deref()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Route a key to the dialog, the modal, the global shortcuts or the focused pane, in
    /// that order, and process whatever it produces.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = self.key_to_action(key);
        self.dispatch(action);
    }

    fn key_to_action(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if let Some(dialog) = &self.dialog {
            return self.handle_dialog_key(dialog.clone(), key);
        }

        if self.modal.is_open() {
            return self.modal.handle_key_events(key);
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('r') => Action::LoadReferenceData,
            KeyCode::Char('i') => Action::CycleIconTheme,
            KeyCode::Tab => Action::FocusNextPane,
            _ => match self.focus {
                FocusPane::Filter => self.team_selector.handle_key_events(key),
                FocusPane::Tasks => self.task_list.handle_key_events(key),
            },
        }
    }

    fn handle_dialog_key(&mut self, dialog: DialogType, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Action::HideDialog,
            KeyCode::Char('q') if dialog != DialogType::Help => Action::HideDialog,
            KeyCode::Char('?') if dialog == DialogType::Help => Action::HideDialog,
            KeyCode::Char('G') if dialog == DialogType::Logs => Action::HideDialog,
            KeyCode::Up | KeyCode::Char('k') => {
                self.dialog_scroll.up();
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.dialog_scroll.down();
                Action::None
            }
            KeyCode::PageUp => {
                self.dialog_scroll.page_up();
                Action::None
            }
            KeyCode::PageDown => {
                self.dialog_scroll.page_down();
                Action::None
            }
            KeyCode::Home => {
                self.dialog_scroll.top();
                Action::None
            }
            KeyCode::End => {
                self.dialog_scroll.bottom();
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Process an action and every follow-up action it produces
    pub fn dispatch(&mut self, action: Action) {
        let mut next = action;
        while !matches!(next, Action::None) {
            next = self.handle_app_action(next);
        }
    }

    /// Process background results, expire notifications and forget finished tasks
    pub fn on_tick(&mut self) {
        while let Ok(action) = self.background_action_rx.try_recv() {
            self.dispatch(action);
        }
        self.notifications.prune();
        let finished = self.task_manager.cleanup_finished_tasks();
        if finished > 0 {
            log::debug!("Cleaned up {} finished background tasks", finished);
        }
    }

    /// Wait for the next background result and process it. Returns false when no task can
    /// report anymore.
    pub async fn process_next_background_action(&mut self) -> bool {
        match self.background_action_rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handle app-level actions. Component-level ones are passed down the component chain.
    fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                log::info!("Quitting");
                self.should_quit = true;
                Action::None
            }
            Action::LoadReferenceData => {
                if self.task_manager.is_running("Load reference data") {
                    log::debug!("Reference load already in progress, ignoring");
                } else {
                    self.task_list.loading = true;
                    self.task_manager.spawn_reference_load(Arc::clone(&self.context.backend));
                }
                Action::None
            }
            Action::ReferenceDataLoaded(data) => {
                log::info!(
                    "Loaded {} tasks, {} users, {} teams, {} tags, {} statuses",
                    data.tasks.len(),
                    data.users.len(),
                    data.teams.len(),
                    data.tags.len(),
                    data.list_statuses.len()
                );
                self.context.reference = Arc::new(*data);
                self.refresh_task_list();
                Action::None
            }
            Action::ReferenceDataFailed(error) => {
                log::error!("{}: {}", ERROR_REFERENCE_LOAD_FAILED, error);
                self.task_list.loading = false;
                Action::ShowDialog(DialogType::Error(format!("{}: {}", ERROR_REFERENCE_LOAD_FAILED, error)))
            }
            Action::FetchTeams => {
                self.task_manager.spawn_team_fetch(Arc::clone(&self.context.backend));
                Action::None
            }
            Action::TeamSelected(team_id) => {
                log::info!("Team filter: {}", self.context.reference.team_name(team_id.as_deref()));
                self.team_selector.set_selected_team(team_id.clone());
                self.selected_team = team_id;
                self.refresh_task_list();
                Action::None
            }
            Action::OpenTask(task_id) => self.open_task(&task_id),
            Action::SubmitTask(snapshot) => {
                log::info!(
                    "Submitting task {} with {} subtasks",
                    snapshot.task.id,
                    snapshot.subtasks.len()
                );
                self.task_manager
                    .spawn_task_update(Arc::clone(&self.context.backend), *snapshot);
                Action::None
            }
            Action::TaskUpdated(snapshot) => {
                log::info!("Task {} updated", snapshot.task.id);
                Arc::make_mut(&mut self.context.reference).apply_snapshot(&snapshot);
                self.refresh_task_list();
                self.modal.update(Action::TaskUpdated(snapshot));
                Action::Notify(NotificationLevel::Success, SUCCESS_TASK_UPDATED.to_string())
            }
            Action::TaskUpdateFailed { task_id, error } => {
                log::error!("{} for task {}: {}", ERROR_TASK_UPDATE_FAILED, task_id, error);
                self.modal.update(Action::TaskUpdateFailed {
                    task_id,
                    error: error.clone(),
                });
                Action::Notify(NotificationLevel::Error, format!("{}: {}", ERROR_TASK_UPDATE_FAILED, error))
            }
            Action::OpenAttachment(target) => match preview::open_with_system(&target) {
                Ok(()) => {
                    log::debug!("Opened attachment {}", target);
                    Action::None
                }
                Err(e) => {
                    log::warn!("{} {}: {:#}", ERROR_OPEN_PREVIEW_FAILED, target, e);
                    Action::Notify(NotificationLevel::Warning, format!("{}: {}", ERROR_OPEN_PREVIEW_FAILED, target))
                }
            },
            Action::Notify(level, message) => {
                self.notifications.push(level, message);
                Action::None
            }
            Action::ShowDialog(dialog) => {
                log::debug!("Showing dialog {:?}", dialog);
                self.dialog = Some(dialog);
                self.dialog_scroll.reset();
                Action::None
            }
            Action::HideDialog => {
                self.dialog = None;
                self.dialog_scroll.reset();
                Action::None
            }
            Action::CycleIconTheme => {
                self.context.icons.cycle_icon_theme();
                log::info!("Icon theme: {:?}", self.context.icons.theme());
                self.apply_icons();
                Action::None
            }
            Action::FocusNextPane => {
                self.focus = match self.focus {
                    FocusPane::Filter => {
                        self.team_selector.on_blur();
                        self.task_list.on_focus();
                        FocusPane::Tasks
                    }
                    FocusPane::Tasks => {
                        self.task_list.on_blur();
                        self.team_selector.on_focus();
                        FocusPane::Filter
                    }
                };
                Action::None
            }
            other => {
                let action = self.modal.update(other);
                let action = self.team_selector.update(action);
                let action = self.task_list.update(action);
                if !matches!(action, Action::None) {
                    log::debug!("Unhandled action {:?}", action);
                }
                Action::None
            }
        }
    }

    fn open_task(&mut self, task_id: &str) -> Action {
        let Some(task) = self.context.reference.tasks.iter().find(|t| t.id == task_id).cloned() else {
            log::warn!("Cannot open task {}: not in the loaded task list", task_id);
            return Action::None;
        };

        log::info!("Opening task {} '{}'", task.id, task.title);
        let editor = TaskEditor::open(
            task,
            Arc::clone(&self.context.reference),
            self.context.session.clone(),
        );
        self.modal.open(editor);
        self.task_manager
            .spawn_subtask_load(Arc::clone(&self.context.backend), task_id.to_string());
        Action::None
    }

    fn refresh_task_list(&mut self) {
        self.task_list
            .update_data(Arc::clone(&self.context.reference), self.selected_team.clone());
    }

    fn apply_icons(&mut self) {
        let icons = self.context.icons.clone();
        self.team_selector.icons = icons.clone();
        self.task_list.icons = icons.clone();
        self.modal.icons = icons.clone();
        self.notifications.icons = icons;
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        self.key_to_action(key)
    }

    fn update(&mut self, action: Action) -> Action {
        self.handle_app_action(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (content, status) = LayoutManager::main_layout(rect);
        let (filter_area, tasks_area) = LayoutManager::content_layout(content);

        self.team_selector.render(f, filter_area);
        self.task_list.render(f, tasks_area);
        StatusBar::render(f, status, self.task_manager.task_count(), self.modal.is_open());

        self.modal.render(f, rect);

        match &self.dialog {
            Some(DialogType::Error(message)) => {
                render_error_dialog(f, rect, &self.context.icons, message, &mut self.dialog_scroll);
            }
            Some(DialogType::Help) => render_help_dialog(f, rect, &mut self.dialog_scroll),
            Some(DialogType::Logs) => render_logs_dialog(f, rect, &self.context.logger, &mut self.dialog_scroll),
            None => {}
        }

        self.notifications.render(f, rect);
    }
}
