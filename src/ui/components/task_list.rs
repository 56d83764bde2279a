use crate::backend::ReferenceData;
use crate::constants::LOADING_TASKS;
use crate::entities::Task;
use crate::icons::IconService;
use crate::ui::components::badge::{create_priority_badge, create_task_badges};
use crate::ui::core::{actions::Action, Component};
use crate::utils::datetime::format_human_date;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};
use std::sync::Arc;

/// Top-level tasks of the selected team
pub struct TaskListComponent {
    pub tasks: Vec<Task>,
    pub selected_index: usize,
    pub list_state: ListState,
    pub reference: Arc<ReferenceData>,
    pub team_filter: Option<String>,
    pub loading: bool,
    pub icons: IconService,
    focused: bool,
}

impl Default for TaskListComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListComponent {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            selected_index: 0,
            list_state: ListState::default(),
            reference: Arc::new(ReferenceData::default()),
            team_filter: None,
            loading: true,
            icons: IconService::default(),
            focused: true,
        }
    }

    /// Rebuild the rows from reference data and the team filter
    pub fn update_data(&mut self, reference: Arc<ReferenceData>, team_filter: Option<String>) {
        self.tasks = reference
            .top_level_tasks(team_filter.as_deref())
            .into_iter()
            .cloned()
            .collect();
        self.reference = reference;
        self.team_filter = team_filter;
        self.loading = false;
        self.update_list_state();
    }

    fn update_list_state(&mut self) {
        if self.tasks.is_empty() {
            self.selected_index = 0;
            self.list_state.select(None);
        } else {
            if self.selected_index >= self.tasks.len() {
                self.selected_index = self.tasks.len() - 1;
            }
            self.list_state.select(Some(self.selected_index));
        }
    }

    pub fn get_selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected_index)
    }

    fn create_task_item(&self, task: &Task) -> ListItem<'static> {
        let mut line_spans = vec![create_priority_badge(task.priority), Span::raw(" ")];

        line_spans.push(Span::styled(task.title.clone(), Style::default().fg(Color::White)));

        let status = self
            .reference
            .list_status_title(task.list_status_id.as_deref())
            .or(task.list_status.as_deref());
        if let Some(status) = status {
            line_spans.push(Span::raw(" "));
            line_spans.push(Span::styled(format!("[{}]", status), Style::default().fg(Color::Cyan)));
        }

        line_spans.push(Span::raw(" "));
        line_spans.push(Span::styled(
            format!("@{}", self.reference.user_name(task.assigned_to.as_deref())),
            Style::default().fg(Color::Magenta),
        ));

        if let Some(due) = task.due_date {
            line_spans.push(Span::raw(" "));
            line_spans.push(Span::styled(
                format!("{} {}", self.icons.icons().due_date, format_human_date(due)),
                Style::default().fg(Color::Rgb(255, 165, 0)),
            ));
        }

        let subtask_count = self.reference.tasks.iter().filter(|t| t.is_subtask_of(&task.id)).count();
        if subtask_count > 0 {
            line_spans.push(Span::raw(" "));
            line_spans.push(Span::styled(
                format!("{} {}", self.icons.icons().ui.subtask, subtask_count),
                Style::default().fg(Color::DarkGray),
            ));
        }

        for badge in create_task_badges(task.time_estimation, &task.tags) {
            line_spans.push(Span::raw(" "));
            line_spans.push(badge);
        }

        ListItem::new(Line::from(line_spans))
    }
}

impl Component for TaskListComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Action::PreviousTask,
            KeyCode::Down | KeyCode::Char('j') => Action::NextTask,
            KeyCode::Enter | KeyCode::Char('e') => match self.get_selected_task() {
                Some(task) => Action::OpenTask(task.id.clone()),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextTask => {
                if !self.tasks.is_empty() {
                    self.selected_index = (self.selected_index + 1) % self.tasks.len();
                    self.update_list_state();
                }
                Action::None
            }
            Action::PreviousTask => {
                if !self.tasks.is_empty() {
                    self.selected_index = if self.selected_index == 0 {
                        self.tasks.len() - 1
                    } else {
                        self.selected_index - 1
                    };
                    self.update_list_state();
                }
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = match self.team_filter.as_deref() {
            Some(id) => format!(" Tasks - {} ", self.reference.team_name(Some(id))),
            None => " Tasks ".to_string(),
        };
        let border_color = if self.focused { Color::Yellow } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .style(Style::default().fg(border_color));

        if self.tasks.is_empty() {
            let message = if self.loading {
                LOADING_TASKS
            } else if self.team_filter.is_some() {
                "No tasks for this team."
            } else {
                "No tasks. Press 'r' to reload."
            };
            let empty_list = List::new(vec![ListItem::new(message)]).block(block);
            f.render_widget(empty_list, rect);
            return;
        }

        let items: Vec<ListItem> = self.tasks.iter().map(|task| self.create_task_item(task)).collect();
        let tasks_list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

        f.render_stateful_widget(tasks_list, rect, &mut self.list_state);
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}
