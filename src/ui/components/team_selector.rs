//! Team filter: a single-selection list fed by the backend's team list.
//!
//! The selector asks for teams once, when first mounted. The chosen team is owned by the
//! caller; the selector only mirrors it to draw the current choice and reports picks
//! through [`Action::TeamSelected`].

use crate::constants::{LOADING_TEAMS, LOG_ERROR_FETCH_TEAMS, LOG_FETCHED_TEAMS, PLACEHOLDER_SELECT_TEAM};
use crate::entities::Team;
use crate::icons::IconService;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct TeamSelector {
    teams: Vec<Team>,
    /// Mirror of the caller's selection
    selected: Option<String>,
    list_state: ListState,
    requested: bool,
    loading: bool,
    focused: bool,
    pub icons: IconService,
}

impl Default for TeamSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TeamSelector {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            teams: Vec::new(),
            selected: None,
            list_state,
            requested: false,
            loading: false,
            focused: false,
            icons: IconService::default(),
        }
    }

    /// Request the team list. Only the first call asks; later ones return `Action::None`.
    pub fn mount(&mut self) -> Action {
        if self.requested {
            return Action::None;
        }
        self.requested = true;
        self.loading = true;
        Action::FetchTeams
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn set_selected_team(&mut self, team_id: Option<String>) {
        self.selected = team_id;
    }

    pub fn selected_team(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Option values in display order, starting with the "Select Team" entry
    pub fn options(&self) -> Vec<(Option<&str>, &str)> {
        std::iter::once((None, PLACEHOLDER_SELECT_TEAM))
            .chain(self.teams.iter().map(|t| (Some(t.id.as_str()), t.name.as_str())))
            .collect()
    }

    /// Value under the highlight
    pub fn highlighted(&self) -> Option<&str> {
        let index = self.list_state.selected().unwrap_or(0);
        index.checked_sub(1).and_then(|i| self.teams.get(i)).map(|t| t.id.as_str())
    }

    fn option_count(&self) -> usize {
        self.teams.len() + 1
    }

    fn move_highlight(&mut self, down: bool) {
        let count = self.option_count();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        self.list_state.select(Some(next));
    }
}

impl Component for TeamSelector {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_highlight(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_highlight(false);
                Action::None
            }
            KeyCode::Enter => Action::TeamSelected(self.highlighted().map(str::to_string)),
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::TeamsLoaded(teams) => {
                log::info!("{}: {} teams", LOG_FETCHED_TEAMS, teams.len());
                self.teams = teams;
                self.loading = false;
                if self.list_state.selected().unwrap_or(0) >= self.option_count() {
                    self.list_state.select(Some(0));
                }
                Action::None
            }
            Action::TeamsFailed(error) => {
                log::error!("{}: {}", LOG_ERROR_FETCH_TEAMS, error);
                self.loading = false;
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let border_color = if self.focused { Color::Yellow } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} Teams ", self.icons.icons().ui.team))
            .style(Style::default().fg(border_color));

        if self.loading {
            let loading = Paragraph::new(Span::styled(LOADING_TEAMS, Style::default().fg(Color::DarkGray))).block(block);
            f.render_widget(loading, rect);
            return;
        }

        let items: Vec<ListItem> = self
            .options()
            .into_iter()
            .map(|(id, name)| {
                let chosen = id == self.selected.as_deref();
                let marker = if chosen { "● " } else { "  " };
                let style = match (id, chosen) {
                    (None, _) => Style::default().fg(Color::DarkGray),
                    (Some(_), true) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    (Some(_), false) => Style::default().fg(Color::White),
                };
                ListItem::new(Line::from(vec![Span::raw(marker), Span::styled(name.to_string(), style)]))
            })
            .collect();

        let highlight = if self.focused {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).block(block).highlight_style(highlight);
        f.render_stateful_widget(list, rect, &mut self.list_state);
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}
