use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// A piece of the screen that reacts to keys and actions.
///
/// Keys become actions in [`Component::handle_key_events`]. Actions travel down the
/// component chain through [`Component::update`]; a component returns what it did not
/// consume so the next one can look at it.
pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn update(&mut self, action: Action) -> Action {
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);

    fn on_focus(&mut self) {}
    fn on_blur(&mut self) {}
}
