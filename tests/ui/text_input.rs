use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use taskdesk::ui::components::TextInput;

fn press(input: &mut TextInput, code: KeyCode) -> bool {
    input.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn test_with_value_puts_cursor_at_end() {
    let input = TextInput::with_value("héllo");
    assert_eq!(input.cursor(), 5);
}

#[test]
fn test_insert_in_the_middle_of_multibyte_text() {
    let mut input = TextInput::with_value("héllo");
    press(&mut input, KeyCode::Home);
    press(&mut input, KeyCode::Right);
    press(&mut input, KeyCode::Right);
    assert!(press(&mut input, KeyCode::Char('X')));
    assert_eq!(input.value(), "héXllo");
    assert_eq!(input.cursor(), 3);
}

#[test]
fn test_backspace_and_delete_at_edges() {
    let mut input = TextInput::with_value("ab");
    assert!(!press(&mut input, KeyCode::Delete));
    assert!(press(&mut input, KeyCode::Backspace));
    assert_eq!(input.value(), "a");

    press(&mut input, KeyCode::Home);
    assert!(!press(&mut input, KeyCode::Backspace));
    assert!(press(&mut input, KeyCode::Delete));
    assert!(input.is_empty());
}

#[test]
fn test_control_keys_are_not_consumed() {
    let mut input = TextInput::new();
    let handled = input.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    assert!(!handled);
    assert_eq!(input.value(), "");
}

#[test]
fn test_take_empties_buffer() {
    let mut input = TextInput::with_value("draft");
    assert_eq!(input.take(), "draft");
    assert!(input.is_empty());
    assert_eq!(input.cursor(), 0);
}
