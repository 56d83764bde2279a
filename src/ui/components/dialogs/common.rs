use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block(title: &str, theme_color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

/// Creates a bordered form field. Focused fields get a yellow border, invalid ones red.
pub fn create_field_paragraph(value: String, field_title: &str, focused: bool, invalid: bool) -> Paragraph<'static> {
    let border_color = if invalid {
        Color::Red
    } else if focused {
        Color::Yellow
    } else {
        Color::Gray
    };
    let title_color = if invalid { Color::Red } else { Color::White };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(title_color))
        .style(Style::default().fg(border_color));

    Paragraph::new(value).block(block).style(Style::default().fg(Color::White))
}

/// Creates an input field showing `placeholder` in gray while empty
pub fn create_input_paragraph(value: &str, placeholder: &str, field_title: &str, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Yellow } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(Span::styled(value.to_string(), Style::default().fg(Color::White)))
    };

    Paragraph::new(line).block(block)
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across dialogs
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut = (" • ", Color::Gray, "");
    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Cancel");
    pub const ESC_CLOSE: InstructionShortcut = ("Esc", Color::Red, " Close");
    pub const ENTER_SAVE: InstructionShortcut = ("Enter", Color::Green, " Save");
    pub const CTRL_S_SUBMIT: InstructionShortcut = ("Ctrl+S", Color::Green, " Update Task");
    pub const TAB_NEXT_FIELD: InstructionShortcut = ("Tab", Color::Cyan, " Next field");
    pub const PAGE_TABS: InstructionShortcut = ("PgUp/PgDn", Color::Cyan, " Switch tab");
    pub const ARROWS_CHANGE: InstructionShortcut = ("←/→", Color::Yellow, " Change");
}
