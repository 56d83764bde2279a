use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::entities::{Priority, Tag};

/// Create badges with parentheses, used for estimates
#[must_use]
pub fn create_paren_badge(text: &str) -> Span<'static> {
    Span::styled(
        format!("({text})"),
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightYellow)
            .add_modifier(Modifier::BOLD),
    )
}

#[must_use]
pub fn create_tag_badge(tag: &Tag) -> Span<'static> {
    Span::styled(
        format!(" {} ", tag.title),
        Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD),
    )
}

/// Estimate in minutes as "45m", "2h" or "1h30m"
#[must_use]
pub fn format_estimate(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

/// Tag and estimate badges for a task row
#[must_use]
pub fn create_task_badges(time_estimation: Option<u32>, tags: &[Tag]) -> Vec<Span<'static>> {
    let mut badges = Vec::new();

    if let Some(minutes) = time_estimation {
        badges.push(create_paren_badge(&format_estimate(minutes)));
    }

    for tag in tags {
        badges.push(create_tag_badge(tag));
    }

    badges
}

/// Colored flag per priority level
#[must_use]
pub fn create_priority_badge(priority: Priority) -> Span<'static> {
    match priority {
        Priority::High => Span::styled("⚑", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Priority::Medium => Span::styled(
            "⚑",
            Style::default().fg(Color::Rgb(255, 165, 0)).add_modifier(Modifier::BOLD),
        ),
        Priority::Low => Span::styled("⚐", Style::default().fg(Color::White)),
    }
}
