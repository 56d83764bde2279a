//! Icon service for managing different icon themes
//!
//! This module provides a centralized way to manage icons throughout the application,
//! supporting different themes like emoji, Unicode, and ASCII fallbacks.

use crate::entities::Priority;
use serde::{Deserialize, Serialize};

/// Icon theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconTheme {
    /// Emoji icons (colorful, modern look)
    #[default]
    Emoji,
    /// Unicode symbols (clean, native look)
    Unicode,
    /// ASCII characters (maximum compatibility)
    Ascii,
}

/// Attachment glyphs by coarse file type
#[derive(Debug, Clone)]
pub struct FileIcons {
    pub image: &'static str,
    pub pdf: &'static str,
    pub word: &'static str,
    pub sheet: &'static str,
    pub other: &'static str,
}

/// UI element icons
#[derive(Debug, Clone)]
pub struct UiIcons {
    pub error: &'static str,
    pub info: &'static str,
    pub warning: &'static str,
    pub success: &'static str,
    pub comment: &'static str,
    pub subtask: &'static str,
    pub attachment: &'static str,
    pub tag: &'static str,
    pub team: &'static str,
}

/// Priority indicators
#[derive(Debug, Clone)]
pub struct PriorityIcons {
    pub high: &'static str,
    pub medium: &'static str,
    pub low: &'static str,
}

/// Complete icon set for a specific theme
#[derive(Debug, Clone)]
pub struct IconSet {
    pub files: FileIcons,
    pub ui: UiIcons,
    pub priority: PriorityIcons,
    pub due_date: &'static str,
    pub estimate: &'static str,
    pub collapsed: &'static str,
    pub expanded: &'static str,
}

/// Icon service for managing themes and providing icons
#[derive(Debug, Clone, Default)]
pub struct IconService {
    current_theme: IconTheme,
}

impl IconService {
    /// Create a new icon service with the specified theme
    #[must_use]
    pub fn new(theme: IconTheme) -> Self {
        Self { current_theme: theme }
    }

    /// Get the current theme
    #[must_use]
    pub fn theme(&self) -> IconTheme {
        self.current_theme
    }

    /// Set the current theme
    pub fn set_theme(&mut self, theme: IconTheme) {
        self.current_theme = theme;
    }

    /// Cycle to the next icon theme in the sequence: Emoji -> Unicode -> Ascii -> Emoji
    pub fn cycle_icon_theme(&mut self) {
        self.current_theme = match self.current_theme {
            IconTheme::Emoji => IconTheme::Unicode,
            IconTheme::Unicode => IconTheme::Ascii,
            IconTheme::Ascii => IconTheme::Emoji,
        };
    }

    /// Get the complete icon set for the current theme
    #[must_use]
    pub fn icons(&self) -> IconSet {
        match self.current_theme {
            IconTheme::Emoji => Self::emoji_icons(),
            IconTheme::Unicode => Self::unicode_icons(),
            IconTheme::Ascii => Self::ascii_icons(),
        }
    }

    fn emoji_icons() -> IconSet {
        IconSet {
            files: FileIcons {
                image: "🖼️",
                pdf: "📄",
                word: "📝",
                sheet: "📊",
                other: "📎",
            },
            ui: UiIcons {
                error: "❌",
                info: "💡",
                warning: "⚠️",
                success: "✅",
                comment: "💬",
                subtask: "🧩",
                attachment: "📎",
                tag: "🏷️",
                team: "👥",
            },
            priority: PriorityIcons {
                high: "🔴",
                medium: "🟡",
                low: "🟢",
            },
            due_date: "📅",
            estimate: "⏱️",
            collapsed: "▸",
            expanded: "▾",
        }
    }

    fn unicode_icons() -> IconSet {
        IconSet {
            files: FileIcons {
                image: "▣",
                pdf: "▤",
                word: "¶",
                sheet: "▦",
                other: "◇",
            },
            ui: UiIcons {
                error: "✗",
                info: "ⓘ",
                warning: "⚠",
                success: "✓",
                comment: "❝",
                subtask: "↳",
                attachment: "◇",
                tag: "◉",
                team: "◆",
            },
            priority: PriorityIcons {
                high: "●",
                medium: "◉",
                low: "○",
            },
            due_date: "◷",
            estimate: "⧖",
            collapsed: "▸",
            expanded: "▾",
        }
    }

    fn ascii_icons() -> IconSet {
        IconSet {
            files: FileIcons {
                image: "[img]",
                pdf: "[pdf]",
                word: "[doc]",
                sheet: "[xls]",
                other: "[file]",
            },
            ui: UiIcons {
                error: "X",
                info: "i",
                warning: "!",
                success: "+",
                comment: ">",
                subtask: "-",
                attachment: "&",
                tag: "#",
                team: "@",
            },
            priority: PriorityIcons {
                high: "!!",
                medium: "!",
                low: ".",
            },
            due_date: "@",
            estimate: "T",
            collapsed: ">",
            expanded: "v",
        }
    }

    /// Glyph for an attachment row, matched on the MIME type string
    #[must_use]
    pub fn file_icon(&self, file_type: &str) -> &'static str {
        let files = self.icons().files;
        if file_type.contains("image") {
            files.image
        } else if file_type.contains("pdf") {
            files.pdf
        } else if file_type.contains("word") {
            files.word
        } else if file_type.contains("sheet") {
            files.sheet
        } else {
            files.other
        }
    }

    #[must_use]
    pub fn priority(&self, priority: Priority) -> &'static str {
        let icons = self.icons().priority;
        match priority {
            Priority::High => icons.high,
            Priority::Medium => icons.medium,
            Priority::Low => icons.low,
        }
    }

    #[must_use]
    pub fn error(&self) -> &'static str {
        self.icons().ui.error
    }

    #[must_use]
    pub fn info(&self) -> &'static str {
        self.icons().ui.info
    }

    #[must_use]
    pub fn warning(&self) -> &'static str {
        self.icons().ui.warning
    }

    #[must_use]
    pub fn success(&self) -> &'static str {
        self.icons().ui.success
    }
}
