//! Centralized theme and color scheme for the dashboard.
//!
//! The active theme is process-wide so every widget picks up a switch on
//! the next frame.

use crate::model::EoslStatus;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Color scheme for the dashboard.
/// Provides semantic colors for different UI elements.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // EOSL status colors
    pub expired: Color,
    pub nearing: Color,
    pub supported: Color,
    pub unknown: Color,

    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub highlight: Color,
    pub selection_bg: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Badge foreground colors (for text on colored backgrounds)
    pub badge_fg_dark: Color,
    pub badge_fg_light: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            expired: Color::Red,
            nearing: Color::Yellow,
            supported: Color::Green,
            unknown: Color::DarkGray,

            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            highlight: Color::Yellow,
            selection_bg: Color::Rgb(60, 60, 80),

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            expired: Color::Rgb(200, 0, 0),
            nearing: Color::Rgb(180, 120, 0),
            supported: Color::Rgb(0, 128, 0),
            unknown: Color::Rgb(110, 110, 110),

            primary: Color::Rgb(0, 90, 160),
            accent: Color::Rgb(160, 90, 0),
            muted: Color::Rgb(140, 140, 140),
            border: Color::Rgb(150, 150, 150),
            border_focused: Color::Rgb(0, 90, 160),
            text: Color::Black,
            text_muted: Color::Rgb(90, 90, 90),
            highlight: Color::Rgb(160, 90, 0),
            selection_bg: Color::Rgb(210, 220, 240),

            success: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(180, 120, 0),
            error: Color::Rgb(200, 0, 0),

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// High contrast theme
    pub const fn high_contrast() -> Self {
        Self {
            expired: Color::LightRed,
            nearing: Color::LightYellow,
            supported: Color::LightGreen,
            unknown: Color::White,

            primary: Color::LightCyan,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightCyan,
            text: Color::White,
            text_muted: Color::White,
            highlight: Color::LightYellow,
            selection_bg: Color::Blue,

            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// Color for an EOSL status.
    pub const fn status_color(&self, status: EoslStatus) -> Color {
        match status {
            EoslStatus::Expired => self.expired,
            EoslStatus::Nearing => self.nearing,
            EoslStatus::Supported => self.supported,
            EoslStatus::Unknown => self.unknown,
        }
    }

    /// Palette for breakdown bars.
    pub const fn chart_palette(&self) -> [Color; 4] {
        [self.primary, self.accent, self.supported, self.border_focused]
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Get the current theme name
pub fn current_theme_name() -> &'static str {
    THEME.read().unwrap_or_else(PoisonError::into_inner).name
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn label() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn value() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn selected() -> Style {
        Style::default().bg(colors().selection_bg).bold()
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent).bold()
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    pub fn success() -> Style {
        Style::default().fg(colors().success)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }

    pub fn error() -> Style {
        Style::default().fg(colors().error).bold()
    }
}

// ============================================================================
// Badge Rendering Helpers
// ============================================================================

/// Colored status badge, e.g. ` ✖ EXPIRED `.
pub fn status_badge(status: EoslStatus) -> Span<'static> {
    let scheme = colors();
    let style = Style::default()
        .fg(scheme.badge_fg_dark)
        .bg(scheme.status_color(status));
    let style = if status == EoslStatus::Unknown {
        style.dim()
    } else {
        style.bold()
    };
    Span::styled(format!(" {} {} ", status.icon(), status.label()), style)
}

/// Render a filter badge showing current state
pub fn filter_badge(label: &str, value: &str) -> Vec<Span<'static>> {
    let scheme = colors();
    vec![
        Span::styled(format!("{label}: "), Style::default().fg(scheme.text_muted)),
        Span::styled(
            format!(" {value} "),
            Style::default()
                .fg(scheme.badge_fg_dark)
                .bg(scheme.accent)
                .bold(),
        ),
    ]
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Footer key hints
pub struct FooterHints;

impl FooterHints {
    /// Hints for the main table
    pub fn table() -> Vec<(&'static str, &'static str)> {
        vec![
            ("↑↓/jk", "navigate"),
            ("f", "status"),
            ("/", "owner"),
            ("i", "intimate"),
            ("c", "contact"),
            ("t", "tickets"),
            ("e", "export"),
            ("T", "theme"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }

    /// Hints while typing an owner search
    pub fn search() -> Vec<(&'static str, &'static str)> {
        vec![("Enter", "apply"), ("Esc", "cancel"), ("Backspace", "delete")]
    }

    pub fn note() -> Vec<(&'static str, &'static str)> {
        vec![("Enter", "record"), ("Esc", "cancel"), ("Backspace", "delete")]
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }

    spans
}
