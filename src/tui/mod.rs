//! Interactive terminal dashboard using ratatui.
//!
//! The dashboard shows the KPI cards, the filtered server table, a detail
//! panel for the selected row, a breakdown chart and the most recent change
//! log entries. Filters, nearing-window changes and actions are driven from
//! the keyboard; see [`events::handle_key_event`] for the bindings.
//!
//! Rendering reads only from [`DashboardApp`]; every state change goes
//! through its methods so they can be tested without a terminal.

mod app;
pub(crate) mod clipboard;
pub mod events;
pub(crate) mod export;
pub mod state;
pub(crate) mod status;
pub mod theme;
mod ui;
pub(crate) mod widgets;

// Theme exports
pub use theme::{
    colors, current_theme_name, set_theme, toggle_theme, ColorScheme, FooterHints, Styles, Theme,
};

// Shared state exports
pub use state::{ListNavigation, ListState};

pub use app::{BreakdownKind, DashboardApp, NoteScope, NEARING_STEP_DAYS};
pub use events::Event;
pub use status::StatusMessage;
pub use ui::{render, run_tui};
