//! Event polling and key dispatch for the dashboard.

use super::app::{DashboardApp, NoteScope};
use crate::reports::ExportKind;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal tick
    Tick,
    /// Resize event
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub const fn new(tick_rate: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut DashboardApp, key: KeyEvent) {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.overlays.search.active {
        match key.code {
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Enter => app.confirm_search(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        }
        return;
    }

    if app.overlays.note.active {
        match key.code {
            KeyCode::Esc => app.cancel_note(),
            KeyCode::Enter => app.confirm_note(),
            KeyCode::Backspace => app.note_pop(),
            KeyCode::Char(c) => app.note_push(c),
            _ => {}
        }
        return;
    }

    if app.overlays.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => app.toggle_help(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.toggle_help(),

        // Navigation
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.go_last(),

        // Filters
        KeyCode::Char('f') => app.cycle_status_filter(),
        KeyCode::Char('v') => app.cycle_vendor_filter(),
        KeyCode::Char('n') => app.cycle_environment_filter(),
        KeyCode::Char('o') => app.cycle_os_family_filter(),
        KeyCode::Char('m') => app.toggle_missing_firmware(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('x') => app.clear_filters(),
        KeyCode::Char('+' | '=') => app.adjust_nearing_days(true),
        KeyCode::Char('-') => app.adjust_nearing_days(false),

        // Actions
        KeyCode::Char('i') => app.start_note(NoteScope::Selected),
        KeyCode::Char('I') => app.start_note(NoteScope::Visible),
        KeyCode::Char('c') => app.contact_selected(),
        KeyCode::Char('y') => app.copy_hostname(),
        KeyCode::Char('t') => app.export(ExportKind::Tickets),
        KeyCode::Char('e') => app.export(ExportKind::Inventory),
        KeyCode::Char('C') => app.export(ExportKind::Contacts),
        KeyCode::Char('r') => app.reload(),

        // Display
        KeyCode::Char('b') => app.cycle_breakdown(),
        KeyCode::Char('T') => app.toggle_theme(),
        _ => {}
    }
}

/// Scroll the table with the mouse wheel.
pub fn handle_mouse_event(app: &mut DashboardApp, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_prev(),
        _ => {}
    }
}
