use crate::app::{App, View};
use anyhow::Result;
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Mouse event
    Mouse(MouseEvent),
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => return Ok(Event::Key(key)),
                CEvent::Mouse(m) => return Ok(Event::Mouse(m)),
                _ => {}
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events for the application. Overlays take precedence over
/// view-level keys; everything runs synchronously in this handler.
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Preview overlay first: Esc is the global cancel-preview shortcut.
    if app.preview_open {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('p') => app.close_preview(),
            KeyCode::Char('o') => app.open_selected(),
            KeyCode::Char('d') => app.download_selected(),
            KeyCode::Char('q') => app.quit(),
            _ => {}
        }
        return;
    }

    if app.help_open {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.close_help(),
            _ => {}
        }
        return;
    }

    // Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
            return;
        }
        KeyCode::Char('?') => {
            app.open_help();
            return;
        }
        KeyCode::Char('h') | KeyCode::Char('1') => {
            app.show_view(View::Home);
            return;
        }
        KeyCode::Char('g') | KeyCode::Char('2') => {
            app.show_view(View::Gallery);
            return;
        }
        KeyCode::Char('f') | KeyCode::Char('3') => {
            app.show_view(View::Filter);
            return;
        }
        KeyCode::Char('s') | KeyCode::Char('4') => {
            app.show_view(View::Stats);
            return;
        }
        _ => {}
    }

    match app.current_view {
        View::Gallery => handle_gallery_keys(key, app),
        View::Filter => handle_filter_keys(key, app),
        View::Home | View::Stats => {
            if let KeyCode::Char('r') = key.code {
                app.reload();
            }
        }
    }
}

fn handle_gallery_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),
        KeyCode::Enter | KeyCode::Char('p') => app.open_preview(),
        KeyCode::Char('o') => app.open_selected(),
        KeyCode::Char('d') => app.download_selected(),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_filter_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Tab => app.focus_next_field(),
        KeyCode::BackTab => app.focus_prev_field(),
        KeyCode::Left => app.cycle_focused_value(-1),
        KeyCode::Right => app.cycle_focused_value(1),
        KeyCode::Char(' ') => app.toggle_focused_filter(),
        KeyCode::Char('r') => app.reset_filters(),
        KeyCode::Up => app.move_cursor_up(),
        KeyCode::Down => app.move_cursor_down(),
        KeyCode::Enter | KeyCode::Char('p') => app.open_preview(),
        KeyCode::Char('o') => app.open_selected(),
        KeyCode::Char('d') => app.download_selected(),
        _ => {}
    }
}

/// Mouse support is limited to scrolling the card cursor.
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_cursor_up(),
        MouseEventKind::ScrollDown => app.move_cursor_down(),
        _ => {}
    }
}
