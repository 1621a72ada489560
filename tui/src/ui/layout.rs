use crate::app::{App, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::widgets::{
    render_filter_panel, render_gallery, render_header, render_help_screen, render_home,
    render_preview_overlay, render_stats, render_status_bar,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.size();

    // Create main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays (drawn last)
    if app.preview_open {
        render_preview_overlay(frame, app, size);
    }
    if app.help_open {
        render_help_screen(frame, size);
    }
}

/// Exactly one view is visible at a time; the filter view splits into the
/// filter panel and the filtered gallery.
fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_view {
        View::Home => render_home(frame, app, area),
        View::Gallery => render_gallery(frame, app, area, " Gallery "),
        View::Filter => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Length(32), // Filter controls
                    Constraint::Min(0),     // Filtered gallery
                ])
                .split(area);
            render_filter_panel(frame, app, chunks[0]);
            render_gallery(frame, app, chunks[1], " Filtered Notes ");
        }
        View::Stats => render_stats(frame, app, area),
    }
}
