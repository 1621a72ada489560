use crate::app::{App, FilterField, View};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render the header with title and key hints
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.current_view {
        View::Home => " 🗂 Notefolio ",
        View::Gallery => " 🗂 Notefolio — Gallery ",
        View::Filter => " 🗂 Notefolio — Filter ",
        View::Stats => " 🗂 Notefolio — Statistics ",
    };

    let keymap = &app.config.keymap;
    let key_hints = if app.preview_open {
        " [Esc:Close] [o:Open] [d:Download] ".to_string()
    } else if app.help_open {
        " [Esc:Close Help] ".to_string()
    } else {
        match app.current_view {
            View::Filter => {
                " [Tab:Field] [←/→:Value] [Space:Toggle] [r:Reset] [↑/↓:Card] [Enter:Preview] [q:Quit] "
                    .to_string()
            }
            View::Gallery => {
                " [↑/↓:Card] [Enter:Preview] [o:Open] [d:Download] [r:Reload] [q:Quit] "
                    .to_string()
            }
            _ => format!(
                " [{}:Gallery] [{}:Filter] [{}:Stats] [{}:Home] [{}:Help] [{}:Quit] ",
                keymap.view_gallery,
                keymap.view_filter,
                keymap.view_stats,
                keymap.view_home,
                keymap.help,
                keymap.quit
            ),
        }
    };

    let header_spans = vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(key_hints, Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the home view: dataset summary plus any load warnings.
pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to Notefolio",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} images across {} subjects and {} dates",
            app.stats.total_images, app.stats.unique_subjects, app.stats.unique_dates
        )),
        Line::from(format!("Data file: {}", app.data_path.display())),
        Line::from(""),
        Line::from("g — browse the gallery (newest first)"),
        Line::from("f — filter by subject and date"),
        Line::from("s — statistics"),
    ];

    if app.used_fallback {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Data file could not be read; showing the built-in sample set.",
            Style::default().fg(Color::Yellow),
        )));
    }
    if !app.load_warnings.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} date warning(s) at load:", app.load_warnings.len()),
            Style::default().fg(Color::Yellow),
        )));
        for warning in &app.load_warnings {
            lines.push(Line::from(Span::styled(
                format!("  • {warning}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let home = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Home "))
        .wrap(Wrap { trim: false });
    frame.render_widget(home, area);
}

/// Render the grouped gallery: one section per date (newest first), one
/// sub-block per subject, one selectable card line per image.
pub fn render_gallery(frame: &mut Frame, app: &App, area: Rect, title: &str) {
    if app.gallery.is_empty() {
        let placeholder = Paragraph::new("No matching notes found.")
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(placeholder, area);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    let mut card_index = 0usize;

    for section in &app.gallery.sections {
        lines.push(Line::from(Span::styled(
            format!("📅 {}  ({})", section.date.original, section.date.iso),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for subject in &section.subjects {
            lines.push(Line::from(Span::styled(
                format!("  📚 {} — {} image(s)", subject.subject, subject.cards.len()),
                Style::default().fg(Color::Cyan),
            )));
            for card in &subject.cards {
                let selected = card_index == app.cursor;
                let marker = if selected { "▸" } else { " " };
                let text = format!(
                    "   {marker} 🖼 {}  ⤓ {}",
                    truncate_middle(&card.path, width),
                    card.download_name
                );
                let mut line = Line::from(text);
                if selected {
                    selected_line = lines.len();
                    line = line.style(Style::default().bg(Color::Blue).fg(Color::White));
                }
                lines.push(line);
                card_index += 1;
            }
        }
        lines.push(Line::from(""));
    }

    // Keep the selected card in view.
    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(visible_height.saturating_sub(2)) as u16;

    let gallery = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Left),
        )
        .scroll((scroll, 0));
    frame.render_widget(gallery, area);
}

/// Render the filter controls: the two enable toggles and the four value
/// fields, with the focused field highlighted.
pub fn render_filter_panel(frame: &mut Frame, app: &App, area: Rect) {
    let toggle = |on: bool| if on { "[x]" } else { "[ ]" };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} Subject filter", toggle(app.filter.subject_enabled)),
            Style::default().fg(if app.filter.subject_enabled {
                Color::Green
            } else {
                Color::DarkGray
            }),
        )),
        field_line(
            app,
            FilterField::Subject,
            "subject",
            app.filter.subject.as_deref(),
        ),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Date filter", toggle(app.filter.date_enabled)),
            Style::default().fg(if app.filter.date_enabled {
                Color::Green
            } else {
                Color::DarkGray
            }),
        )),
        field_line(app, FilterField::Day, "day", app.filter.day.as_deref()),
        field_line(app, FilterField::Month, "month", app.filter.month.as_deref()),
        field_line(app, FilterField::Year, "year", app.filter.year.as_deref()),
        Line::from(""),
    ];

    let shown = app.gallery.card_count();
    let total = app.collection.image_count();
    lines.push(Line::from(Span::styled(
        format!("showing {shown} of {total} images"),
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Filters "))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

fn field_line(app: &App, field: FilterField, label: &str, value: Option<&str>) -> Line<'static> {
    let focused = app.filter_focus == field;
    let marker = if focused { "▸" } else { " " };
    let shown = match value {
        Some(v) if !v.is_empty() => v,
        _ => "(any)",
    };
    let style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(
        format!(" {marker} {label:<8} ◂ {shown} ▸"),
        style,
    ))
}

/// Render the statistics view, computed from the unfiltered collection.
pub fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = &app.stats;
    let mut lines = vec![
        Line::from(""),
        Line::from(format!("Total images:    {}", stats.total_images)),
        Line::from(format!("Unique subjects: {}", stats.unique_subjects)),
        Line::from(format!("Unique dates:    {}", stats.unique_dates)),
        Line::from(format!("Oldest date:     {}", stats.oldest_date)),
        Line::from(format!("Newest date:     {}", stats.newest_date)),
        Line::from(""),
        Line::from(Span::styled(
            "Images per subject",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let max = stats
        .subject_breakdown
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1);
    for (subject, count) in stats.breakdown_sorted() {
        let bar_width = (count * 24).div_ceil(max.max(1));
        lines.push(Line::from(vec![
            Span::raw(format!("{subject:<16} {count:>4}  ")),
            Span::styled("█".repeat(bar_width), Style::default().fg(Color::Cyan)),
        ]));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Statistics "))
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_text = match &app.status_message {
        Some(message) => format!(
            " {} | {} images | {} ",
            view_name(app.current_view),
            app.stats.total_images,
            message
        ),
        None => format!(
            " {} | {} images | [g:Gallery] [f:Filter] [s:Stats] [?:Help] ",
            view_name(app.current_view),
            app.stats.total_images
        ),
    };

    let status_bar = Paragraph::new(status_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

fn view_name(view: View) -> &'static str {
    match view {
        View::Home => "Home",
        View::Gallery => "Gallery",
        View::Filter => "Filter",
        View::Stats => "Stats",
    }
}

/// Render the preview overlay as a centered popup.
pub fn render_preview_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(preview) = &app.preview else {
        return;
    };

    let popup_width = area.width.saturating_sub(10).min(70);
    let popup_height = 9;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" {} — {} ", preview.subject, preview.date),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            " 🖼 {}",
            truncate_middle(&preview.path, popup_width.saturating_sub(6) as usize)
        )),
        Line::from(format!(" ⤓ saves as {}", preview.download_name)),
        Line::from(""),
        Line::from(Span::styled(
            " [o] open full-size   [d] download   [Esc] close ",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Preview ")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Render the help screen overlay.
pub fn render_help_screen(frame: &mut Frame, size: Rect) {
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Views",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("h / 1        Home"),
        Line::from("g / 2        Gallery (newest first)"),
        Line::from("f / 3        Filter"),
        Line::from("s / 4        Statistics"),
        Line::from(""),
        Line::from(Span::styled(
            "Cards",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("↑/↓          Select card"),
        Line::from("Enter / p    Preview overlay"),
        Line::from("o            Open full-size in image viewer"),
        Line::from("d            Download under {subject}_{date} name"),
        Line::from("Esc          Close preview"),
        Line::from(""),
        Line::from(Span::styled(
            "Filtering",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("Tab / S-Tab  Move between fields"),
        Line::from("←/→          Cycle field value"),
        Line::from("Space        Toggle the focused filter group"),
        Line::from("r            Reset all filters"),
        Line::from(""),
        Line::from("r (gallery)  Reload the data file"),
        Line::from("q            Quit"),
    ];

    let width = size.width.saturating_sub(8).min(60);
    let height = (help_text.len() as u16 + 2).min(size.height.saturating_sub(2));
    let x = (size.width.saturating_sub(width)) / 2;
    let y = (size.height.saturating_sub(height)) / 2;
    let popup_area = Rect::new(x, y, width, height);

    let help = Paragraph::new(help_text)
        .block(Block::default().title(" Help ").borders(Borders::ALL))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Shorten long paths from the middle so head and tail stay readable.
fn truncate_middle(text: &str, max_width: usize) -> String {
    if text.width() <= max_width || max_width < 5 {
        return text.to_string();
    }
    let keep = (max_width - 1) / 2;
    let head: String = text.chars().take(keep).collect();
    let tail: String = text
        .chars()
        .rev()
        .take(max_width - keep - 1)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{head}…{tail}")
}
