use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use log::warn;
use notefolio_core::date::date_components;
use notefolio_core::filter::apply_filters;
use notefolio_core::flatten::flatten;
use notefolio_core::gallery::{build_gallery, GalleryView};
use notefolio_core::models::{FilterState, FlatRecord, NoteCollection};
use notefolio_core::stats::{compute_stats, Stats};
use notefolio_core::store;

use crate::config::{load_config, Config};

/// The fixed set of views; exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Gallery,
    Filter,
    Stats,
}

/// Filter-panel field focus order: subject, day, month, year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Subject,
    Day,
    Month,
    Year,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::Subject => Self::Day,
            Self::Day => Self::Month,
            Self::Month => Self::Year,
            Self::Year => Self::Subject,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Subject => Self::Year,
            Self::Day => Self::Subject,
            Self::Month => Self::Day,
            Self::Year => Self::Month,
        }
    }
}

/// What the preview overlay is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewState {
    pub date: String,
    pub subject: String,
    pub path: String,
    pub download_name: String,
}

/// Grace period between closing the preview and releasing its image
/// source, so the close can finish visually before the slot is reused.
pub const PREVIEW_CLEAR_DELAY: Duration = Duration::from_millis(300);

/// Application state. Everything the views read lives here explicitly;
/// there is no module-level mutable state.
pub struct App {
    pub should_quit: bool,
    pub current_view: View,

    // Data, derived wholesale from the collection on load/reload.
    pub collection: NoteCollection,
    pub records: Vec<FlatRecord>,
    pub stats: Stats,
    pub load_warnings: Vec<String>,
    pub used_fallback: bool,

    // Filtering and the gallery built for the current view.
    pub filter: FilterState,
    pub gallery: GalleryView,
    pub filter_focus: FilterField,
    pub subject_options: Vec<String>,
    pub day_options: Vec<String>,
    pub month_options: Vec<String>,
    pub year_options: Vec<String>,

    // Card selection.
    pub cursor: usize,
    pub scroll_offset: usize,

    // Preview overlay.
    pub preview_open: bool,
    pub preview: Option<PreviewState>,
    preview_clear_at: Option<Instant>,

    pub help_open: bool,
    pub status_message: Option<String>,

    pub data_path: PathBuf,
    pub downloads_dir: PathBuf,
    pub config: Config,
}

impl App {
    pub fn new(data_path: &Path) -> Result<Self> {
        let parent = data_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let config = load_config(&parent.join("config.toml"));
        let downloads_dir = parent.join("downloads");

        let outcome = store::load_collection(data_path);
        let mut app = Self {
            should_quit: false,
            current_view: View::Home,
            collection: NoteCollection::default(),
            records: Vec::new(),
            stats: compute_stats(&[]),
            load_warnings: outcome.warnings,
            used_fallback: outcome.used_fallback,
            filter: FilterState::default(),
            gallery: build_gallery(&outcome.collection),
            filter_focus: FilterField::Subject,
            subject_options: Vec::new(),
            day_options: Vec::new(),
            month_options: Vec::new(),
            year_options: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            preview_open: false,
            preview: None,
            preview_clear_at: None,
            help_open: false,
            status_message: None,
            data_path: data_path.to_path_buf(),
            downloads_dir,
            config,
        };
        app.replace_collection(outcome.collection);
        Ok(app)
    }

    /// Swap in a new collection and recompute everything derived from it.
    fn replace_collection(&mut self, collection: NoteCollection) {
        self.collection = collection;
        self.records = flatten(&self.collection);
        self.stats = compute_stats(&self.records);
        self.refresh_filter_options();
        self.rebuild_gallery();
    }

    /// Reload the data file from disk, replacing the collection wholesale.
    pub fn reload(&mut self) {
        let outcome = store::load_collection(&self.data_path);
        self.load_warnings = outcome.warnings;
        self.used_fallback = outcome.used_fallback;
        self.replace_collection(outcome.collection);
        self.status_message = Some(format!(
            "reloaded {} ({} images)",
            self.data_path.display(),
            self.collection.image_count()
        ));
    }

    /// Switch the visible view. Entering the filter view re-runs the
    /// filter engine; entering the gallery rebuilds from the full
    /// collection. No other transition has side effects.
    pub fn show_view(&mut self, view: View) {
        self.current_view = view;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.rebuild_gallery();
    }

    fn rebuild_gallery(&mut self) {
        self.gallery = match self.current_view {
            View::Filter => build_gallery(&apply_filters(&self.collection, &self.filter)),
            _ => build_gallery(&self.collection),
        };
        let last = self.gallery.card_count().saturating_sub(1);
        if self.cursor > last {
            self.cursor = last;
        }
    }

    /// Re-run the filter engine against the current state; called after
    /// every filter mutation while the filter view is visible.
    pub fn apply_current_filter(&mut self) {
        self.rebuild_gallery();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.apply_current_filter();
        self.status_message = Some("filters reset".to_string());
    }

    pub fn toggle_subject_filter(&mut self) {
        self.filter.subject_enabled = !self.filter.subject_enabled;
        self.apply_current_filter();
    }

    pub fn toggle_date_filter(&mut self) {
        self.filter.date_enabled = !self.filter.date_enabled;
        self.apply_current_filter();
    }

    /// Toggle the filter group the focused field belongs to.
    pub fn toggle_focused_filter(&mut self) {
        match self.filter_focus {
            FilterField::Subject => self.toggle_subject_filter(),
            _ => self.toggle_date_filter(),
        }
    }

    pub fn focus_next_field(&mut self) {
        self.filter_focus = self.filter_focus.next();
    }

    pub fn focus_prev_field(&mut self) {
        self.filter_focus = self.filter_focus.prev();
    }

    /// Step the focused field through its options; position zero is the
    /// unset "any" selection.
    pub fn cycle_focused_value(&mut self, delta: i32) {
        let (value, options) = match self.filter_focus {
            FilterField::Subject => (&mut self.filter.subject, &self.subject_options),
            FilterField::Day => (&mut self.filter.day, &self.day_options),
            FilterField::Month => (&mut self.filter.month, &self.month_options),
            FilterField::Year => (&mut self.filter.year, &self.year_options),
        };
        *value = cycle_option(value.as_deref(), options, delta);
        self.apply_current_filter();
    }

    /// Dropdown option lists, derived from the loaded data: unique
    /// subjects and the raw date components actually present.
    fn refresh_filter_options(&mut self) {
        let mut subjects = Vec::new();
        for day in self.collection.days() {
            for subject in &day.subjects {
                if !subjects.contains(&subject.subject) {
                    subjects.push(subject.subject.clone());
                }
            }
        }
        subjects.sort();

        let mut days = Vec::new();
        let mut months = Vec::new();
        let mut years = Vec::new();
        for day in self.collection.days() {
            if let Some([d, m, y]) = date_components(&day.date) {
                push_unique(&mut days, d);
                push_unique(&mut months, m);
                push_unique(&mut years, y);
            }
        }
        days.sort();
        months.sort();
        years.sort();

        self.subject_options = subjects;
        self.day_options = days;
        self.month_options = months;
        self.year_options = years;
    }

    // =========================
    // Card selection & actions
    // =========================

    pub fn selected_card(&self) -> Option<PreviewState> {
        let (section_idx, subject_idx, card) = self.gallery.cards().nth(self.cursor)?;
        let section = &self.gallery.sections[section_idx];
        Some(PreviewState {
            date: section.date.original.clone(),
            subject: section.subjects[subject_idx].subject.clone(),
            path: card.path.clone(),
            download_name: card.download_name.clone(),
        })
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.scroll_offset {
                self.scroll_offset = self.cursor;
            }
        }
    }

    pub fn move_cursor_down(&mut self) {
        let last = self.gallery.card_count().saturating_sub(1);
        if self.cursor < last {
            self.cursor += 1;
        }
    }

    /// Image paths in the data file are relative to the data file's
    /// directory.
    pub fn resolve_image_path(&self, path: &str) -> PathBuf {
        match self.data_path.parent() {
            Some(parent) => parent.join(path),
            None => PathBuf::from(path),
        }
    }

    /// Open the selected image full-size with the OS default viewer.
    pub fn open_selected(&mut self) {
        if let Some(card) = self.selected_card() {
            let full = self.resolve_image_path(&card.path);
            if let Err(err) = opener::open(&full) {
                warn!("failed to open {}: {err}", full.display());
                self.status_message = Some(format!("could not open {}", card.path));
            }
        }
    }

    /// Copy the selected image into the downloads directory under its
    /// derived `{subject}_{date}` filename.
    pub fn download_selected(&mut self) {
        let Some(card) = self.selected_card() else {
            return;
        };
        let src = self.resolve_image_path(&card.path);
        let dest = self.downloads_dir.join(&card.download_name);
        let result = fs::create_dir_all(&self.downloads_dir).and_then(|_| fs::copy(&src, &dest));
        match result {
            Ok(_) => {
                self.status_message = Some(format!("saved {}", card.download_name));
            }
            Err(err) => {
                warn!("download of {} failed: {err}", src.display());
                self.status_message = Some(format!("could not save {}", card.download_name));
            }
        }
    }

    // =========================
    // Preview overlay
    // =========================

    /// Open (or re-open) the preview for the selected card. Reopening
    /// cancels any pending deferred clear; last writer wins on the image
    /// source.
    pub fn open_preview(&mut self) {
        if let Some(card) = self.selected_card() {
            self.preview = Some(card);
            self.preview_open = true;
            self.preview_clear_at = None;
        }
    }

    pub fn close_preview(&mut self) {
        self.close_preview_at(Instant::now());
    }

    /// Hide the overlay but keep its image source until a later tick, so
    /// the close settles before the slot is released.
    pub fn close_preview_at(&mut self, now: Instant) {
        if self.preview_open {
            self.preview_open = false;
            self.preview_clear_at = Some(now + PREVIEW_CLEAR_DELAY);
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if !self.preview_open {
            if let Some(deadline) = self.preview_clear_at {
                if now >= deadline {
                    self.preview = None;
                    self.preview_clear_at = None;
                }
            }
        }
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Step through `None, options[0], options[1], …` wrapping at both ends.
fn cycle_option(current: Option<&str>, options: &[String], delta: i32) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    // Position 0 is "unset"; options occupy 1..=len.
    let len = options.len() as i32 + 1;
    let pos = match current {
        None => 0,
        Some(value) => options
            .iter()
            .position(|o| o == value)
            .map(|i| i as i32 + 1)
            .unwrap_or(0),
    };
    let next = (pos + delta).rem_euclid(len);
    if next == 0 {
        None
    } else {
        Some(options[(next - 1) as usize].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notefolio_core::models::{DateGroup, SubjectGroup};
    use notefolio_core::store::save_collection;

    fn sample() -> NoteCollection {
        NoteCollection::new(vec![
            DateGroup {
                date: "10-10-2025".to_string(),
                subjects: vec![SubjectGroup {
                    subject: "Chemistry".to_string(),
                    images: vec!["images/10-10-2025/chem1.jpg".to_string()],
                }],
            },
            DateGroup {
                date: "11-10-2025".to_string(),
                subjects: vec![SubjectGroup {
                    subject: "Physics".to_string(),
                    images: vec![
                        "images/11-10-2025/phy1.jpg".to_string(),
                        "images/11-10-2025/phy2.jpg".to_string(),
                    ],
                }],
            },
        ])
    }

    fn app_with_sample() -> App {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.json");
        save_collection(&path, &sample()).unwrap();
        App::new(&path).unwrap()
    }

    #[test]
    fn test_new_loads_and_derives() {
        let app = app_with_sample();
        assert_eq!(app.current_view, View::Home);
        assert!(!app.used_fallback);
        assert_eq!(app.records.len(), 3);
        assert_eq!(app.stats.total_images, 3);
        assert_eq!(app.subject_options, vec!["Chemistry", "Physics"]);
        assert_eq!(app.year_options, vec!["2025"]);
    }

    #[test]
    fn test_missing_file_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(&dir.path().join("missing.json")).unwrap();
        assert!(app.used_fallback);
        assert!(app.stats.total_images > 0);
    }

    #[test]
    fn test_entering_filter_view_applies_filter() {
        let mut app = app_with_sample();
        app.filter.subject_enabled = true;
        app.filter.subject = Some("Physics".to_string());

        app.show_view(View::Filter);
        assert_eq!(app.gallery.card_count(), 2);

        // Entering the gallery rebuilds from the full collection.
        app.show_view(View::Gallery);
        assert_eq!(app.gallery.card_count(), 3);
    }

    #[test]
    fn test_filter_changes_rerun_synchronously() {
        let mut app = app_with_sample();
        app.show_view(View::Filter);
        assert_eq!(app.gallery.card_count(), 3);

        app.filter_focus = FilterField::Subject;
        app.toggle_focused_filter();
        app.cycle_focused_value(1); // Chemistry (first option)
        assert_eq!(app.gallery.card_count(), 1);

        app.reset_filters();
        assert_eq!(app.gallery.card_count(), 3);
        assert_eq!(app.filter, FilterState::default());
    }

    #[test]
    fn test_cycle_option_wraps_through_unset() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(cycle_option(None, &options, 1).as_deref(), Some("a"));
        assert_eq!(cycle_option(Some("a"), &options, 1).as_deref(), Some("b"));
        assert_eq!(cycle_option(Some("b"), &options, 1), None);
        assert_eq!(cycle_option(None, &options, -1).as_deref(), Some("b"));
        assert_eq!(cycle_option(None, &[], 1), None);
    }

    #[test]
    fn test_cursor_selects_newest_first() {
        let mut app = app_with_sample();
        app.show_view(View::Gallery);
        let card = app.selected_card().unwrap();
        // Newest date (11-10-2025) renders first.
        assert_eq!(card.date, "11-10-2025");
        assert_eq!(card.subject, "Physics");
        assert_eq!(card.download_name, "Physics_11-10-2025.jpg");

        app.move_cursor_down();
        app.move_cursor_down();
        let last = app.selected_card().unwrap();
        assert_eq!(last.subject, "Chemistry");

        // Saturates at the last card.
        app.move_cursor_down();
        assert_eq!(app.selected_card().unwrap().subject, "Chemistry");
    }

    #[test]
    fn test_preview_clear_is_deferred() {
        let mut app = app_with_sample();
        app.show_view(View::Gallery);
        app.open_preview();
        assert!(app.preview_open);

        let t0 = Instant::now();
        app.close_preview_at(t0);
        assert!(!app.preview_open);
        // Source survives the close until the delay elapses.
        app.tick_at(t0 + Duration::from_millis(1));
        assert!(app.preview.is_some());
        app.tick_at(t0 + PREVIEW_CLEAR_DELAY);
        assert!(app.preview.is_none());
    }

    #[test]
    fn test_reopening_preview_supersedes_pending_clear() {
        let mut app = app_with_sample();
        app.show_view(View::Gallery);
        app.open_preview();

        let t0 = Instant::now();
        app.close_preview_at(t0);
        app.open_preview();
        // The pending clear was cancelled by the reopen.
        app.tick_at(t0 + PREVIEW_CLEAR_DELAY * 2);
        assert!(app.preview.is_some());
        assert!(app.preview_open);
    }

    #[test]
    fn test_reload_replaces_collection_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("info.json");
        save_collection(&path, &sample()).unwrap();
        let mut app = App::new(&path).unwrap();
        assert_eq!(app.stats.total_images, 3);

        let smaller = NoteCollection::new(vec![DateGroup {
            date: "01-01-2024".to_string(),
            subjects: vec![SubjectGroup {
                subject: "Biology".to_string(),
                images: vec!["b.jpg".to_string()],
            }],
        }]);
        save_collection(&path, &smaller).unwrap();
        app.reload();
        assert_eq!(app.stats.total_images, 1);
        assert_eq!(app.subject_options, vec!["Biology"]);
    }
}
