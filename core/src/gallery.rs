//! Grouped view model for the gallery: the collection reshaped into the
//! date → subject → card tree the renderer walks, newest date first.

use std::path::Path;

use crate::date::{parse_note_date, ParsedDate};
use crate::models::NoteCollection;

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub sections: Vec<DateSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateSection {
    pub date: ParsedDate,
    pub subjects: Vec<SubjectSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSection {
    pub subject: String,
    pub cards: Vec<ImageCard>,
}

/// One image with the filename a download of it should use.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCard {
    pub path: String,
    pub download_name: String,
}

impl GalleryView {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of cards across all sections.
    pub fn card_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.subjects)
            .map(|s| s.cards.len())
            .sum()
    }

    /// Cards in display order, paired with their section and subject
    /// indices. The view layer's cursor indexes into this.
    pub fn cards(&self) -> impl Iterator<Item = (usize, usize, &ImageCard)> {
        self.sections.iter().enumerate().flat_map(|(di, section)| {
            section
                .subjects
                .iter()
                .enumerate()
                .flat_map(move |(si, subject)| {
                    subject.cards.iter().map(move |card| (di, si, card))
                })
        })
    }
}

/// Build the grouped gallery view: date sections sorted descending by
/// parsed timestamp (newest first), subjects and images in insertion
/// order. Groups whose date does not parse are left out of this view;
/// the store already reported them as warnings at load time.
pub fn build_gallery(collection: &NoteCollection) -> GalleryView {
    let mut sections: Vec<DateSection> = collection
        .days()
        .iter()
        .filter_map(|day| {
            let date = parse_note_date(&day.date)?;
            let subjects = day
                .subjects
                .iter()
                .map(|subject| SubjectSection {
                    subject: subject.subject.clone(),
                    cards: subject
                        .images
                        .iter()
                        .map(|path| ImageCard {
                            path: path.clone(),
                            download_name: download_name(&subject.subject, &day.date, path),
                        })
                        .collect(),
                })
                .collect();
            Some(DateSection { date, subjects })
        })
        .collect();

    sections.sort_by(|a, b| b.date.timestamp_ms.cmp(&a.date.timestamp_ms));
    GalleryView { sections }
}

/// `{subject}_{date}` plus the source path's extension when it has one.
fn download_name(subject: &str, date: &str, path: &str) -> String {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{subject}_{date}.{ext}"),
        None => format!("{subject}_{date}"),
    }
}
