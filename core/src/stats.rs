use std::collections::HashSet;

use crate::date::parse_note_date;
use crate::models::FlatRecord;

/// Placeholder shown when no record carries a parseable date.
pub const NO_DATE: &str = "N/A";

/// Aggregate counts over the flattened collection. Always computed from
/// the unfiltered data; statistics are global, not filter-aware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_images: usize,
    pub unique_subjects: usize,
    pub unique_dates: usize,
    pub oldest_date: String,
    pub newest_date: String,
    /// Subject → image count, in first-occurrence order.
    pub subject_breakdown: Vec<(String, usize)>,
}

impl Stats {
    /// The breakdown sorted descending by count; ties keep
    /// first-occurrence order (stable sort).
    pub fn breakdown_sorted(&self) -> Vec<(String, usize)> {
        let mut sorted = self.subject_breakdown.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

pub fn compute_stats(records: &[FlatRecord]) -> Stats {
    let mut subjects_seen = HashSet::new();
    let mut dates_seen = HashSet::new();
    let mut breakdown: Vec<(String, usize)> = Vec::new();

    for record in records {
        subjects_seen.insert(record.subject.as_str());
        dates_seen.insert(record.date.as_str());
        match breakdown.iter_mut().find(|(s, _)| *s == record.subject) {
            Some((_, count)) => *count += 1,
            None => breakdown.push((record.subject.clone(), 1)),
        }
    }

    // Distinct dates in first-occurrence order, parseable ones only,
    // stable-sorted ascending by timestamp.
    let mut distinct = Vec::new();
    let mut seen = HashSet::new();
    for record in records {
        if seen.insert(record.date.as_str()) {
            if let Some(parsed) = parse_note_date(&record.date) {
                distinct.push(parsed);
            }
        }
    }
    distinct.sort_by_key(|d| d.timestamp_ms);

    let oldest_date = distinct
        .first()
        .map(|d| d.original.clone())
        .unwrap_or_else(|| NO_DATE.to_string());
    let newest_date = distinct
        .last()
        .map(|d| d.original.clone())
        .unwrap_or_else(|| NO_DATE.to_string());

    Stats {
        total_images: records.len(),
        unique_subjects: subjects_seen.len(),
        unique_dates: dates_seen.len(),
        oldest_date,
        newest_date,
        subject_breakdown: breakdown,
    }
}
