use crate::date::date_components;
use crate::models::{FilterState, NoteCollection};

/// Apply the subject and date filters to the collection, producing a new
/// collection of the same shape. Never mutates the input and never
/// reorders; groups and images are only removed.
///
/// Date matching is exact string equality on the raw `DD-MM-YYYY`
/// components, so `"5"` and `"05"` are distinct selections, matching how
/// the data file spells its dates.
pub fn apply_filters(collection: &NoteCollection, state: &FilterState) -> NoteCollection {
    if !state.is_active() {
        return collection.clone();
    }

    let date_selections = state.date_selections();
    let subject_selection = state.subject_selection();

    let days = collection
        .days()
        .iter()
        .filter(|day| match date_selections {
            Some((want_day, want_month, want_year)) => {
                match date_components(&day.date) {
                    Some([d, m, y]) => {
                        want_day.map_or(true, |w| w == d)
                            && want_month.map_or(true, |w| w == m)
                            && want_year.map_or(true, |w| w == y)
                    }
                    // A date that does not split into three components can
                    // never match an active date filter.
                    None => false,
                }
            }
            None => true,
        })
        .filter_map(|day| match subject_selection {
            Some(want) => {
                let mut kept = day.clone();
                kept.subjects.retain(|s| s.subject == want);
                if kept.subjects.is_empty() {
                    None
                } else {
                    Some(kept)
                }
            }
            None => Some(day.clone()),
        })
        .collect();

    NoteCollection::new(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateGroup, SubjectGroup};

    fn sample() -> NoteCollection {
        NoteCollection::new(vec![
            DateGroup {
                date: "10-10-2025".to_string(),
                subjects: vec![SubjectGroup {
                    subject: "Chemistry".to_string(),
                    images: vec!["a.jpg".to_string()],
                }],
            },
            DateGroup {
                date: "11-10-2025".to_string(),
                subjects: vec![SubjectGroup {
                    subject: "Physics".to_string(),
                    images: vec!["b.jpg".to_string(), "c.jpg".to_string()],
                }],
            },
        ])
    }

    #[test]
    fn test_inactive_filters_return_input_unchanged() {
        let collection = sample();
        let filtered = apply_filters(&collection, &FilterState::default());
        assert_eq!(filtered, collection);
    }

    #[test]
    fn test_subject_filter_keeps_only_matching_groups() {
        let state = FilterState {
            subject_enabled: true,
            subject: Some("Physics".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &state);
        assert_eq!(filtered.days().len(), 1);
        assert_eq!(filtered.days()[0].date, "11-10-2025");
        assert_eq!(filtered.days()[0].subjects.len(), 1);
        assert_eq!(filtered.days()[0].subjects[0].images.len(), 2);
    }

    #[test]
    fn test_month_filter_with_other_fields_empty() {
        let state = FilterState {
            date_enabled: true,
            month: Some("10".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &state);
        assert_eq!(filtered.days().len(), 2);
    }

    #[test]
    fn test_day_filter_drops_non_matching_groups() {
        let state = FilterState {
            date_enabled: true,
            day: Some("11".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &state);
        assert_eq!(filtered.days().len(), 1);
        assert_eq!(filtered.days()[0].date, "11-10-2025");
    }

    #[test]
    fn test_string_equality_not_numeric() {
        // "1" does not match the zero-padded "10" or "11" day components,
        // and neither does it match "01"-style padding in the data.
        let state = FilterState {
            date_enabled: true,
            day: Some("1".to_string()),
            ..Default::default()
        };
        assert!(apply_filters(&sample(), &state).is_empty());
    }

    #[test]
    fn test_combined_filters() {
        let state = FilterState {
            subject_enabled: true,
            date_enabled: true,
            subject: Some("Chemistry".to_string()),
            month: Some("10".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&sample(), &state);
        assert_eq!(filtered.days().len(), 1);
        assert_eq!(filtered.days()[0].subjects[0].subject, "Chemistry");
    }

    #[test]
    fn test_unparseable_date_never_matches_active_date_filter() {
        let mut collection = sample();
        collection = NoteCollection::new(
            collection
                .days()
                .iter()
                .cloned()
                .chain(std::iter::once(DateGroup {
                    date: "garbage".to_string(),
                    subjects: vec![SubjectGroup::new("Physics")],
                }))
                .collect(),
        );
        let state = FilterState {
            date_enabled: true,
            year: Some("2025".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&collection, &state);
        assert!(filtered.days().iter().all(|d| d.date != "garbage"));
    }

    #[test]
    fn test_idempotent() {
        let state = FilterState {
            subject_enabled: true,
            date_enabled: true,
            subject: Some("Physics".to_string()),
            year: Some("2025".to_string()),
            ..Default::default()
        };
        let once = apply_filters(&sample(), &state);
        let twice = apply_filters(&once, &state);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_never_increases_image_count() {
        let collection = sample();
        let state = FilterState {
            subject_enabled: true,
            subject: Some("Physics".to_string()),
            ..Default::default()
        };
        let filtered = apply_filters(&collection, &state);
        assert!(filtered.image_count() <= collection.image_count());
    }
}
