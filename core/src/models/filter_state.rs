/// The two independently toggleable filters and their selected values.
/// Mutated only by user interaction; `reset` returns everything to the
/// all-disabled state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub subject_enabled: bool,
    pub date_enabled: bool,
    pub subject: Option<String>,
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl FilterState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The subject filter only applies when enabled with a non-empty value.
    pub fn subject_selection(&self) -> Option<&str> {
        if !self.subject_enabled {
            return None;
        }
        selected(&self.subject)
    }

    /// The date filter with all three fields unset is inactive even when
    /// the toggle is on.
    pub fn date_selections(&self) -> Option<(Option<&str>, Option<&str>, Option<&str>)> {
        if !self.date_enabled {
            return None;
        }
        let day = selected(&self.day);
        let month = selected(&self.month);
        let year = selected(&self.year);
        if day.is_none() && month.is_none() && year.is_none() {
            return None;
        }
        Some((day, month, year))
    }

    pub fn is_active(&self) -> bool {
        self.subject_selection().is_some() || self.date_selections().is_some()
    }
}

fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inactive() {
        assert!(!FilterState::default().is_active());
    }

    #[test]
    fn test_enabled_without_values_is_inactive() {
        let state = FilterState {
            subject_enabled: true,
            date_enabled: true,
            ..Default::default()
        };
        assert!(state.subject_selection().is_none());
        assert!(state.date_selections().is_none());
        assert!(!state.is_active());
    }

    #[test]
    fn test_empty_string_counts_as_unset() {
        let state = FilterState {
            date_enabled: true,
            day: Some(String::new()),
            month: Some(String::new()),
            year: Some(String::new()),
            ..Default::default()
        };
        assert!(state.date_selections().is_none());
    }

    #[test]
    fn test_value_without_toggle_is_inactive() {
        let state = FilterState {
            subject: Some("Physics".to_string()),
            ..Default::default()
        };
        assert!(state.subject_selection().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FilterState {
            subject_enabled: true,
            date_enabled: true,
            subject: Some("Physics".to_string()),
            month: Some("10".to_string()),
            ..Default::default()
        };
        state.reset();
        assert_eq!(state, FilterState::default());
    }
}
