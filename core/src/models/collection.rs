use serde::{Deserialize, Serialize};

/// The whole dataset: an ordered list of dated groups, loaded once per
/// session and replaced wholesale on reload. The on-disk form is a plain
/// JSON array, hence the transparent wrapper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NoteCollection(pub Vec<DateGroup>);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateGroup {
    /// Expected `DD-MM-YYYY`. Groups with unparseable dates stay in the
    /// collection but are excluded from date-sorted views.
    pub date: String,
    pub subjects: Vec<SubjectGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectGroup {
    pub subject: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NoteCollection {
    pub fn new(days: Vec<DateGroup>) -> Self {
        Self(days)
    }

    pub fn days(&self) -> &[DateGroup] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of image references across all dates and subjects.
    pub fn image_count(&self) -> usize {
        self.0
            .iter()
            .flat_map(|day| &day.subjects)
            .map(|subject| subject.images.len())
            .sum()
    }

    /// The day entry for an exact date string, if present.
    pub fn day(&self, date: &str) -> Option<&DateGroup> {
        self.0.iter().find(|day| day.date == date)
    }

    pub fn day_mut(&mut self, date: &str) -> Option<&mut DateGroup> {
        self.0.iter_mut().find(|day| day.date == date)
    }
}

impl DateGroup {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            subjects: Vec::new(),
        }
    }

    pub fn subject(&self, name: &str) -> Option<&SubjectGroup> {
        self.subjects.iter().find(|s| s.subject == name)
    }

    pub fn subject_mut(&mut self, name: &str) -> Option<&mut SubjectGroup> {
        self.subjects.iter_mut().find(|s| s.subject == name)
    }
}

impl SubjectGroup {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            images: Vec::new(),
        }
    }
}
