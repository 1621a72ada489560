use crate::models::{FlatRecord, NoteCollection};

/// Expand the nested collection into one record per image reference.
/// Output order is the collection's own iteration order: dates, then
/// subjects, then images. Pure; recomputed whenever the collection changes.
pub fn flatten(collection: &NoteCollection) -> Vec<FlatRecord> {
    let mut records = Vec::with_capacity(collection.image_count());
    for day in collection.days() {
        for subject in &day.subjects {
            for path in &subject.images {
                records.push(FlatRecord {
                    date: day.date.clone(),
                    subject: subject.subject.clone(),
                    path: path.clone(),
                });
            }
        }
    }
    records
}
