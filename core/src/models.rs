mod collection;
mod filter_state;
mod record;

pub use collection::{DateGroup, NoteCollection, SubjectGroup};
pub use filter_state::FilterState;
pub use record::FlatRecord;
