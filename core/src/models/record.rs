/// One image reference with its date and subject context. Derived from the
/// collection, never stored; recomputed whenever the collection changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    pub date: String,
    pub subject: String,
    pub path: String,
}
