//! Load/save boundary for the JSON data file. The initial load is the only
//! fallible operation in a session: any failure substitutes the embedded
//! fallback dataset, deterministically and without retry.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::date::parse_note_date;
use crate::error::Result;
use crate::models::{DateGroup, NoteCollection, SubjectGroup};

/// Directory (next to the data file) that receives timestamped backups.
pub const BACKUP_DIR: &str = "backups";

/// The result of loading the data file. `warnings` carries one entry per
/// date group whose date string will be excluded from date-sorted views.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub collection: NoteCollection,
    pub warnings: Vec<String>,
    pub used_fallback: bool,
}

/// Read the collection from `path`, falling back to the embedded sample
/// dataset when the file is missing, unreadable, or malformed. Never
/// surfaces an error to the caller and never leaves the gallery empty.
pub fn load_collection(path: &Path) -> LoadOutcome {
    let (collection, used_fallback) = match read_collection(path) {
        Ok(collection) => {
            info!(
                "loaded {} date groups ({} images) from {}",
                collection.days().len(),
                collection.image_count(),
                path.display()
            );
            (collection, false)
        }
        Err(err) => {
            warn!(
                "failed to load {}: {err}; using embedded fallback dataset",
                path.display()
            );
            (fallback_collection(), true)
        }
    };

    let warnings = validate(&collection);
    for warning in &warnings {
        warn!("{warning}");
    }

    LoadOutcome {
        collection,
        warnings,
        used_fallback,
    }
}

/// Strict read, used by tooling that must not fall back (e.g. edits that
/// would otherwise overwrite the data file with the sample set).
pub fn read_collection(path: &Path) -> Result<NoteCollection> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// One warning per date group whose date string does not parse. Such
/// groups stay in the collection but drop out of the sorted gallery and
/// the oldest/newest statistics.
pub fn validate(collection: &NoteCollection) -> Vec<String> {
    collection
        .days()
        .iter()
        .filter(|day| parse_note_date(&day.date).is_none())
        .map(|day| {
            format!(
                "date group \"{}\" is not a valid DD-MM-YYYY date; it will be hidden from date-sorted views",
                day.date
            )
        })
        .collect()
}

/// Write the collection back as pretty-printed JSON.
pub fn save_collection(path: &Path, collection: &NoteCollection) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)?;
    fs::write(path, json)?;
    Ok(())
}

/// Copy the data file into `backups/info_backup_<timestamp>.json` next to
/// it. Returns the backup path, or `None` when there is no file to back up.
pub fn backup_collection(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let dest = backup_dir.join(format!("info_backup_{timestamp}.json"));
    fs::copy(path, &dest)?;
    info!("backed up {} to {}", path.display(), dest.display());
    Ok(Some(dest))
}

/// The embedded sample dataset used when the data file cannot be read.
pub fn fallback_collection() -> NoteCollection {
    NoteCollection::new(vec![
        DateGroup {
            date: "10-10-2025".to_string(),
            subjects: vec![
                SubjectGroup {
                    subject: "Physics".to_string(),
                    images: vec![
                        "images/10-10-2025/phy1.jpg".to_string(),
                        "images/10-10-2025/phy2.jpg".to_string(),
                    ],
                },
                SubjectGroup {
                    subject: "Chemistry".to_string(),
                    images: vec!["images/10-10-2025/chem1.jpg".to_string()],
                },
            ],
        },
        DateGroup {
            date: "11-10-2025".to_string(),
            subjects: vec![
                SubjectGroup {
                    subject: "Biology".to_string(),
                    images: vec!["images/11-10-2025/bio1.jpg".to_string()],
                },
                SubjectGroup {
                    subject: "Physics".to_string(),
                    images: vec!["images/11-10-2025/phy1.jpg".to_string()],
                },
            ],
        },
    ])
}
