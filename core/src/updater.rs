//! Collection maintenance: importing image files into the dated folder
//! layout and keeping the JSON in sync. Works on an explicit collection
//! and images root; nothing here touches global state.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::date::parse_note_date;
use crate::error::{Error, Result};
use crate::models::{DateGroup, NoteCollection, SubjectGroup};

/// File extensions accepted by `import_images`, lowercase, without dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

static SUBJECT_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Concise filename prefix for a subject: lowercase letters and digits
/// only. `"Computer Science"` becomes `"computerscience"`.
pub fn normalize_subject_key(subject: &str) -> String {
    SUBJECT_KEY.replace_all(&subject.to_lowercase(), "").into_owned()
}

/// The smallest free `<key><n><ext>` name in `dir`, scanning existing
/// files case-insensitively. A matching file without a trailing number
/// reserves slot 1. `ext` includes the dot.
pub fn next_image_name(dir: &Path, key: &str, ext: &str) -> std::io::Result<String> {
    let mut taken = Vec::new();
    if dir.exists() {
        let pattern = Regex::new(&format!(
            "^{}(\\d+){}$",
            regex::escape(key),
            regex::escape(&ext.to_lowercase())
        ))
        .expect("escaped pattern is valid");

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if let Some(caps) = pattern.captures(&name) {
                if let Ok(n) = caps[1].parse::<u32>() {
                    taken.push(n);
                }
            } else if name.starts_with(key) && name.ends_with(&ext.to_lowercase()) {
                taken.push(1);
            }
        }
    }

    let mut n = 1;
    while taken.contains(&n) {
        n += 1;
    }
    Ok(format!("{key}{n}{ext}"))
}

/// Copy image files into `<images_root>/<date>/` under generated names and
/// record them in the collection, creating the day and subject entries on
/// demand. Sources that do not exist or have unsupported extensions are
/// skipped; already-recorded paths are not duplicated. Returns the
/// relative paths appended to the collection.
pub fn import_images(
    images_root: &Path,
    collection: &mut NoteCollection,
    date: &str,
    subject: &str,
    files: &[PathBuf],
) -> Result<Vec<String>> {
    if parse_note_date(date).is_none() {
        return Err(Error::InvalidInput(format!(
            "\"{date}\" is not a valid DD-MM-YYYY date"
        )));
    }
    if subject.trim().is_empty() {
        return Err(Error::InvalidInput("subject must not be empty".to_string()));
    }

    let date_dir = images_root.join(date);
    let key = normalize_subject_key(subject);
    let root_name = images_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "images".to_string());

    let mut appended = Vec::new();
    for src in files {
        if !src.is_file() {
            continue;
        }
        let ext = match src.extension().and_then(|e| e.to_str()) {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => {
                format!(".{}", ext.to_lowercase())
            }
            _ => continue,
        };

        fs::create_dir_all(&date_dir)?;
        let name = next_image_name(&date_dir, &key, &ext)?;
        fs::copy(src, date_dir.join(&name))?;

        let rel = format!("{root_name}/{date}/{name}");
        let day = ensure_day(collection, date);
        let entry = ensure_subject(day, subject);
        if !entry.images.contains(&rel) {
            entry.images.push(rel.clone());
            appended.push(rel);
        }
    }

    info!(
        "imported {} image(s) for {subject} on {date}",
        appended.len()
    );
    Ok(appended)
}

/// Drop an image reference from the collection. The file itself is left
/// alone. Returns whether anything was removed.
pub fn remove_image(collection: &mut NoteCollection, date: &str, subject: &str, path: &str) -> bool {
    let Some(day) = collection.day_mut(date) else {
        return false;
    };
    let Some(entry) = day.subject_mut(subject) else {
        return false;
    };
    let before = entry.images.len();
    entry.images.retain(|p| p != path);
    entry.images.len() != before
}

fn ensure_day<'a>(collection: &'a mut NoteCollection, date: &str) -> &'a mut DateGroup {
    let idx = match collection.0.iter().position(|d| d.date == date) {
        Some(idx) => idx,
        None => {
            collection.0.push(DateGroup::new(date));
            collection.0.len() - 1
        }
    };
    &mut collection.0[idx]
}

fn ensure_subject<'a>(day: &'a mut DateGroup, subject: &str) -> &'a mut SubjectGroup {
    let idx = match day.subjects.iter().position(|s| s.subject == subject) {
        Some(idx) => idx,
        None => {
            day.subjects.push(SubjectGroup::new(subject));
            day.subjects.len() - 1
        }
    };
    &mut day.subjects[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_subject_key() {
        assert_eq!(normalize_subject_key("Physics"), "physics");
        assert_eq!(normalize_subject_key("Computer Science"), "computerscience");
        assert_eq!(normalize_subject_key("Maths-II (Hons.)"), "mathsiihons");
    }

    #[test]
    fn test_next_image_name_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let name = next_image_name(dir.path(), "phy", ".jpg").unwrap();
        assert_eq!(name, "phy1.jpg");
    }

    #[test]
    fn test_next_image_name_fills_gaps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phy1.jpg"), b"x").unwrap();
        fs::write(dir.path().join("phy3.jpg"), b"x").unwrap();
        let name = next_image_name(dir.path(), "phy", ".jpg").unwrap();
        assert_eq!(name, "phy2.jpg");
    }

    #[test]
    fn test_next_image_name_unnumbered_reserves_one() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("phy.jpg"), b"x").unwrap();
        let name = next_image_name(dir.path(), "phy", ".jpg").unwrap();
        assert_eq!(name, "phy2.jpg");
    }

    #[test]
    fn test_import_rejects_bad_date() {
        let dir = tempfile::tempdir().unwrap();
        let mut collection = NoteCollection::default();
        let err = import_images(dir.path(), &mut collection, "31-02-2024", "Physics", &[]);
        assert!(matches!(err, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_import_copies_and_records() {
        let dir = tempfile::tempdir().unwrap();
        let images_root = dir.path().join("images");
        let src = dir.path().join("scan.JPG");
        fs::write(&src, b"jpeg bytes").unwrap();

        let mut collection = NoteCollection::default();
        let appended = import_images(
            &images_root,
            &mut collection,
            "10-10-2025",
            "Physics",
            &[src],
        )
        .unwrap();

        assert_eq!(appended, vec!["images/10-10-2025/physics1.jpg".to_string()]);
        assert!(images_root.join("10-10-2025/physics1.jpg").exists());
        let day = collection.day("10-10-2025").unwrap();
        assert_eq!(day.subject("Physics").unwrap().images, appended);
    }

    #[test]
    fn test_import_skips_unsupported_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let images_root = dir.path().join("images");
        let text = dir.path().join("notes.txt");
        fs::write(&text, b"not an image").unwrap();
        let missing = dir.path().join("gone.png");

        let mut collection = NoteCollection::default();
        let appended = import_images(
            &images_root,
            &mut collection,
            "10-10-2025",
            "Physics",
            &[text, missing],
        )
        .unwrap();
        assert!(appended.is_empty());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_import_numbers_sequentially() {
        let dir = tempfile::tempdir().unwrap();
        let images_root = dir.path().join("images");
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();

        let mut collection = NoteCollection::default();
        let appended = import_images(
            &images_root,
            &mut collection,
            "10-10-2025",
            "Chemistry",
            &[a, b],
        )
        .unwrap();
        assert_eq!(
            appended,
            vec![
                "images/10-10-2025/chemistry1.png".to_string(),
                "images/10-10-2025/chemistry2.png".to_string(),
            ]
        );
    }

    #[test]
    fn test_remove_image() {
        let mut collection = NoteCollection::new(vec![DateGroup {
            date: "10-10-2025".to_string(),
            subjects: vec![SubjectGroup {
                subject: "Physics".to_string(),
                images: vec!["a.jpg".to_string()],
            }],
        }]);
        assert!(remove_image(&mut collection, "10-10-2025", "Physics", "a.jpg"));
        assert!(!remove_image(&mut collection, "10-10-2025", "Physics", "a.jpg"));
        assert!(collection.day("10-10-2025").unwrap().subjects[0]
            .images
            .is_empty());
    }
}
