//! Per-path study records and the JSON document they are persisted in.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, Subject, TopicMap},
    error::StoreError,
};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 10.0;

/// Shown in place of a rating for topics never rated.
pub const UNRATED: &str = "-";

/// Rounds to the one-decimal precision ratings are displayed with.
pub fn round_rating(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) => format!("{:.1}", r),
        None => UNRATED.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomTopics {
    #[serde(default)]
    pub math: TopicMap,
    #[serde(default)]
    pub reading: TopicMap,
}

impl CustomTopics {
    fn take(&mut self, subject: Subject) -> TopicMap {
        match subject {
            Subject::Math => std::mem::take(&mut self.math),
            Subject::Reading => std::mem::take(&mut self.reading),
        }
    }
}

/// On-disk shape: `{ratings, notes, custom_topics: {math, reading}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyDocument {
    #[serde(default)]
    pub ratings: IndexMap<String, f64>,
    #[serde(default)]
    pub notes: IndexMap<String, String>,
    #[serde(default)]
    pub custom_topics: CustomTopics,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyStore {
    ratings: IndexMap<String, f64>,
    notes: IndexMap<String, String>,
}

impl StudyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` means the path has never been rated.
    pub fn rating(&self, path: &str) -> Option<f64> {
        self.ratings.get(path).copied()
    }

    /// Stores the rating rounded to one decimal and returns what was stored.
    /// Bounds are the caller's business; non-finite values cannot be written
    /// to JSON and are dropped.
    pub fn set_rating(&mut self, path: &str, value: f64) -> Option<f64> {
        if !value.is_finite() {
            tracing::warn!(path, value, "ignoring non-finite rating");
            return None;
        }
        let rating = round_rating(value);
        self.ratings.insert(path.to_string(), rating);
        tracing::debug!(path, rating, "rating set");
        Some(rating)
    }

    /// Empty when the path has no note.
    pub fn note(&self, path: &str) -> &str {
        self.notes.get(path).map(String::as_str).unwrap_or("")
    }

    /// Overwrites the note. Blank text never clears an existing note;
    /// returns whether anything was stored.
    pub fn set_note(&mut self, path: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.notes.insert(path.to_string(), text.to_string());
        true
    }

    pub fn ratings(&self) -> &IndexMap<String, f64> {
        &self.ratings
    }

    pub fn notes(&self) -> &IndexMap<String, String> {
        &self.notes
    }

    /// Snapshot of the records plus the full live catalog of both subjects.
    pub fn serialize(&self, catalog: &Catalog) -> StudyDocument {
        StudyDocument {
            ratings: self.ratings.clone(),
            notes: self.notes.clone(),
            custom_topics: CustomTopics {
                math: catalog.topics(Subject::Math).clone(),
                reading: catalog.topics(Subject::Reading).clone(),
            },
        }
    }

    /// Replaces ratings and notes wholesale and merges the document's
    /// topics into `catalog`, last-loaded winning on name clashes.
    pub fn deserialize(&mut self, mut doc: StudyDocument, catalog: &mut Catalog) {
        self.ratings = doc.ratings;
        self.notes = doc.notes;
        for subject in Subject::ALL {
            catalog.merge_topics(subject, doc.custom_topics.take(subject));
        }
    }
}

/// The single JSON file holding a [`StudyDocument`].
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a first run and yields an empty document.
    pub fn read(&self) -> Result<StudyDocument, StoreError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no data file yet, starting empty");
            return Ok(StudyDocument::default());
        }
        let s = fs::read_to_string(&self.path).map_err(|e| StoreError::load(&self.path, e))?;
        let doc: StudyDocument =
            serde_json::from_str(&s).map_err(|e| StoreError::load(&self.path, e))?;
        tracing::info!(
            path = %self.path.display(),
            ratings = doc.ratings.len(),
            notes = doc.notes.len(),
            "loaded study data"
        );
        Ok(doc)
    }

    pub fn write(&self, doc: &StudyDocument) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::save(&self.path, e))?;
        }
        let mut buf = Vec::new();
        let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
        doc.serialize(&mut ser)
            .map_err(|e| StoreError::save(&self.path, e))?;
        fs::write(&self.path, buf).map_err(|e| StoreError::save(&self.path, e))?;
        tracing::info!(path = %self.path.display(), "saved study data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::topic_path;

    const LINEAR: &str = "Math - Heart of Algebra - Linear Equations";

    #[test]
    fn rating_is_rounded_to_one_decimal() {
        let mut s = StudyStore::new();
        assert_eq!(s.rating(LINEAR), None);
        assert_eq!(s.set_rating(LINEAR, 7.4567), Some(7.5));
        assert_eq!(s.rating(LINEAR), Some(7.5));
        s.set_rating(LINEAR, 3.0);
        assert_eq!(s.rating(LINEAR), Some(3.0));
    }

    #[test]
    fn rating_is_not_range_checked() {
        let mut s = StudyStore::new();
        assert_eq!(s.set_rating(LINEAR, 12.0), Some(12.0));
    }

    #[test]
    fn non_finite_rating_is_dropped() {
        let mut s = StudyStore::new();
        assert_eq!(s.set_rating(LINEAR, f64::NAN), None);
        assert_eq!(s.rating(LINEAR), None);
    }

    #[test]
    fn blank_note_does_not_erase() {
        let mut s = StudyStore::new();
        assert_eq!(s.note(LINEAR), "");
        assert!(s.set_note(LINEAR, "hello"));
        assert!(!s.set_note(LINEAR, ""));
        assert!(!s.set_note(LINEAR, "  \n\t"));
        assert_eq!(s.note(LINEAR), "hello");
        assert!(s.set_note(LINEAR, "bye"));
        assert_eq!(s.note(LINEAR), "bye");
    }

    #[test]
    fn format_rating_uses_dash_for_unrated() {
        assert_eq!(format_rating(None), "-");
        assert_eq!(format_rating(Some(7.0)), "7.0");
        assert_eq!(format_rating(Some(7.24)), "7.2");
    }

    #[test]
    fn serialize_then_deserialize_round_trips() {
        let mut catalog = Catalog::builtin();
        catalog.add_topic(Subject::Math, "NewAlgebra");
        catalog.add_subtopic(Subject::Math, "NewAlgebra", "Exponents");
        let mut s = StudyStore::new();
        s.set_rating(LINEAR, 7.5);
        s.set_note(LINEAR, "review slope");
        s.set_rating("Math - Orphaned", 2.0);

        let doc = s.serialize(&catalog);
        let mut fresh_catalog = Catalog::builtin();
        let mut restored = StudyStore::new();
        restored.deserialize(doc.clone(), &mut fresh_catalog);
        assert_eq!(restored, s);
        assert_eq!(fresh_catalog, catalog);

        // merging the same document again must not duplicate topics
        restored.deserialize(doc, &mut fresh_catalog);
        assert_eq!(fresh_catalog, catalog);
    }

    #[test]
    fn deserialize_replaces_records() {
        let mut catalog = Catalog::builtin();
        let mut s = StudyStore::new();
        s.set_rating("Reading - Words in Context", 4.0);
        let mut doc = StudyDocument::default();
        doc.notes.insert(LINEAR.into(), "n".into());
        s.deserialize(doc, &mut catalog);
        assert!(s.ratings().is_empty());
        assert_eq!(s.note(LINEAR), "n");
    }

    #[test]
    fn document_uses_expected_keys() {
        let catalog = Catalog::builtin();
        let mut s = StudyStore::new();
        s.set_rating(&topic_path(Subject::Reading, ["Words in Context"]), 6.0);
        let v = serde_json::to_value(s.serialize(&catalog)).unwrap();
        assert_eq!(v["ratings"]["Reading - Words in Context"], 6.0);
        assert!(v["notes"].as_object().unwrap().is_empty());
        assert!(v["custom_topics"]["math"]["Heart of Algebra"]["Linear Equations"]["key_concepts"]
            .is_array());
        for subject in Subject::ALL {
            assert!(v["custom_topics"][subject.storage_key()].is_object());
        }
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc: StudyDocument = serde_json::from_str(r#"{"ratings": {"Math": 3}}"#).unwrap();
        assert_eq!(doc.ratings["Math"], 3.0);
        assert!(doc.notes.is_empty());
        assert!(doc.custom_topics.math.is_empty());
    }

    #[test]
    fn data_file_round_trip_with_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let file = DataFile::new(dir.path().join("nested").join("data.json"));
        assert_eq!(file.read().unwrap(), StudyDocument::default());

        let mut doc = StudyDocument::default();
        doc.ratings.insert(LINEAR.into(), 7.5);
        file.write(&doc).unwrap();
        let raw = fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("\n    \"ratings\": {"));
        assert_eq!(file.read().unwrap(), doc);
    }

    #[test]
    fn malformed_file_is_a_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();
        let err = DataFile::new(&path).read().unwrap_err();
        assert!(matches!(err, StoreError::Load { .. }));
        assert!(err.to_string().starts_with("Error loading data from"));
    }

    #[test]
    fn unwritable_target_is_a_save_failure() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be
        let err = DataFile::new(dir.path())
            .write(&StudyDocument::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::Save { .. }));
    }
}
