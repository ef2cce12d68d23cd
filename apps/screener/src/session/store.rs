//! Draft persistence: one JSON record per candidate under the drafts dir.
//!
//! Saving overwrites the candidate's previous draft. Plain file writes only.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::CandidateId;
use crate::screening::Tier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub candidate_file: String,
    /// Tier at save time; `None` if the candidate was never scored.
    pub tier: Option<Tier>,
    pub match_ratio: Option<f64>,
    pub reply: String,
    pub saved_at: DateTime<Utc>,
}

impl DraftRecord {
    pub fn new(id: &CandidateId, reply: impl Into<String>) -> Self {
        Self {
            candidate_file: id.to_string(),
            tier: None,
            match_ratio: None,
            reply: reply.into(),
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the draft for `id`. Characters outside
    /// `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, id: &CandidateId) -> PathBuf {
        let stem: String = id
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }

    /// Writes (or overwrites) the draft for `record.candidate_file`.
    pub fn save(&self, record: &DraftRecord) -> Result<PathBuf, AppError> {
        if record.reply.trim().is_empty() {
            return Err(AppError::Validation(
                "Generate or type a reply before saving.".to_string(),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(&CandidateId::new(record.candidate_file.clone()));
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;

        info!(
            "Saved reply draft for {} to {}",
            record.candidate_file,
            path.display()
        );
        Ok(path)
    }

    /// Last saved draft for `id`, or `None` if nothing was saved.
    pub fn load(&self, id: &CandidateId) -> Result<Option<DraftRecord>, AppError> {
        let path = self.path_for(id);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: DraftRecord = serde_json::from_str(&raw)?;
        // Two ids can sanitise to the same file name.
        if record.candidate_file != id.as_str() {
            debug!(
                "Draft file {} belongs to {}, not {}",
                path.display(),
                record.candidate_file,
                id
            );
            return Ok(None);
        }
        Ok(Some(record))
    }

    /// All saved drafts, oldest first. Unreadable files are skipped with a
    /// warning.
    pub fn list(&self) -> Result<Vec<DraftRecord>, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(AppError::from)
                .and_then(|raw| serde_json::from_str::<DraftRecord>(&raw).map_err(AppError::from));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable draft {}: {e}", path.display()),
            }
        }

        records.sort_by(|a, b| a.saved_at.cmp(&b.saved_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_save_then_load_returns_latest_text() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("drafts"));
        let id = CandidateId::new("jane_doe.pdf");

        store.save(&DraftRecord::new(&id, "first")).unwrap();
        store.save(&DraftRecord::new(&id, "second, edited")).unwrap();

        let loaded = store.load(&id).unwrap().expect("draft saved");
        assert_eq!(loaded.reply, "second, edited");
        assert_eq!(loaded.candidate_file, "jane_doe.pdf");
    }

    #[test]
    fn test_load_without_save_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        assert!(store.load(&CandidateId::new("nobody.txt")).unwrap().is_none());
    }

    #[test]
    fn test_empty_reply_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        let err = store
            .save(&DraftRecord::new(&CandidateId::new("a.txt"), "  \n "))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
    }

    #[test]
    fn test_path_for_sanitises_file_name() {
        let store = DraftStore::new("/drafts");
        let path = store.path_for(&CandidateId::new("Jane Doe (v2).pdf"));
        assert_eq!(path, PathBuf::from("/drafts/Jane_Doe__v2_.pdf.json"));
    }

    #[test]
    fn test_colliding_file_names_do_not_leak_drafts() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());
        store
            .save(&DraftRecord::new(&CandidateId::new("a b.txt"), "for a b"))
            .unwrap();

        assert!(store.load(&CandidateId::new("a_b.txt")).unwrap().is_none());
        assert!(store.load(&CandidateId::new("a b.txt")).unwrap().is_some());
    }

    #[test]
    fn test_list_orders_by_saved_at_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path());

        let mut older = DraftRecord::new(&CandidateId::new("old.txt"), "older");
        older.saved_at = Utc::now() - Duration::hours(1);
        let newer = DraftRecord::new(&CandidateId::new("new.txt"), "newer");
        store.save(&newer).unwrap();
        store.save(&older).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let records = store.list().unwrap();
        let replies: Vec<_> = records.iter().map(|r| r.reply.as_str()).collect();
        assert_eq!(replies, vec!["older", "newer"]);
    }

    #[test]
    fn test_list_of_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = DraftStore::new(dir.path().join("never-created"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file-not-dir");
        fs::write(&blocker, "x").unwrap();
        let store = DraftStore::new(&blocker);

        let err = store
            .save(&DraftRecord::new(&CandidateId::new("a.txt"), "hello"))
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)), "got {err:?}");
    }
}
