#![allow(dead_code)]

//! Screening session: the explicit state object the interface layer owns.
//!
//! Flow: upload (extract → score) → screen → draft → save / export.
//! Everything runs on the calling thread; each candidate's failure is
//! recorded against that candidate and the batch moves on.

pub mod export;
pub mod store;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_text, DocumentFormat};
use crate::models::{Candidate, CandidateId, CandidateStatus, SkillSet};
use crate::screening::name::guess_display_name;
use crate::screening::reply::compose_for;
use crate::screening::{SkillMatcher, Tier};
use crate::session::store::{DraftRecord, DraftStore};

// ────────────────────────────────────────────────────────────────────────────
// Reports
// ────────────────────────────────────────────────────────────────────────────

/// What happened to each file of an upload batch.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub added: Vec<CandidateId>,
    /// Same file name uploaded again; the earlier candidate was replaced.
    pub replaced: Vec<CandidateId>,
    /// Unsupported files (not added) and extraction failures (added as
    /// unscorable), in batch order.
    pub errors: Vec<AppError>,
}

impl UploadReport {
    pub fn accepted(&self) -> usize {
        self.added.len() + self.replaced.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSummary {
    pub suitable: usize,
    pub maybe: usize,
    pub reject: usize,
    pub unscreened: usize,
    pub unscorable: usize,
}

impl TierSummary {
    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Suitable => self.suitable,
            Tier::Maybe => self.maybe,
            Tier::Reject => self.reject,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Session
// ────────────────────────────────────────────────────────────────────────────

pub struct Session {
    id: Uuid,
    skills: Option<SkillSet>,
    matcher: Box<dyn SkillMatcher>,
    candidates: Vec<Candidate>,
}

impl Session {
    pub fn new(matcher: Box<dyn SkillMatcher>) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, "Session started (matcher: {})", matcher.backend());
        Self {
            id,
            skills: None,
            matcher,
            candidates: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn skill_set(&self) -> Option<&SkillSet> {
        self.skills.as_ref()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn get(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }

    /// Replaces the skill set and rescores every scorable candidate.
    pub fn set_skill_set(&mut self, skills: SkillSet) -> Result<TierSummary, AppError> {
        info!(
            session = %self.id,
            "Skill set: {} required, {} critical",
            skills.len(),
            skills.critical().len()
        );
        self.skills = Some(skills);
        self.screen()
    }

    /// Extracts each file in order. Unsupported files are skipped; files
    /// that fail to parse are kept as unscorable. Neither stops the batch.
    ///
    /// Uploading the same path again replaces its candidate. A different
    /// path whose file name is already taken is rejected, since the file
    /// name is the candidate id.
    pub fn upload<P: AsRef<Path>>(&mut self, paths: &[P]) -> UploadReport {
        let mut report = UploadReport::default();

        for path in paths {
            let path = path.as_ref();
            let format = match DocumentFormat::from_path(path) {
                Ok(format) => format,
                Err(e) => {
                    warn!(session = %self.id, "{}", e.user_message());
                    report.errors.push(e);
                    continue;
                }
            };

            let source = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
            let id = CandidateId::from_path(path);
            if let Some(existing) = self.get(&id).filter(|c| c.path != source) {
                let err = AppError::Validation(format!(
                    "{id} is already loaded from {}; rename or remove it before uploading {}",
                    existing.path.display(),
                    path.display()
                ));
                warn!(session = %self.id, "{}", err.user_message());
                report.errors.push(err);
                continue;
            }

            let mut candidate = self.build_candidate(id, source, format, &mut report);
            if let Some(skills) = self.skills.as_ref().filter(|_| candidate.is_scorable()) {
                match self.matcher.score(&candidate.text, skills) {
                    Ok(result) => candidate.status = CandidateStatus::Scored(result),
                    Err(e) => report.errors.push(e),
                }
            }

            let id = candidate.id.clone();
            match self.candidates.iter_mut().find(|c| c.id == id) {
                Some(existing) => {
                    *existing = candidate;
                    report.replaced.push(id);
                }
                None => {
                    self.candidates.push(candidate);
                    report.added.push(id);
                }
            }
        }

        info!(
            session = %self.id,
            "Uploaded {} files ({} replaced, {} errors)",
            report.accepted(),
            report.replaced.len(),
            report.errors.len()
        );
        report
    }

    fn build_candidate(
        &self,
        id: CandidateId,
        path: PathBuf,
        format: DocumentFormat,
        report: &mut UploadReport,
    ) -> Candidate {
        let (text, status) = match extract_text(&path, format) {
            Ok(text) => (text, CandidateStatus::Unscreened),
            Err(e) => {
                let reason = e.user_message();
                warn!(session = %self.id, "{reason}");
                report.errors.push(e);
                (String::new(), CandidateStatus::Unscorable { reason })
            }
        };

        Candidate {
            id,
            path,
            format,
            display_name: guess_display_name(&text),
            text,
            status,
            draft: None,
        }
    }

    /// Scores every scorable candidate against the current skill set.
    /// Blocked with a configuration error until a skill set is configured.
    pub fn screen(&mut self) -> Result<TierSummary, AppError> {
        let skills = self.skills.as_ref().ok_or_else(|| {
            AppError::Configuration(
                "No required skills configured. Enter at least one skill before screening."
                    .to_string(),
            )
        })?;

        for candidate in self.candidates.iter_mut().filter(|c| c.is_scorable()) {
            let result = self.matcher.score(&candidate.text, skills)?;
            candidate.status = CandidateStatus::Scored(result);
        }

        let summary = self.summary();
        info!(
            session = %self.id,
            "Screening complete: {} suitable, {} maybe, {} reject, {} unscorable",
            summary.suitable,
            summary.maybe,
            summary.reject,
            summary.unscorable
        );
        Ok(summary)
    }

    pub fn summary(&self) -> TierSummary {
        let mut summary = TierSummary::default();
        for candidate in &self.candidates {
            match &candidate.status {
                CandidateStatus::Unscreened => summary.unscreened += 1,
                CandidateStatus::Unscorable { .. } => summary.unscorable += 1,
                CandidateStatus::Scored(result) => match result.tier() {
                    Tier::Suitable => summary.suitable += 1,
                    Tier::Maybe => summary.maybe += 1,
                    Tier::Reject => summary.reject += 1,
                },
            }
        }
        summary
    }

    pub fn remove(&mut self, id: &CandidateId) -> Option<Candidate> {
        let index = self.candidates.iter().position(|c| &c.id == id)?;
        info!(session = %self.id, "Removed {id}");
        Some(self.candidates.remove(index))
    }

    /// Drops every candidate and starts a fresh session id. The skill set
    /// is kept.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.id = Uuid::new_v4();
        info!(session = %self.id, "Session cleared");
    }

    /// Updates the in-memory reply for `id`. Re-scoring leaves it alone.
    pub fn edit_draft(&mut self, id: &CandidateId, text: impl Into<String>) -> Result<(), AppError> {
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("candidate {id}")))?;
        candidate.draft = Some(text.into());
        Ok(())
    }

    /// Current reply for `id`: the in-memory edit, else the last saved
    /// draft, else the composed default for its tier.
    pub fn draft(&self, id: &CandidateId, store: &DraftStore) -> Result<String, AppError> {
        let candidate = self
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("candidate {id}")))?;

        if let Some(text) = &candidate.draft {
            return Ok(text.clone());
        }
        if let Some(record) = store.load(id)? {
            return Ok(record.reply);
        }

        let result = candidate.match_result().ok_or_else(|| {
            AppError::Validation(format!(
                "{id} is {}; screen it before generating a reply.",
                candidate.status.label().to_lowercase()
            ))
        })?;
        Ok(compose_for(candidate.display_name.as_deref(), result))
    }

    /// Persists the current reply for `id` together with its tier and ratio.
    pub fn save_draft(&self, id: &CandidateId, store: &DraftStore) -> Result<DraftRecord, AppError> {
        let reply = self.draft(id, store)?;
        let mut record = DraftRecord::new(id, reply);
        if let Some(result) = self.get(id).and_then(Candidate::match_result) {
            record.tier = Some(result.tier());
            record.match_ratio = Some(result.ratio());
        }
        store.save(&record)?;
        Ok(record)
    }

    pub fn export(&self, path: &Path) -> Result<usize, AppError> {
        export::export_all(path, &self.candidates)
    }
}
