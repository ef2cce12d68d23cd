#![allow(dead_code)]

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extraction::DocumentFormat;
use crate::screening::matcher::MatchResult;

/// Stable candidate key: the source file name (without directories).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a candidate stands in the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum CandidateStatus {
    /// Text extracted, no skill set applied yet.
    Unscreened,
    Scored(MatchResult),
    /// Extraction failed; the candidate stays listed but is never scored.
    Unscorable { reason: String },
}

impl CandidateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateStatus::Unscreened => "Unscreened",
            CandidateStatus::Scored(result) => result.tier().as_str(),
            CandidateStatus::Unscorable { .. } => "Unscorable",
        }
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        match self {
            CandidateStatus::Scored(result) => Some(result),
            _ => None,
        }
    }
}

/// One uploaded resume.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: CandidateId,
    pub path: PathBuf,
    pub format: DocumentFormat,
    /// Best-effort name pulled from the resume header.
    pub display_name: Option<String>,
    pub text: String,
    pub status: CandidateStatus,
    /// In-memory edit of the reply, kept across re-scoring.
    pub draft: Option<String>,
}

impl Candidate {
    pub fn is_scorable(&self) -> bool {
        !matches!(self.status, CandidateStatus::Unscorable { .. })
    }

    pub fn match_result(&self) -> Option<&MatchResult> {
        self.status.match_result()
    }
}
