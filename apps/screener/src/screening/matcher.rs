//! Skill matching: pluggable, trait-based scorer that measures resume text
//! against the configured `SkillSet`.
//!
//! Default: `KeywordMatcher` (whole-word keyword presence, deterministic).
//! The session holds a `Box<dyn SkillMatcher>` so another backend can be
//! dropped in without touching upload, export or reply code.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::SkillSet;
use crate::screening::classify::{classify, Thresholds, Tier};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of scoring one resume against one skill set.
///
/// Fields are private: a result only comes out of a matcher, so `matched` and
/// `missing` always partition the skill set and `tier` always agrees with
/// `ratio` and the critical flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    matched: Vec<String>,
    missing: Vec<String>,
    missing_critical: Vec<String>,
    ratio: f64, // 0.0 – 1.0
    tier: Tier,
}

impl MatchResult {
    pub fn matched(&self) -> &[String] {
        &self.matched
    }

    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    pub fn has_missing_critical(&self) -> bool {
        !self.missing_critical.is_empty()
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn percent_label(&self) -> String {
        percent_label(self.ratio)
    }

    /// One-line explanation of the tier.
    pub fn reason(&self) -> String {
        if self.has_missing_critical() {
            format!(
                "Missing critical skills: {}",
                self.missing_critical.join(", ")
            )
        } else {
            let total = self.matched.len() + self.missing.len();
            format!(
                "{}/{} required skills matched ({})",
                self.matched.len(),
                total,
                self.percent_label()
            )
        }
    }
}

/// Ratio as a percentage truncated to two decimals, trailing zeros
/// dropped: `"100%"`, `"66.66%"`. Truncation keeps a ratio just under a
/// cut-off from printing as the cut-off itself.
pub fn percent_label(ratio: f64) -> String {
    let hundredths = (ratio * 10_000.0 + 1e-6).floor() / 100.0;
    let label = format!("{hundredths:.2}");
    let label = label.trim_end_matches('0').trim_end_matches('.');
    format!("{label}%")
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

pub trait SkillMatcher {
    fn score(&self, text: &str, skills: &SkillSet) -> Result<MatchResult, AppError>;

    /// Short label for logs, e.g. `"keyword"`.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher (default)
// ────────────────────────────────────────────────────────────────────────────

/// Whole-word keyword matcher.
///
/// Algorithm:
/// 1. Normalise text and each skill: lowercase, collapse every run of
///    characters outside `[a-z0-9+#]` into one space.
/// 2. A skill is present when its normalised form appears in the
///    normalised text bounded by spaces. "java" does not match
///    "javascript"; "machine learning" matches "Machine-Learning".
/// 3. ratio = |matched| / |required|
/// 4. tier = classify(ratio, any critical missing)
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    thresholds: Thresholds,
}

impl KeywordMatcher {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl SkillMatcher for KeywordMatcher {
    fn score(&self, text: &str, skills: &SkillSet) -> Result<MatchResult, AppError> {
        match_skills(text, skills, &self.thresholds)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core keyword algorithm
// ────────────────────────────────────────────────────────────────────────────

static NON_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9+#]+").expect("token pattern is valid"));

/// Lowercases and reduces `raw` to space-separated tokens, padded with one
/// space on each side. Input with no tokens becomes two spaces.
pub fn normalize_for_matching(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let collapsed = NON_TOKEN.replace_all(&lowered, " ");
    format!(" {} ", collapsed.trim())
}

/// True when `skill` occurs as a whole word (or whole phrase) in text that
/// has already been through `normalize_for_matching`.
fn contains_skill(normalized_text: &str, skill: &str) -> bool {
    let key = normalize_for_matching(skill);
    if key.trim().is_empty() {
        return false;
    }
    normalized_text.contains(&key)
}

pub fn match_skills(
    text: &str,
    skills: &SkillSet,
    thresholds: &Thresholds,
) -> Result<MatchResult, AppError> {
    if skills.is_empty() {
        return Err(AppError::Configuration(
            "Skill set is empty. Configure required skills before scoring.".to_string(),
        ));
    }

    let normalized = normalize_for_matching(text);

    let (matched, missing): (Vec<String>, Vec<String>) = skills
        .required()
        .iter()
        .cloned()
        .partition(|skill| contains_skill(&normalized, skill));

    let missing_critical: Vec<String> = missing
        .iter()
        .filter(|skill| skills.is_critical(skill))
        .cloned()
        .collect();

    let ratio = matched.len() as f64 / skills.len() as f64;
    let tier = classify(ratio, !missing_critical.is_empty(), thresholds);

    Ok(MatchResult {
        matched,
        missing,
        missing_critical,
        ratio,
        tier,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
