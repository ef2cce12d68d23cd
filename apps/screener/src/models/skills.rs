use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::matcher::normalize_for_matching;

/// Ordered list of required skill terms with a distinguished critical subset.
///
/// Terms are stored trimmed and lowercased, de-duplicated in first-seen
/// order by the form the matcher compares on. Critical terms missing from the required list are appended to it,
/// so `critical ⊆ required` holds for every constructed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    required: Vec<String>,
    critical: Vec<String>,
}

impl SkillSet {
    pub fn new<R, C, S>(required: R, critical: C) -> Result<Self, AppError>
    where
        R: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut required_terms = dedup_terms(required);
        let mut critical_terms = dedup_terms(critical);

        // A critical term takes the spelling of the required term it matches.
        for term in critical_terms.iter_mut() {
            let key = matching_key(term);
            match required_terms.iter().find(|r| matching_key(r) == key) {
                Some(existing) => *term = existing.clone(),
                None => required_terms.push(term.clone()),
            }
        }

        if required_terms.is_empty() {
            return Err(AppError::Configuration(
                "No required skills configured. Enter at least one skill before screening."
                    .to_string(),
            ));
        }

        Ok(Self {
            required: required_terms,
            critical: critical_terms,
        })
    }

    /// Builds a skill set from the comma-separated form used on the command
    /// line and in the environment, e.g. `"python, sql, aws"`.
    pub fn parse(required_csv: &str, critical_csv: &str) -> Result<Self, AppError> {
        Self::new(split_terms(required_csv), split_terms(critical_csv))
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn critical(&self) -> &[String] {
        &self.critical
    }

    pub fn is_critical(&self, term: &str) -> bool {
        self.critical.iter().any(|c| c == term)
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

fn split_terms(raw: &str) -> Vec<&str> {
    raw.split(',').collect()
}

fn normalize_term(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Form the matcher compares on; "Machine-Learning" and "machine learning"
/// share a key.
fn matching_key(term: &str) -> String {
    normalize_for_matching(term).trim().to_string()
}

/// Keeps the first spelling of each term. Terms with no letters, digits,
/// `+` or `#` can never match and are dropped.
fn dedup_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    let mut keys: Vec<String> = Vec::new();
    for term in terms {
        let term = normalize_term(term.as_ref());
        let key = matching_key(&term);
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
            out.push(term);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_lowercases_and_dedups() {
        let skills = SkillSet::parse(" Python, SQL ,python,, Machine   Learning ", "").unwrap();
        assert_eq!(skills.required(), &["python", "sql", "machine learning"]);
        assert!(skills.critical().is_empty());
    }

    #[test]
    fn test_critical_terms_are_appended_to_required() {
        let skills = SkillSet::parse("sql, docker", "Python, sql").unwrap();
        assert_eq!(skills.required(), &["sql", "docker", "python"]);
        assert_eq!(skills.critical(), &["python", "sql"]);
        assert!(skills.is_critical("python"));
        assert!(!skills.is_critical("docker"));
    }

    #[test]
    fn test_empty_required_list_is_configuration_error() {
        let err = SkillSet::parse(" , ,", "").unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)), "got {err:?}");
    }

    #[test]
    fn test_spelling_variants_count_once() {
        let skills = SkillSet::parse("machine learning, Python, ML", "Machine-Learning").unwrap();
        assert_eq!(skills.required(), &["machine learning", "python", "ml"]);
        assert_eq!(skills.critical(), &["machine learning"]);
        assert!(skills.is_critical("machine learning"));
        assert_eq!(skills.len(), 3);
    }

    #[test]
    fn test_terms_that_can_never_match_are_dropped() {
        let skills = SkillSet::new(vec!["!!!", "sql", "--"], Vec::<&str>::new()).unwrap();
        assert_eq!(skills.required(), &["sql"]);
        assert!(SkillSet::parse("!!!", "").is_err());
    }

    #[test]
    fn test_critical_only_still_yields_required_list() {
        let skills = SkillSet::parse("", "rust").unwrap();
        assert_eq!(skills.len(), 1);
        assert!(skills.is_critical("rust"));
    }
}
