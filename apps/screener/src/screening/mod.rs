// Screening engine: keyword matching, tier classification, reply drafting.
// Everything here is pure; file and session I/O live in `extraction` and `session`.

pub mod classify;
pub mod matcher;
pub mod name;
pub mod reply;

pub use classify::{Thresholds, Tier};
pub use matcher::{KeywordMatcher, MatchResult, SkillMatcher};
