pub mod candidate;
pub mod skills;

pub use candidate::{Candidate, CandidateId, CandidateStatus};
pub use skills::SkillSet;
