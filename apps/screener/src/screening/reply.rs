//! Reply composer. Fills one of three fixed templates, keyed by tier.
//!
//! Output is always a starting point: the user edits it before saving and
//! nothing here sends anything.

use crate::screening::classify::Tier;
use crate::screening::matcher::MatchResult;

const FALLBACK_NAME: &str = "Candidate";
const SIGN_OFF: &str = "Best regards,\nRecruitment Team";

/// Inputs for one reply.
pub struct ReplyParams<'a> {
    pub name: Option<&'a str>,
    pub tier: Tier,
    pub matched: &'a [String],
    pub missing: &'a [String],
    pub percent_label: &'a str,
}

pub fn compose_reply(params: ReplyParams<'_>) -> String {
    let ReplyParams {
        name,
        tier,
        matched,
        missing,
        percent_label,
    } = params;

    let name = name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);

    let body = match tier {
        Tier::Suitable => suitable_body(matched, percent_label),
        Tier::Maybe => maybe_body(matched, missing, percent_label),
        Tier::Reject => reject_body(missing),
    };

    format!("Hi {name},\n\n{body}\n\n{SIGN_OFF}")
}

/// Composes the default reply for a scored candidate.
pub fn compose_for(name: Option<&str>, result: &MatchResult) -> String {
    let percent_label = result.percent_label();
    compose_reply(ReplyParams {
        name,
        tier: result.tier(),
        matched: result.matched(),
        missing: result.missing(),
        percent_label: &percent_label,
    })
}

fn suitable_body(matched: &[String], percent_label: &str) -> String {
    format!(
        "Thank you for applying. We reviewed your resume and your skills ({}) \
         show a strong fit for the role (match: {percent_label}). We'll move your \
         application to the next stage and contact you soon with interview details.",
        skill_list(matched, 6, "relevant skills")
    )
}

fn maybe_body(matched: &[String], missing: &[String], percent_label: &str) -> String {
    let mut body = format!(
        "Thank you for applying. We see potential fit based on your skills ({}). \
         Your match is {percent_label}.",
        skill_list(matched, 5, "listed skills")
    );
    if !missing.is_empty() {
        body.push_str(&format!(
            " We would like to hear more about your experience with {}.",
            missing.join(", ")
        ));
    }
    body.push_str(" We'll review further and may reach out for a short screening call.");
    body
}

fn reject_body(missing: &[String]) -> String {
    let mut body =
        String::from("Thank you for applying. At this time we will not be proceeding with your application.");
    if !missing.is_empty() {
        body.push_str(&format!(
            " The role requires experience with {}, which we could not find in your resume.",
            missing.join(", ")
        ));
    }
    body.push_str(
        " We appreciate your interest and encourage you to apply for future openings \
         that match your experience.",
    );
    body
}

fn skill_list(skills: &[String], limit: usize, fallback: &str) -> String {
    if skills.is_empty() {
        fallback.to_string()
    } else {
        skills
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
