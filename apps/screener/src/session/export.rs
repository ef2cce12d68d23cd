use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::errors::AppError;
use crate::models::Candidate;

pub const CSV_HEADER: [&str; 5] = [
    "filename",
    "matched_skills",
    "missing_skills",
    "match_ratio",
    "tier",
];

/// Writes one header row plus one row per candidate. Skill lists are
/// `;`-joined; the ratio has two decimals. Candidates without a score keep
/// their row with empty lists, `0.00`, and their status in the tier column.
pub fn write_csv<W: Write>(writer: W, candidates: &[Candidate]) -> Result<usize, AppError> {
    let mut wtr = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for candidate in candidates {
        let (matched, missing, ratio) = match candidate.match_result() {
            Some(result) => (
                result.matched().join(";"),
                result.missing().join(";"),
                result.ratio(),
            ),
            None => (String::new(), String::new(), 0.0),
        };
        wtr.write_record([
            candidate.id.to_string(),
            matched,
            missing,
            format!("{ratio:.2}"),
            candidate.status.label().to_string(),
        ])?;
    }
    wtr.flush()?;

    Ok(candidates.len())
}

/// Exports to `path`, creating parent directories as needed.
pub fn export_all(path: &Path, candidates: &[Candidate]) -> Result<usize, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let rows = write_csv(file, candidates)?;
    info!("Exported {rows} candidates to {}", path.display());
    Ok(rows)
}
