use std::path::Path;

use crate::errors::AppError;
use crate::extraction::read_bytes;

/// Reads a plain-text resume. Invalid UTF-8 sequences are replaced rather
/// than rejected.
pub fn extract(path: &Path) -> Result<String, AppError> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
