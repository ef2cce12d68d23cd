use std::panic;
use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{extraction_error, read_bytes};

/// Extracts the text of every page, in page order.
///
/// `pdf-extract` can panic on some malformed documents; the panic is
/// caught and reported as an extraction error for this file only.
pub fn extract(path: &Path) -> Result<String, AppError> {
    let bytes = read_bytes(path)?;

    match quietly(|| pdf_extract::extract_text_from_mem(&bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(extraction_error(path, e)),
        Err(_) => Err(extraction_error(path, "PDF parser aborted on malformed input")),
    }
}

/// Runs `f`, catching a panic without letting the default hook print it.
/// The panic message goes to the debug log instead.
fn quietly<F, R>(f: F) -> std::thread::Result<R>
where
    F: FnOnce() -> R + panic::UnwindSafe,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| debug!("PDF parser panicked: {info}")));
    let outcome = panic::catch_unwind(f);
    panic::set_hook(previous);
    outcome
}

/// Builds a minimal PDF with one Helvetica text line per page. Text must
/// not contain `(`, `)` or `\`.
#[cfg(test)]
pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", 4 + 2 * i)).collect();

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {page_count} >>", kids.join(" ")),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];
    for (i, text) in pages.iter().enumerate() {
        // Each page starts lower than the last so the extractor breaks the line.
        let content = format!("BT /F1 12 Tf 72 {} Td ({text}) Tj ET", 720 - 24 * i);
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_at = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    out.extend_from_slice(xref.as_bytes());
    out
}
