use std::path::Path;

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::errors::AppError;
use crate::extraction::{extraction_error, read_bytes};

/// Extracts body paragraph text in document order, one paragraph per line.
/// Empty paragraphs are skipped.
pub fn extract(path: &Path) -> Result<String, AppError> {
    let bytes = read_bytes(path)?;
    let docx = read_docx(&bytes).map_err(|e| extraction_error(path, e))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_text(&paragraph.children, &mut text);
    text
}

/// Appends run text in order, descending into hyperlinks.
fn push_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        out.push_str(&t.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_text(&link.children, out),
            _ => {}
        }
    }
}
