use std::path::{Path, PathBuf};

use super::populate_copy;
use crate::document::{text_paragraph, Document};
use crate::errors::PipelineError;

/// Closing line the letter body is inserted above.
pub const CLOSING_ANCHOR: &str = "Thank you for your consideration";
/// Greeting written ahead of the body. No company name is substituted.
pub const GREETING: &str = "Dear Hiring Manager,";

/// Inserts greeting, blank line, each non-empty body line and a trailing blank
/// line before the closing paragraph. Returns `false` if the closing is missing.
pub fn insert_cover_letter(doc: &mut Document, body: &str) -> bool {
    let Some(anchor) = doc.find_paragraph(CLOSING_ANCHOR) else {
        return false;
    };

    let mut paragraphs = vec![text_paragraph(GREETING), text_paragraph("")];
    paragraphs.extend(
        body.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(text_paragraph),
    );
    paragraphs.push(text_paragraph(""));

    doc.insert_paragraphs_before(anchor, paragraphs);
    true
}

pub fn populate_cover_letter(
    template: &Path,
    output: &Path,
    body: &str,
) -> Result<Option<PathBuf>, PipelineError> {
    populate_copy(template, output, "Cover letter closing line", |doc| {
        insert_cover_letter(doc, body)
    })
}
