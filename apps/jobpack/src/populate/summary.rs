use std::path::{Path, PathBuf};

use super::populate_copy;
use crate::document::{text_paragraph, Document};
use crate::errors::PipelineError;

/// Heading text the summary is inserted under.
pub const SUMMARY_ANCHOR: &str = "Professional Summary";

/// Inserts `summary` as a new paragraph right after the "Professional Summary"
/// heading. Returns `false` if the heading is missing.
pub fn insert_summary(doc: &mut Document, summary: &str) -> bool {
    match doc.find_paragraph(SUMMARY_ANCHOR) {
        Some(anchor) => {
            doc.insert_paragraph_after(anchor, text_paragraph(summary));
            true
        }
        None => false,
    }
}

pub fn populate_summary(
    template: &Path,
    output: &Path,
    summary: &str,
) -> Result<Option<PathBuf>, PipelineError> {
    populate_copy(template, output, "Professional Summary heading", |doc| {
        insert_summary(doc, summary)
    })
}
